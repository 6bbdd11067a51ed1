//! Fire a playback command at an AMInet device
//!
//! Usage: cargo run --example send_play -- <host> [channel]

use std::sync::Arc;
use std::time::Duration;

use aminet::{Action, LinkStatus, PlaybackCommand, Transport, TransportConfig, encode};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "127.0.0.1".to_string());
    let channel = args.next().unwrap_or_else(|| "1".to_string());

    let action = Action::Playback {
        command: PlaybackCommand::Play,
        channel,
    };

    let frame = encode(&action);
    println!(
        "frame: {}",
        frame
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ")
    );

    let mut link = Transport::new(
        TransportConfig::for_host(host),
        Arc::new(|status: LinkStatus| println!("link status: {status}")),
    );
    link.open().await?;
    link.send(&action).await?;

    // Leave the listener a moment to pick up the reply
    tokio::time::sleep(Duration::from_millis(500)).await;
    link.close().await;

    Ok(())
}

//! AMInet - UDP client protocol for Alcorn McBride show-control devices
//!
//! This library builds AMInet command frames and drives them over UDP:
//! playback control, stream toggles, file selection and banner text for
//! binloop-style A/V hardware, plus raw pass-through for everything else.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use aminet::{Action, LinkStatus, PlaybackCommand, Transport, TransportConfig};
//!
//! # async fn run() -> Result<(), aminet::TransportError> {
//! let config = TransportConfig::for_host("192.168.1.50");
//! let sink = Arc::new(|status: LinkStatus| println!("link: {status}"));
//!
//! let mut link = Transport::new(config, sink);
//! link.open().await?;
//!
//! // Start playback on channel 1
//! link.send(&Action::Playback {
//!     command: PlaybackCommand::Play,
//!     channel: "1".to_string(),
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Typed action vocabulary** - playback, stream toggles, file selection,
//!   banner text, raw pass-through
//! - **Fixed-envelope framing** - preamble, CR-terminated ASCII payload,
//!   variable-width additive checksum, trailer
//! - **Tri-state link health** - OK / WARNING / ERROR driven by device
//!   replies, observable through a status sink
//! - **Two socket strategies** - a persistent listening socket or an
//!   ephemeral fire-and-forget socket per command
//!
//! Enable the `serde` feature to (de)serialize [`TransportConfig`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;
pub mod transport;

pub use protocol::{
    ACK, AMINET_PORT, Action, DeviceFault, FAULT_MARKER, PREAMBLE, PlaybackCommand, Reply,
    StreamKind, TRAILER, encode,
};
pub use transport::{
    AckPolicy, LinkStatus, Result, SocketMode, StatusSink, Transport, TransportConfig,
    TransportError,
};

//! AMInet frame codec (encode only)
//!
//! Builds complete outbound frames. The protocol is asymmetric: commands go
//! out framed, replies come back as bare ASCII datagrams, so there is no
//! frame decoder here (see [`Reply`](super::Reply) for reply handling).

use super::checksum::Checksum;
use super::{Action, PREAMBLE, TRAILER};

/// Encode an action into a complete AMInet frame
///
/// # Format
///
/// ```text
/// [PREAMBLE (3 bytes)] [PAYLOAD + CR (variable)] [CHECKSUM (1/3/4 bytes)] [TRAILER (1 byte)]
/// ```
///
/// The checksum covers the preamble and payload, skipping the first preamble
/// byte.
#[must_use]
pub fn encode(action: &Action) -> Vec<u8> {
    let payload = action.command_text();

    let mut frame = Vec::with_capacity(PREAMBLE.len() + payload.len() + 6);
    frame.extend_from_slice(&PREAMBLE);
    frame.extend_from_slice(payload.as_bytes());
    frame.push(b'\r');

    let checksum = Checksum::over(&frame);
    frame.extend_from_slice(checksum.as_bytes());
    frame.push(TRAILER);

    frame
}

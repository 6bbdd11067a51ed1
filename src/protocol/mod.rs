//! AMInet protocol core implementation
//!
//! This module provides the wire format, action vocabulary, frame codec and
//! reply alphabet for AMInet.

mod action;
pub mod checksum;
mod codec;
mod reply;

pub use action::{Action, PlaybackCommand, StreamKind};
pub use codec::encode;
pub use reply::{DeviceFault, Reply};

/// Fixed three-byte frame preamble
pub const PREAMBLE: [u8; 3] = [0xF1, 0x01, 0x04];

/// Frame trailer byte
pub const TRAILER: u8 = 0xF2;

/// UDP port AMInet devices listen on, and deliver replies to
pub const AMINET_PORT: u16 = 2639;

/// Positive acknowledgement datagram (`R` + carriage return)
pub const ACK: &[u8] = b"R\r";

/// First byte of device fault replies (ASCII `E`)
pub const FAULT_MARKER: u8 = 0x45;

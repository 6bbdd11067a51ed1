//! Inbound reply alphabet
//!
//! Devices answer with bare ASCII datagrams, not framed messages: `R\r` for
//! a positive acknowledgement, `Exx\r` for a fault, and free-form text for
//! query responses.

use std::fmt;

use bytes::Bytes;

use super::{ACK, FAULT_MARKER};

/// Known device fault codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceFault {
    /// `E00` - the addressed channel does not exist
    InvalidChannel,
    /// `E01` - the channel hardware reported a failure
    ChannelHardware,
    /// `E04` - the command is invalid or unsupported by this firmware
    UnsupportedCommand,
    /// `E05` - the addressed group does not exist
    InvalidGroup,
    /// `E12` - a file search failed
    SearchError,
}

impl DeviceFault {
    /// Decode a reply datagram into a known fault, if it matches exactly
    #[must_use]
    pub fn from_wire(datagram: &[u8]) -> Option<Self> {
        match datagram {
            b"E00\r" => Some(Self::InvalidChannel),
            b"E01\r" => Some(Self::ChannelHardware),
            b"E04\r" => Some(Self::UnsupportedCommand),
            b"E05\r" => Some(Self::InvalidGroup),
            b"E12\r" => Some(Self::SearchError),
            _ => None,
        }
    }

    /// Three-character wire code, without the trailing carriage return
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidChannel => "E00",
            Self::ChannelHardware => "E01",
            Self::UnsupportedCommand => "E04",
            Self::InvalidGroup => "E05",
            Self::SearchError => "E12",
        }
    }

    /// Operator-facing description
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidChannel => "Invalid Channel Number",
            Self::ChannelHardware => "Channel Hardware Error",
            Self::UnsupportedCommand => "Invalid or Unsupported Command",
            Self::InvalidGroup => "Invalid Group Number",
            Self::SearchError => "Search Error",
        }
    }
}

impl fmt::Display for DeviceFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A classified inbound datagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Positive acknowledgement (`R\r`)
    Ack,
    /// A reply matching the known fault table
    Fault(DeviceFault),
    /// Anything else the device sent
    Unknown(Bytes),
}

impl Reply {
    /// Classify a raw reply datagram
    #[must_use]
    pub fn classify(datagram: &[u8]) -> Self {
        if datagram == ACK {
            Self::Ack
        } else if let Some(fault) = DeviceFault::from_wire(datagram) {
            Self::Fault(fault)
        } else {
            Self::Unknown(Bytes::copy_from_slice(datagram))
        }
    }

    /// Whether a datagram carries the device error marker in its first byte
    #[must_use]
    pub fn is_fault_marked(datagram: &[u8]) -> bool {
        datagram.first() == Some(&FAULT_MARKER)
    }

    /// Operator-facing description of a reply datagram
    ///
    /// Known faults map to their table entry; everything else falls back to
    /// the raw payload text, lossily decoded.
    #[must_use]
    pub fn describe(datagram: &[u8]) -> String {
        match DeviceFault::from_wire(datagram) {
            Some(fault) => fault.message().to_owned(),
            None => String::from_utf8_lossy(datagram).into_owned(),
        }
    }
}

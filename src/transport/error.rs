//! Transport error types

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors raised by the UDP transport
///
/// Every failure here also degrades the reported link status to ERROR; the
/// values are returned so callers that want to react programmatically can,
/// while fire-and-forget callers may ignore them.
#[derive(Error, Debug)]
pub enum TransportError {
    /// No target host configured
    #[error("no target host configured")]
    NoTarget,

    /// The link has not been opened
    #[error("link is not open")]
    NotOpen,

    /// Local socket could not be bound
    #[error("bind to {addr} failed: {source}")]
    Bind {
        /// Local address the bind attempted
        addr: SocketAddr,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Target host did not resolve to an address
    #[error("cannot resolve {host}: {source}")]
    Resolve {
        /// Configured host name or address
        host: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Datagram could not be sent
    #[error("send to {host} failed: {source}")]
    Send {
        /// Configured host name or address
        host: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TransportError>;

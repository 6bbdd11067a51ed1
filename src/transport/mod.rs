//! AMInet UDP transport
//!
//! Socket lifecycle, command dispatch, the await-ACK session machine, and
//! link status reporting.

mod error;
mod link;
mod session;
mod socket;
mod status;

pub use error::{Result, TransportError};
pub use link::{SocketMode, Transport, TransportConfig};
pub use session::{AckPolicy, ReplyOutcome, Session};
pub use socket::SocketBinding;
pub use status::{LinkStatus, StatusSink};

//! Link status reporting

use std::fmt;

/// Health of the device link
///
/// Exactly one of three states, driven by traffic: the last exchange either
/// completed normally, drew an unexpected reply, or failed at the socket
/// level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkStatus {
    /// Last exchange completed normally
    Ok,
    /// The device replied, but not with the expected acknowledgement
    Warning,
    /// A socket-level failure occurred
    Error,
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Capability through which the transport reports link status to its host
///
/// Reports fire on every observation, including repeats of the current
/// state; hosts that only care about transitions can dedup on their side.
/// Implemented for plain closures:
///
/// ```
/// use aminet::{LinkStatus, StatusSink};
///
/// let sink = |status: LinkStatus| eprintln!("link: {status}");
/// sink.report(LinkStatus::Ok);
/// ```
pub trait StatusSink: Send + Sync {
    /// Record one observed link status
    fn report(&self, status: LinkStatus);
}

impl<F> StatusSink for F
where
    F: Fn(LinkStatus) + Send + Sync,
{
    fn report(&self, status: LinkStatus) {
        self(status);
    }
}

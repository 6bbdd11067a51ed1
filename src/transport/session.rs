//! Per-device session state: the await-ACK flag and reply classification
//!
//! This is the pure half of the transport. It owns no sockets and does no
//! logging; the link layer feeds it outbound actions and inbound datagrams
//! and acts on the outcomes it returns.

use bytes::Bytes;

use crate::protocol::{Action, Reply};

/// How replies are matched to outstanding commands
///
/// The two policies track firmware generations: current firmware answers
/// every command with `R\r`, the oldest generation answers with whatever it
/// feels like (or nothing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AckPolicy {
    /// Only `R\r` satisfies an outstanding command; any other reply that
    /// arrives while one is outstanding degrades the link to WARNING
    #[default]
    Strict,
    /// Any reply is acceptable: commands are never marked outstanding and
    /// no unexpected-response warnings are ever raised
    Permissive,
}

/// Outcome of classifying one inbound datagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The device acknowledged; the link is healthy
    Acknowledged,
    /// A non-ACK reply arrived while a command was outstanding
    Unexpected {
        /// Decoded fault message, or the raw payload text
        detail: String,
    },
    /// An unsolicited datagram carrying the device fault marker
    UnsolicitedFault {
        /// Decoded fault message, or the raw payload text
        detail: String,
    },
    /// Any other unsolicited datagram, e.g. a query response
    Unsolicited {
        /// Raw reply payload
        payload: Bytes,
    },
}

/// Request/acknowledgement state for one device link
///
/// The await-ACK flag is armed when an ACK-expecting command goes out and
/// cleared by the next inbound datagram, whatever it says. There is no
/// timeout: a lost reply leaves the flag armed until later traffic arrives,
/// which then classifies against the stale command.
#[derive(Debug)]
pub struct Session {
    policy: AckPolicy,
    awaiting_ack: bool,
}

impl Session {
    /// Create an idle session
    #[must_use]
    pub fn new(policy: AckPolicy) -> Self {
        Self {
            policy,
            awaiting_ack: false,
        }
    }

    /// Adopt a new policy and drop any outstanding command
    pub fn reconfigure(&mut self, policy: AckPolicy) {
        self.policy = policy;
        self.awaiting_ack = false;
    }

    /// Record an outgoing action, arming the await-ACK flag when the policy
    /// and the action call for it
    pub fn note_sent(&mut self, action: &Action) {
        if self.policy == AckPolicy::Strict && action.expects_ack() {
            self.awaiting_ack = true;
        }
    }

    /// Classify an inbound datagram
    ///
    /// Every datagram clears the await-ACK flag, matching or not.
    pub fn on_datagram(&mut self, datagram: &[u8]) -> ReplyOutcome {
        let awaiting = std::mem::take(&mut self.awaiting_ack);

        match Reply::classify(datagram) {
            Reply::Ack => ReplyOutcome::Acknowledged,
            _ if awaiting => ReplyOutcome::Unexpected {
                detail: Reply::describe(datagram),
            },
            Reply::Fault(fault) => ReplyOutcome::UnsolicitedFault {
                detail: fault.message().to_owned(),
            },
            Reply::Unknown(payload) => {
                if Reply::is_fault_marked(&payload) {
                    ReplyOutcome::UnsolicitedFault {
                        detail: String::from_utf8_lossy(&payload).into_owned(),
                    }
                } else {
                    ReplyOutcome::Unsolicited { payload }
                }
            }
        }
    }

    /// Drop any outstanding command after a socket-level failure
    pub fn on_socket_error(&mut self) {
        self.awaiting_ack = false;
    }

    /// Whether a command is outstanding
    #[must_use]
    pub fn awaiting_ack(&self) -> bool {
        self.awaiting_ack
    }
}

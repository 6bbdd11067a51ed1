//! Device link facade: socket lifecycle, command dispatch, reply listening
//!
//! One [`Transport`] drives one device. It owns the socket (per the
//! configured [`SocketMode`]), the request/acknowledgement session state,
//! and the status sink through which the host observes link health.

use std::fmt;
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::net::lookup_host;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::protocol::{self, AMINET_PORT, Action};

use super::error::{Result, TransportError};
use super::session::{AckPolicy, ReplyOutcome, Session};
use super::socket::SocketBinding;
use super::status::{LinkStatus, StatusSink};

/// Receive buffer size for reply datagrams; replies are a handful of bytes,
/// query responses at most a line
const RECV_BUFFER_SIZE: usize = 2048;

/// Socket lifecycle strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SocketMode {
    /// One socket bound to the local AMInet port for the life of the link,
    /// listening for replies
    #[default]
    Persistent,
    /// A fresh socket per outgoing command, released right after the send;
    /// replies have nowhere to land and are never observed
    Ephemeral,
}

/// Transport configuration, owned by the host and applied as a unit
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransportConfig {
    /// Target device host name or IP address; `None` keeps the link closed
    ///
    /// Host names resolve to their first IPv4 record, matching the IPv4
    /// sockets the transport binds.
    pub host: Option<String>,
    /// UDP port the device listens on
    pub device_port: u16,
    /// Local port for the persistent listening socket, 0 lets the OS pick
    ///
    /// Devices address replies to the fixed AMInet port on the controller,
    /// so overriding this only makes sense against simulators.
    pub local_port: u16,
    /// Socket lifecycle strategy
    pub socket_mode: SocketMode,
    /// Reply-matching policy
    pub ack_policy: AckPolicy,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            host: None,
            device_port: AMINET_PORT,
            local_port: AMINET_PORT,
            socket_mode: SocketMode::default(),
            ack_policy: AckPolicy::default(),
        }
    }
}

impl TransportConfig {
    /// Configuration for a device at `host`, defaults everywhere else
    #[must_use]
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            ..Self::default()
        }
    }
}

/// UDP transport for one AMInet device
///
/// Failures degrade the reported link status to ERROR and are also returned,
/// so hosts that fire and forget can rely on the sink alone. Dropping the
/// transport tears the link down.
pub struct Transport {
    config: TransportConfig,
    session: Arc<Mutex<Session>>,
    sink: Arc<dyn StatusSink>,
    socket: Option<SocketBinding>,
    listener: Option<JoinHandle<()>>,
}

impl Transport {
    /// Create a closed transport; call [`Transport::open`] to bring the
    /// link up
    #[must_use]
    pub fn new(config: TransportConfig, sink: Arc<dyn StatusSink>) -> Self {
        let session = Arc::new(Mutex::new(Session::new(config.ack_policy)));
        Self {
            config,
            session,
            sink,
            socket: None,
            listener: None,
        }
    }

    /// Bring the link up per the current configuration
    ///
    /// Any previous socket and listener are torn down first. With no host
    /// configured the link stays closed and this returns Ok. In persistent
    /// mode the listening socket is bound and the reply listener started;
    /// ephemeral mode has nothing to set up. Success with a host configured
    /// reports link status OK, a failed bind reports ERROR.
    #[instrument(level = "info", skip(self), fields(host = self.config.host.as_deref()))]
    pub async fn open(&mut self) -> Result<()> {
        self.close().await;
        lock_session(&self.session).reconfigure(self.config.ack_policy);

        if self.config.host.is_none() {
            debug!("no host configured; link stays closed");
            return Ok(());
        }

        if self.config.socket_mode == SocketMode::Persistent {
            let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.config.local_port));
            let socket = match SocketBinding::bind(addr).await {
                Ok(socket) => socket,
                Err(source) => {
                    let err = TransportError::Bind { addr, source };
                    self.report_failure(&err);
                    return Err(err);
                }
            };
            debug!(local = ?socket.local_addr().ok(), "listening for replies");
            self.listener = Some(self.spawn_listener(socket.clone()));
            self.socket = Some(socket);
        }

        self.sink.report(LinkStatus::Ok);
        Ok(())
    }

    /// Swap in a new configuration and reopen the link
    pub async fn apply_config(&mut self, config: TransportConfig) -> Result<()> {
        self.config = config;
        self.open().await
    }

    /// Tear the link down: stop the reply listener, release the socket
    ///
    /// Returns once the listener has let go of its socket handle, so the
    /// local port can be rebound immediately. Safe to call when already
    /// closed. Dropping the transport aborts the listener without waiting.
    pub async fn close(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
            // The port stays held until the aborted task drops its socket
            // handle; a reopen on the same fixed port must not race that
            let _ = listener.await;
        }
        self.socket = None;
    }

    /// Encode `action` and dispatch the frame to the configured device
    ///
    /// This is the single dispatch entry point for all five action kinds.
    /// In persistent mode under the strict policy, ACK-expecting actions
    /// arm the session before the frame leaves, so a reply racing the
    /// return value is still matched.
    #[instrument(level = "debug", skip(self, action))]
    pub async fn send(&self, action: &Action) -> Result<()> {
        let Some(host) = self.config.host.clone() else {
            let err = TransportError::NoTarget;
            self.report_failure(&err);
            return Err(err);
        };

        let frame = protocol::encode(action);
        debug!(bytes = frame.len(), frame = %hex(&frame), "sending command frame");

        if self.config.socket_mode == SocketMode::Persistent {
            lock_session(&self.session).note_sent(action);
        }

        match self.dispatch(&host, &frame).await {
            Ok(()) => {
                if self.config.socket_mode == SocketMode::Ephemeral {
                    // No reply path in this mode; a completed send is the
                    // only health signal available
                    self.sink.report(LinkStatus::Ok);
                }
                Ok(())
            }
            Err(err) => {
                self.report_failure(&err);
                Err(err)
            }
        }
    }

    /// Local address of the persistent listening socket, if the link is open
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.as_ref().and_then(|s| s.local_addr().ok())
    }

    /// Current configuration
    #[must_use]
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    async fn dispatch(&self, host: &str, frame: &[u8]) -> Result<()> {
        let target = self.resolve(host).await?;

        let sent = match self.config.socket_mode {
            SocketMode::Persistent => {
                let socket = self.socket.as_ref().ok_or(TransportError::NotOpen)?;
                socket.send_to(frame, target).await
            }
            SocketMode::Ephemeral => {
                let local = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0));
                let socket =
                    SocketBinding::bind(local)
                        .await
                        .map_err(|source| TransportError::Bind {
                            addr: local,
                            source,
                        })?;
                // The binding drops at the end of this arm, closing the socket
                socket.send_to(frame, target).await
            }
        };

        sent.map_err(|source| TransportError::Send {
            host: host.to_owned(),
            source,
        })?;
        Ok(())
    }

    async fn resolve(&self, host: &str) -> Result<SocketAddr> {
        let mut addrs = lookup_host((host, self.config.device_port))
            .await
            .map_err(|source| TransportError::Resolve {
                host: host.to_owned(),
                source,
            })?;
        // Resolvers often list AAAA records first; the sockets here are
        // IPv4, so only an A record is usable
        addrs
            .find(SocketAddr::is_ipv4)
            .ok_or_else(|| TransportError::Resolve {
                host: host.to_owned(),
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    "host resolved to no IPv4 addresses",
                ),
            })
    }

    fn spawn_listener(&self, socket: SocketBinding) -> JoinHandle<()> {
        let session = Arc::clone(&self.session);
        let sink = Arc::clone(&self.sink);

        tokio::spawn(async move {
            let mut buf = vec![0u8; RECV_BUFFER_SIZE];
            loop {
                match socket.recv_from(&mut buf).await {
                    Ok((len, peer)) => {
                        let outcome = lock_session(&session).on_datagram(&buf[..len]);
                        apply_outcome(sink.as_ref(), peer, outcome);
                    }
                    Err(err) => {
                        // The listener stays up; UDP receive errors are
                        // transient and the next datagram may land fine
                        lock_session(&session).on_socket_error();
                        error!(error = %err, "receive failed; connection error");
                        sink.report(LinkStatus::Error);
                    }
                }
            }
        })
    }

    fn report_failure(&self, err: &TransportError) {
        lock_session(&self.session).on_socket_error();
        error!(error = %err, "connection error");
        self.sink.report(LinkStatus::Error);
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("config", &self.config)
            .field("open", &self.socket.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        // No executor to wait on here; the runtime reaps the aborted task
        // and drops its socket handle with it
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
    }
}

/// Act on one classified inbound datagram: log it and drive the status sink
fn apply_outcome(sink: &dyn StatusSink, peer: SocketAddr, outcome: ReplyOutcome) {
    match outcome {
        ReplyOutcome::Acknowledged => {
            debug!(%peer, "device acknowledged");
            sink.report(LinkStatus::Ok);
        }
        ReplyOutcome::Unexpected { detail } => {
            warn!(%peer, "received unexpected response: {detail}");
            sink.report(LinkStatus::Warning);
        }
        ReplyOutcome::UnsolicitedFault { detail } => {
            error!(%peer, "{detail}");
        }
        ReplyOutcome::Unsolicited { payload } => {
            info!(%peer, "received {}", String::from_utf8_lossy(&payload));
        }
    }
}

fn lock_session(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().expect("session mutex poisoned")
}

fn hex(frame: &[u8]) -> String {
    frame
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

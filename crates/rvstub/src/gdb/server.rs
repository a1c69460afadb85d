//! TCP listener producing one session per connection.

use std::net::{SocketAddr, TcpListener};
use std::time::Instant;

use rvstub_target::{BASE_ADDRESS, TargetState};
use thiserror::Error;
use tracing::info;

use super::session::{ChecksumPolicy, Session, SessionSummary};
use crate::metrics;

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// GDB server error.
#[derive(Debug, Error)]
pub enum GdbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

/// Listener configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// `host:port`, or `:port` for loopback.
    pub addr: String,
    /// Program counter each new session starts at.
    pub entry: u32,
    /// Checksum handling for every session.
    pub checksum: ChecksumPolicy,
    /// Sessions to serve before returning; `None` serves forever.
    pub max_sessions: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            entry: BASE_ADDRESS,
            checksum: ChecksumPolicy::Verify,
            max_sessions: Some(1),
        }
    }
}

impl ServerConfig {
    /// Set the listen address.
    #[must_use]
    pub fn with_addr(mut self, addr: impl Into<String>) -> Self {
        self.addr = addr.into();
        self
    }

    /// Set the initial program counter.
    #[must_use]
    pub const fn with_entry(mut self, entry: u32) -> Self {
        self.entry = entry;
        self
    }

    /// Set the checksum policy.
    #[must_use]
    pub const fn with_checksum_policy(mut self, policy: ChecksumPolicy) -> Self {
        self.checksum = policy;
        self
    }

    /// Keep accepting connections after each session ends.
    #[must_use]
    pub const fn keep_listening(mut self) -> Self {
        self.max_sessions = None;
        self
    }
}

/// RSP server. Serves one connection at a time.
pub struct GdbServer {
    listener: TcpListener,
    config: ServerConfig,
}

impl GdbServer {
    /// Bind the listener.
    ///
    /// # Errors
    ///
    /// Returns [`GdbError::Bind`] if the address cannot be bound.
    pub fn bind(config: ServerConfig) -> Result<Self, GdbError> {
        let addr = normalize_addr(&config.addr);
        let listener = TcpListener::bind(&addr).map_err(|source| GdbError::Bind {
            addr: addr.clone(),
            source,
        })?;
        info!(%addr, "waiting for GDB connection");
        Ok(Self { listener, config })
    }

    /// Address the listener is bound to.
    ///
    /// # Errors
    ///
    /// Returns [`GdbError::Io`] if the socket cannot report its address.
    pub fn local_addr(&self) -> Result<SocketAddr, GdbError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve sessions until `max_sessions` is reached.
    ///
    /// # Errors
    ///
    /// Stops at the first accept or transport failure.
    pub fn run(&self) -> Result<(), GdbError> {
        let mut served = 0usize;
        while self.config.max_sessions.is_none_or(|max| served < max) {
            self.serve_one()?;
            served += 1;
        }
        Ok(())
    }

    /// Accept one connection and serve it until the peer disconnects.
    ///
    /// # Errors
    ///
    /// Returns [`GdbError::Io`] on accept or transport failure.
    pub fn serve_one(&self) -> Result<SessionSummary, GdbError> {
        let (stream, peer) = self.listener.accept()?;
        info!(%peer, "GDB connected");

        let start = Instant::now();
        let target = TargetState::with_entry(self.config.entry);
        let summary = Session::new(stream, target)
            .with_checksum_policy(self.config.checksum)
            .run()?;
        metrics::record_session(start.elapsed().as_secs_f64());

        info!(
            %peer,
            packets = summary.packets,
            steps = summary.steps,
            rejected = summary.checksum_rejects,
            pc = %format_args!("{:#010x}", summary.final_pc),
            "GDB session ended"
        );
        Ok(summary)
    }
}

/// Expand `:port` to a loopback address.
fn normalize_addr(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("127.0.0.1{addr}")
    } else {
        addr.to_string()
    }
}

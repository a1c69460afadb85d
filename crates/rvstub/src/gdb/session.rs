//! One debugger connection, served end to end.

use std::io::{ErrorKind, Read, Write};

use rvstub_proto::{ACK, Command, NACK, Packet, decode, is_ack_only};
use rvstub_target::TargetState;
use tracing::{debug, warn};

use super::dispatch::{Response, dispatch};
use super::server::GdbError;
use crate::metrics;

/// Bytes requested from the connection per read.
pub const CHUNK_SIZE: usize = 1024;

/// What to do with a packet whose checksum does not match its payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChecksumPolicy {
    /// Reply `-` and drop the packet.
    #[default]
    Verify,
    /// Accept the packet as if the checksum matched.
    Ignore,
}

/// Counters for a finished session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Packets acknowledged and dispatched.
    pub packets: u64,
    /// Single-steps performed.
    pub steps: u64,
    /// Packets answered with `-`.
    pub checksum_rejects: u64,
    /// Chunks that did not contain a decodable packet.
    pub malformed: u64,
    /// Program counter when the peer disconnected.
    pub final_pc: u32,
}

/// RSP session over a byte stream.
///
/// Each read is treated as one message. The session owns its
/// [`TargetState`]; state never outlives the connection.
pub struct Session<C> {
    conn: C,
    target: TargetState,
    policy: ChecksumPolicy,
    summary: SessionSummary,
}

impl<C: Read + Write> Session<C> {
    /// Create a session over `conn` serving `target`.
    #[must_use]
    pub fn new(conn: C, target: TargetState) -> Self {
        Self {
            conn,
            target,
            policy: ChecksumPolicy::default(),
            summary: SessionSummary::default(),
        }
    }

    /// Set the checksum policy.
    #[must_use]
    pub fn with_checksum_policy(mut self, policy: ChecksumPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The target being served.
    #[must_use]
    pub const fn target(&self) -> &TargetState {
        &self.target
    }

    /// Serve until the peer closes the connection.
    ///
    /// # Errors
    ///
    /// Returns [`GdbError::Io`] if reading or writing the connection fails.
    pub fn run(mut self) -> Result<SessionSummary, GdbError> {
        let mut buf = [0u8; CHUNK_SIZE];
        loop {
            let n = match self.conn.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            self.handle_chunk(&buf[..n])?;
        }

        self.summary.steps = self.target.step_count();
        self.summary.final_pc = self.target.current_address();
        Ok(self.summary)
    }

    fn handle_chunk(&mut self, chunk: &[u8]) -> Result<(), GdbError> {
        debug!(bytes = %chunk.escape_ascii(), "received");

        if is_ack_only(chunk) {
            return Ok(());
        }

        let packet = match decode(chunk) {
            Ok(packet) => packet,
            Err(e) => {
                warn!(error = %e, "malformed packet");
                metrics::record_malformed();
                self.summary.malformed += 1;
                self.send(&[ACK])?;
                return self.send(&Response::Empty.encode());
            }
        };

        if !self.accept(&packet) {
            metrics::record_checksum_mismatch();
            self.summary.checksum_rejects += 1;
            return self.send(&[NACK]);
        }

        self.send(&[ACK])?;

        let command = Command::parse(&packet.payload);
        if let Command::Unknown(payload) = &command {
            debug!(%payload, "unsupported command");
        }
        metrics::record_packet(command.name());
        self.summary.packets += 1;

        let response = dispatch(&command, &mut self.target);
        if command == Command::Step {
            metrics::record_step();
        }
        self.send(&response.encode())
    }

    fn accept(&self, packet: &Packet) -> bool {
        match (self.policy, packet.verify()) {
            (_, Ok(())) => true,
            (ChecksumPolicy::Verify, Err(e)) => {
                warn!(error = %e, payload = %packet.payload, "rejecting packet");
                false
            }
            (ChecksumPolicy::Ignore, Err(e)) => {
                debug!(error = %e, "ignoring checksum");
                true
            }
        }
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), GdbError> {
        debug!(bytes = %bytes.escape_ascii(), "sent");
        self.conn.write_all(bytes)?;
        self.conn.flush()?;
        Ok(())
    }
}

//! Command dispatch.

use std::borrow::Cow;

use gdbstub::common::Signal;
use rvstub_proto::{Command, encode};
use rvstub_target::{TargetState, target_xml};

/// Reply to `qSupported`.
pub const SUPPORTED_FEATURES: &str = "PacketSize=120";

/// Reply to a command, before framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `S<xx>` stop reply.
    StopReply(Signal),
    /// Feature string for `qSupported`.
    Supported,
    /// Hex register dump.
    Registers(String),
    /// The target description document.
    TargetXml,
    /// Empty payload (`$#00`), also used for unsupported commands.
    Empty,
}

impl Response {
    /// Payload text between `$` and `#`.
    #[must_use]
    pub fn payload(&self) -> Cow<'_, str> {
        match self {
            Self::StopReply(signal) => Cow::Owned(format!("S{:02x}", signal.0)),
            Self::Supported => Cow::Borrowed(SUPPORTED_FEATURES),
            Self::Registers(dump) => Cow::Borrowed(dump),
            Self::TargetXml => Cow::Borrowed(target_xml()),
            Self::Empty => Cow::Borrowed(""),
        }
    }

    /// Framed bytes ready for the wire.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        encode(&self.payload())
    }
}

/// Answer `command` against `target`.
///
/// Only [`Command::Step`] changes the target.
pub fn dispatch(command: &Command, target: &mut TargetState) -> Response {
    match command {
        Command::HaltReason => Response::StopReply(Signal::SIGTRAP),
        Command::QuerySupported { .. } => Response::Supported,
        Command::ReadRegisters => Response::Registers(target.dump_registers()),
        Command::ReadTargetXml => Response::TargetXml,
        Command::VContQuery | Command::Unknown(_) => Response::Empty,
        Command::Step => {
            target.advance();
            Response::StopReply(Signal::SIGTRAP)
        }
    }
}

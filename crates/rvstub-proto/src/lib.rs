//! GDB Remote Serial Protocol (RSP) wire layer.
//!
//! Packets travel as `$<payload>#<xx>` where `xx` is the modulo-256 byte sum
//! of the payload in lowercase hex. Acknowledgment tokens (`+`/`-`) are sent
//! outside the framing.
//!
//! ```
//! use rvstub_proto::{Command, decode, encode};
//!
//! let frame = encode("S05");
//! assert_eq!(frame, b"$S05#b8");
//!
//! let packet = decode(b"$?#3f").unwrap();
//! assert_eq!(Command::parse(&packet.payload), Command::HaltReason);
//! ```

mod command;
mod error;
mod packet;

pub use command::Command;
pub use error::PacketError;
pub use packet::{ACK, NACK, Packet, checksum, decode, encode, is_ack_only};

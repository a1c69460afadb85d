//! rvstub - minimal GDB remote stub for a simulated RV32 target.
//!
//! Speaks enough of the Remote Serial Protocol for a debugger to attach,
//! fetch the target description, read registers and single-step. The
//! target never executes anything; stepping only moves the program counter.
//!
//! # Example
//!
//! ```no_run
//! use rvstub::gdb::{GdbServer, ServerConfig};
//!
//! let server = GdbServer::bind(ServerConfig::default())?;
//! server.run()?; // Blocks until the debugger disconnects
//! # Ok::<(), rvstub::gdb::GdbError>(())
//! ```

pub mod gdb;
pub mod metrics;

// Re-export from sub-crates
pub use rvstub_proto::{Command, Packet, PacketError, checksum, decode, encode};
pub use rvstub_target::{BASE_ADDRESS, TargetState, target_xml};

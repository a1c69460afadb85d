//! GDB Remote Serial Protocol stub.
//!
//! # Usage
//!
//! ```ignore
//! use rvstub::gdb::{GdbServer, ServerConfig};
//!
//! let server = GdbServer::bind(ServerConfig::default().with_addr(":1234"))?;
//! server.run()?;  // Blocks until GDB disconnects
//! ```
//!
//! A [`Session`] can also be driven over any `Read + Write` connection.

mod dispatch;
mod server;
mod session;

pub use dispatch::{Response, SUPPORTED_FEATURES, dispatch};
pub use server::{DEFAULT_ADDR, GdbError, GdbServer, ServerConfig};
pub use session::{CHUNK_SIZE, ChecksumPolicy, Session, SessionSummary};

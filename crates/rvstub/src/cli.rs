//! CLI definitions and argument types.

use clap::{Parser, Subcommand, ValueEnum};
use rvstub::gdb::{ChecksumPolicy, DEFAULT_ADDR};

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "rvstub")]
#[command(about = "Minimal GDB remote stub for a simulated RV32 target")]
#[command(version)]
pub struct Cli {
    /// Show metrics summary after execution
    #[arg(long, global = true)]
    pub metrics: bool,

    /// Enable verbose output, including every packet sent and received
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether styled status lines go to the terminal.
    #[must_use]
    pub const fn show_status(&self) -> bool {
        !self.silent
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Wait for a debugger and serve the RSP stub
    Serve {
        /// Listen address (e.g., :3000 or 127.0.0.1:3000)
        #[arg(long, default_value = DEFAULT_ADDR)]
        addr: String,

        /// Initial program counter (hex)
        #[arg(long, value_parser = parse_hex_u32, default_value = "0x24")]
        entry: u32,

        /// Handling of packets whose checksum does not match
        #[arg(long, value_enum, default_value = "verify")]
        checksum: ChecksumArg,

        /// Keep accepting connections after the first session ends
        #[arg(long)]
        keep_listening: bool,
    },
    /// Print the target description XML
    Describe,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ChecksumArg {
    /// Reply '-' and drop the packet
    Verify,
    /// Accept the packet anyway
    Ignore,
}

impl From<ChecksumArg> for ChecksumPolicy {
    fn from(arg: ChecksumArg) -> Self {
        match arg {
            ChecksumArg::Verify => Self::Verify,
            ChecksumArg::Ignore => Self::Ignore,
        }
    }
}

/// Parse a hex address (with or without 0x prefix).
pub fn parse_hex_u32(arg: &str) -> Result<u32, String> {
    let s = arg.trim().trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(s, 16).map_err(|e| format!("invalid hex address {arg:?}: {e}"))
}

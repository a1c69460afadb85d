//! Serve command.

use rvstub::gdb::{ChecksumPolicy, GdbServer, ServerConfig};
use tracing::error;

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::terminal;

/// Handle the `serve` command.
pub fn cmd_serve(
    addr: &str,
    entry: u32,
    checksum: ChecksumPolicy,
    keep_listening: bool,
    show_status: bool,
) -> i32 {
    let mut config = ServerConfig::default()
        .with_addr(addr)
        .with_entry(entry)
        .with_checksum_policy(checksum);
    if keep_listening {
        config = config.keep_listening();
    }

    let server = match GdbServer::bind(config) {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "failed to start GDB server");
            return EXIT_FAILURE;
        }
    };

    if show_status {
        if let Ok(local) = server.local_addr() {
            terminal::info(&format!("Waiting for GDB connection on {local}"));
            terminal::dim(&format!("(gdb) target remote {local}"));
        }
    }

    match server.run() {
        Ok(()) => {
            if show_status {
                terminal::success("Debugger disconnected");
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            error!(error = %e, "GDB server error");
            EXIT_FAILURE
        }
    }
}

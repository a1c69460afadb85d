//! Command implementations.

mod serve;

use crate::cli::{Cli, Commands, EXIT_SUCCESS};

/// Dispatch CLI command to the appropriate handler.
pub fn run_command(cli: &Cli) -> i32 {
    match &cli.command {
        Commands::Serve {
            addr,
            entry,
            checksum,
            keep_listening,
        } => serve::cmd_serve(
            addr,
            *entry,
            (*checksum).into(),
            *keep_listening,
            cli.show_status(),
        ),
        Commands::Describe => {
            print!("{}", rvstub::target_xml());
            EXIT_SUCCESS
        }
    }
}

//! rvstub CLI - GDB remote stub for a simulated RV32 target

mod cli;
mod commands;
mod terminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize metrics recorder if enabled
    let metrics_handle = if cli.metrics {
        rvstub::metrics::CliRecorder::new().install()
    } else {
        None
    };
    rvstub::metrics::init();

    // RUST_LOG wins over the verbosity flags
    let default_level = if cli.verbose {
        "rvstub=debug"
    } else if cli.silent {
        "rvstub=error"
    } else {
        "rvstub=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = commands::run_command(&cli);

    if let Some(handle) = metrics_handle {
        handle.print_summary();
    }

    std::process::exit(exit_code);
}

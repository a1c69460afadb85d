//! Styled status lines for the CLI.

use console::style;

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", style("→").cyan(), message);
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

/// Print a dimmed, indented message to stderr.
pub fn dim(message: &str) {
    eprintln!("  {}", style(message).dim());
}

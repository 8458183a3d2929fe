//! Terminal output helpers for messages printed outside the event stream.
//!
//! Colors follow `console`'s detection, which honors NO_COLOR.

use console::style;

/// Print an error message to stderr (red).
///
/// Example: `✗ invalid config: store.region must not be empty`
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red(), msg);
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ check SECRETRUN_CONFIG`
pub fn hint(msg: &str) {
    eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
}

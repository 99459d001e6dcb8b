//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.
//! Only diagnostics live here; the document itself is never colored.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print error with its source chain, one cause per line
pub fn error_chain(err: &(dyn std::error::Error + 'static)) {
    error(err);
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  {}: {}", "caused by".yellow(), cause);
        source = cause.source();
    }
}

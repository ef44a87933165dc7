//! Tracing subscriber setup.
//!
//! The interactive reader owns the terminal, so it may only log to a file. The one-shot
//! subcommands log to stderr.

use crate::error::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log records should go.
pub enum LogTarget<'a> {
    /// Standard error, for subcommands that print to stdout.
    Stderr,
    /// Append to the file at this path; an empty path disables logging.
    File(&'a str),
}

fn filter(verbose: bool, quiet: bool) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    }
}

/// Initialise tracing-based logging.
///
/// Uses `RUST_LOG` if set, otherwise defaults based on verbosity flags.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init(target: &LogTarget<'_>, verbose: bool, quiet: bool) -> Result<()> {
    let filter = filter(verbose, quiet);
    match target {
        LogTarget::Stderr => {
            // Ignore error if a subscriber is already set (e.g. in tests).
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogTarget::File(path) if path.is_empty() => {}
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }
    Ok(())
}

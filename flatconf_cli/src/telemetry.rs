//! Installation of the `tracing` subscriber.
//!
//! Logs go to stderr so they never interleave with JSON on stdout.

use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};

/// Install a formatting subscriber filtered by `RUST_LOG`, or by
/// `default_filter` when `RUST_LOG` is unset or invalid.
///
/// # Errors
///
/// Returns [`CliError::Logging`] when `default_filter` cannot be parsed or a
/// global subscriber is already installed.
pub fn init(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|err| CliError::Logging(err.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

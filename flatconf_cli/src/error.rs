//! Error types for the `flatconf` binary.
//!
//! Library failures arrive as shared [`FlatconfError`] values; everything the
//! binary adds on top (settings, file access, output) is described here so
//! `main` can hand a single error type to `color-eyre`.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use flatconf::FlatconfError;
use thiserror::Error;

/// Errors raised by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// A document could not be decoded, merged, or aggregated.
    #[error(transparent)]
    Flatconf(#[from] Arc<FlatconfError>),
    /// Layered settings failed to deserialise.
    #[error("failed to load settings: {0}")]
    Configuration(#[from] Box<figment::Error>),
    /// An explicitly requested settings file does not exist.
    #[error("configuration file {0} does not exist")]
    MissingConfig(Utf8PathBuf),
    /// A file named on the command line could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A readable source file held content that could not be decoded.
    #[error("invalid source {path}: {source}")]
    Source {
        /// File that was decoded.
        path: Utf8PathBuf,
        /// Decoding failure reported by the library.
        #[source]
        source: Arc<FlatconfError>,
    },
    /// Writing the result failed.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
    /// The result could not be rendered as JSON.
    #[error("failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),
    /// Command-line parsing failed.
    #[error(transparent)]
    CliParsing(#[from] Box<clap::Error>),
    /// The tracing subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl From<figment::Error> for CliError {
    fn from(error: figment::Error) -> Self {
        Self::Configuration(Box::new(error))
    }
}

impl From<clap::Error> for CliError {
    fn from(error: clap::Error) -> Self {
        Self::CliParsing(Box::new(error))
    }
}

/// Result alias used across the binary.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

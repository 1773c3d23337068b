//! Primary error enum for decoding and aggregation flows.

use thiserror::Error;

use super::aggregate::AggregatedErrors;

/// Why a flat key was rejected by the path parser.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum MalformedReason {
    /// The key, or one of its dot-delimited segments, is empty.
    EmptySegment,
    /// The text after the array marker `-` is not a decimal index.
    NonNumericIndex,
    /// The index does not fit in `usize`, or exceeds the bound configured
    /// through [`crate::pipeline::PipelineOptions::max_index`].
    IndexOverflow,
    /// An array segment has no name before the `-`.
    MissingName,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::EmptySegment => "empty segment",
            Self::NonNumericIndex => "array index is not a non-negative decimal number",
            Self::IndexOverflow => "array index is out of range",
            Self::MissingName => "array segment has no name",
        };
        f.write_str(text)
    }
}

/// Errors that can occur while decoding, merging, or aggregating documents.
///
/// Shape conflicts are deliberately absent: overwrite (when building) and
/// overlay-wins (when merging) resolve them without failing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlatconfError {
    /// A flat key could not be parsed into path segments.
    #[error("malformed key '{key}' at segment '{segment}': {reason}")]
    MalformedPath {
        /// Full flat key that failed to parse.
        key: String,
        /// Offending dot-delimited segment.
        segment: String,
        /// Classification of the failure.
        reason: MalformedReason,
    },

    /// A configuration source could not be obtained.
    #[error("source '{source_name}' is unavailable: {reason}")]
    SourceUnavailable {
        /// Label of the source that failed.
        source_name: String,
        /// Human-readable explanation from the collaborator that failed.
        reason: String,
    },

    /// A stored value is not valid UTF-8 and cannot be decoded without loss.
    #[error("value for key '{key}' is not valid UTF-8")]
    InvalidEncoding {
        /// Flat key whose value was rejected.
        key: String,
    },

    /// A JSON value could not be used as a document root.
    #[error("document root must be an object, found {found}")]
    InvalidDocument {
        /// JSON type found at the root.
        found: &'static str,
    },

    /// JSON text could not be parsed.
    #[error("invalid JSON: {source}")]
    Json {
        /// Underlying parser failure.
        #[source]
        source: Box<serde_json::Error>,
    },

    /// Multiple errors occurred while decoding sources.
    #[error("multiple decoding errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}

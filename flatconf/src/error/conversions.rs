//! Trait-based conversions between external error types and `FlatconfError`.

use super::{AggregatedErrors, FlatconfError};

/// Convert JSON parsing failures into [`FlatconfError::Json`].
impl From<serde_json::Error> for FlatconfError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json {
            source: Box::new(e),
        }
    }
}

/// Wrap a batch of failures as [`FlatconfError::Aggregate`].
impl From<AggregatedErrors> for FlatconfError {
    fn from(errors: AggregatedErrors) -> Self {
        Self::Aggregate(Box::new(errors))
    }
}

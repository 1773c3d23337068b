//! Error types produced by the codec, merge engine, and aggregation pipeline.

mod aggregate;
mod constructors;
mod conversions;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::{FlatconfError, MalformedReason};

//! Aggregation of configuration sources into one canonical document.
//!
//! Callers fetch their sources, push them into a [`SourceComposer`] from
//! lowest to highest precedence, and hand the layers to an
//! [`AggregationPipeline`]. The resulting [`Aggregation`] carries the merged
//! document (propagated as a context object) and its flattened record
//! (persisted by the caller).
//!
//! Sources that could not be fetched are pushed as unavailable layers; they
//! are logged and treated as empty rather than aborting the aggregation.
//!
//! # Example
//!
//! ```rust
//! use flatconf::pipeline::{
//!     AggregationPipeline, PipelineOptions, SourceComposer, SourceProvenance,
//! };
//! use flatconf::{Document, FlatconfError, FlatRecord};
//! use serde_json::json;
//!
//! let mut composer = SourceComposer::new();
//! composer.push_tree(
//!     SourceProvenance::Context,
//!     "context",
//!     Document::from_json(json!({"region": "eu-west-1"}))?,
//! );
//! composer.push_unavailable(
//!     SourceProvenance::NamedSecret,
//!     "shared-secret",
//!     FlatconfError::source_unavailable_arc("shared-secret", "not found"),
//! );
//! composer.push_record(
//!     SourceProvenance::StoredSecret,
//!     "stored",
//!     [("tags-0", "prod")].into_iter().collect::<FlatRecord>(),
//! );
//!
//! let pipeline = AggregationPipeline::new(PipelineOptions::default());
//! let aggregation = pipeline.aggregate(composer)?;
//! assert_eq!(
//!     aggregation.context_value(None),
//!     json!({"region": "eu-west-1", "tags": ["prod"]})
//! );
//! assert_eq!(aggregation.unavailable().len(), 1);
//! # Ok::<_, std::sync::Arc<FlatconfError>>(())
//! ```

mod aggregate;
mod composer;
mod layer;
mod options;
pub mod sources;
mod stamp;

pub use aggregate::{Aggregation, AggregationPipeline};
pub use composer::SourceComposer;
pub use layer::{SourceContent, SourceLayer, SourceProvenance};
pub use options::PipelineOptions;
pub use stamp::ContextStamp;

//! Core crate for the `flatconf` configuration codec.
//!
//! Configuration is exchanged in two shapes: a nested [`Document`] that is
//! propagated between stages, and a [`FlatRecord`] of dotted keys that is
//! persisted. This crate converts between the two and merges documents from
//! several sources with explicit precedence.
//!
//! - [`path`] parses flat keys such as `spec.ports-0.name`.
//! - [`build`] decodes flat entries into a document.
//! - [`flatten`](mod@flatten) encodes a document as flat entries.
//! - [`merge`](mod@merge) deep-merges documents, right-hand side winning.
//! - [`prune`](mod@prune) strips nulls from desired-state JSON.
//! - [`pipeline`] folds ordered sources into one document and record.
//!
//! ```rust
//! use flatconf::{Document, build::build_tree, path::KeyGrammar};
//! use serde_json::json;
//!
//! let doc = build_tree([("tags-0.k", "v"), ("tags-1", "x")], KeyGrammar::Strict)?;
//! assert_eq!(doc.to_json(), json!({"tags": [{"k": "v"}, "x"]}));
//! assert_eq!(build_tree(doc.flatten(), KeyGrammar::Strict)?, doc);
//! # Ok::<_, std::sync::Arc<flatconf::FlatconfError>>(())
//! ```

pub mod build;
mod error;
pub mod flatten;
pub mod merge;
mod node;
pub mod path;
pub mod pipeline;
pub mod prune;
mod record;
mod result_ext;

pub use error::{AggregatedErrors, FlatconfError, MalformedReason};
pub use node::{Document, Node, Object};
pub use record::FlatRecord;
pub use result_ext::FlatconfResultExt;

/// Result type alias used throughout the crate.
///
/// Errors are shared so they can be collected into aggregates and carried by
/// unavailable source layers without cloning.
pub type FlatconfResult<T> = std::result::Result<T, std::sync::Arc<FlatconfError>>;

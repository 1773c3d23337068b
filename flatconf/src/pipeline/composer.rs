//! Builder that collects source layers in precedence order.

use std::sync::Arc;

use crate::{Document, FlatRecord, FlatconfError};

use super::{SourceLayer, SourceProvenance};

/// Builder that accumulates [`SourceLayer`] instances.
///
/// Layers are kept in push order, lowest precedence first. Each call site
/// decides its own ordering; nothing here reorders by provenance.
///
/// ```rust
/// use flatconf::pipeline::{AggregationPipeline, SourceComposer, SourceProvenance};
/// use flatconf::{Document, FlatRecord};
/// use serde_json::json;
///
/// let mut composer = SourceComposer::new();
/// composer.push_tree(
///     SourceProvenance::Context,
///     "context",
///     Document::from_json(json!({"db": {"host": "a", "port": "5432"}}))?,
/// );
/// composer.push_record(
///     SourceProvenance::StoredSecret,
///     "stored",
///     [("db.host", "b")].into_iter().collect::<FlatRecord>(),
/// );
///
/// let aggregation = AggregationPipeline::default().aggregate(composer)?;
/// assert_eq!(aggregation.record().get("db.host"), Some("b"));
/// assert_eq!(aggregation.record().get("db.port"), Some("5432"));
/// # Ok::<_, std::sync::Arc<flatconf::FlatconfError>>(())
/// ```
#[derive(Debug, Default)]
pub struct SourceComposer {
    layers: Vec<SourceLayer>,
}

impl SourceComposer {
    /// Create an empty composer.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Create a composer with preallocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            layers: Vec::with_capacity(capacity),
        }
    }

    /// Push a decoded document.
    pub fn push_tree(
        &mut self,
        provenance: SourceProvenance,
        label: impl Into<String>,
        document: Document,
    ) {
        self.push_layer(SourceLayer::tree(provenance, label, document));
    }

    /// Push a flat record.
    pub fn push_record(
        &mut self,
        provenance: SourceProvenance,
        label: impl Into<String>,
        record: FlatRecord,
    ) {
        self.push_layer(SourceLayer::record(provenance, label, record));
    }

    /// Record that a source could not be obtained.
    pub fn push_unavailable(
        &mut self,
        provenance: SourceProvenance,
        label: impl Into<String>,
        error: Arc<FlatconfError>,
    ) {
        self.push_layer(SourceLayer::unavailable(provenance, label, error));
    }

    /// Push an arbitrary layer.
    pub fn push_layer(&mut self, layer: SourceLayer) {
        self.layers.push(layer);
    }

    /// Number of layers pushed so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether no layers have been pushed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Consume the composer and return the accumulated layers.
    #[must_use]
    pub fn layers(self) -> Vec<SourceLayer> {
        self.layers
    }
}

impl IntoIterator for SourceComposer {
    type Item = SourceLayer;
    type IntoIter = std::vec::IntoIter<SourceLayer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.into_iter()
    }
}

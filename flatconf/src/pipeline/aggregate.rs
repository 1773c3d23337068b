//! Folding ordered source layers into one canonical document.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::build::build_tree_bounded;
use crate::flatten::flatten;
use crate::merge::merge;
use crate::{Document, FlatRecord, FlatconfError, FlatconfResult};

use super::{ContextStamp, PipelineOptions, SourceContent, SourceLayer};

/// Pure aggregation of configuration sources.
///
/// The pipeline decodes each layer, merges them left to right (later layers
/// take precedence), and flattens the result. It performs no I/O: callers
/// fetch sources beforehand and persist the record afterwards.
#[derive(Clone, Debug, Default)]
pub struct AggregationPipeline {
    options: PipelineOptions,
}

impl AggregationPipeline {
    /// Create a pipeline with `options`.
    #[must_use]
    pub const fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Returns the options this pipeline was built with.
    #[must_use]
    pub const fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Decode a single layer into a document.
    ///
    /// Unavailable sources decode to an empty document.
    ///
    /// # Errors
    ///
    /// Returns [`FlatconfError::MalformedPath`] (or an aggregate of them) when
    /// a flat record holds keys the configured grammar or index bound rejects.
    pub fn decode(&self, layer: &SourceLayer) -> FlatconfResult<Document> {
        match layer.content() {
            SourceContent::Tree(document) => Ok(document.clone()),
            SourceContent::Record(record) => {
                build_tree_bounded(record.iter(), self.options.grammar, self.options.max_index)
            }
            SourceContent::Unavailable(_) => Ok(Document::new()),
        }
    }

    /// Merge `layers`, lowest precedence first.
    ///
    /// Every layer is decoded before anything is merged. If any layer fails to
    /// decode, all failures are returned together and no output is produced.
    ///
    /// # Errors
    ///
    /// Returns the decode failure of a single layer as-is, or
    /// [`FlatconfError::Aggregate`] when several layers fail.
    pub fn aggregate<I>(&self, layers: I) -> FlatconfResult<Aggregation>
    where
        I: IntoIterator<Item = SourceLayer>,
    {
        let mut documents = Vec::new();
        let mut unavailable = Vec::new();
        let mut errors: Vec<Arc<FlatconfError>> = Vec::new();
        for layer in layers {
            if let SourceContent::Unavailable(err) = layer.content() {
                warn!(
                    provenance = %layer.provenance(),
                    label = layer.label(),
                    error = %err,
                    "source unavailable; treating it as empty"
                );
                unavailable.push(Arc::clone(err));
                continue;
            }
            match self.decode(&layer) {
                Ok(document) => {
                    debug!(
                        provenance = %layer.provenance(),
                        label = layer.label(),
                        keys = document.len(),
                        "decoded source layer"
                    );
                    documents.push(document);
                }
                Err(err) => errors.push(err),
            }
        }
        if let Some(err) = FlatconfError::try_aggregate(errors) {
            return Err(Arc::new(err));
        }
        let document = documents.into_iter().fold(Document::new(), merge);
        let record = flatten(&document);
        debug!(entries = record.len(), "aggregated sources");
        Ok(Aggregation {
            document,
            record,
            unavailable,
        })
    }
}

/// Output of [`AggregationPipeline::aggregate`].
#[derive(Clone, Debug)]
pub struct Aggregation {
    document: Document,
    record: FlatRecord,
    unavailable: Vec<Arc<FlatconfError>>,
}

impl Aggregation {
    /// The canonical merged document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// The flattened form of [`document`](Self::document), ready to persist.
    #[must_use]
    pub const fn record(&self) -> &FlatRecord {
        &self.record
    }

    /// Errors of the sources that were skipped because they were unavailable.
    #[must_use]
    pub fn unavailable(&self) -> &[Arc<FlatconfError>] {
        &self.unavailable
    }

    /// Render the document as a context object for downstream stages.
    ///
    /// With a `stamp`, untyped contexts receive `apiVersion` and `kind`.
    #[must_use]
    pub fn context_value(&self, stamp: Option<&ContextStamp>) -> Value {
        let context = self.document.to_json();
        match stamp {
            Some(metadata) => metadata.apply(context),
            None => context,
        }
    }

    /// Decompose into the document and the record.
    #[must_use]
    pub fn into_parts(self) -> (Document, FlatRecord) {
        (self.document, self.record)
    }
}

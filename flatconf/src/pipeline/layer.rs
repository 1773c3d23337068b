//! Source layers and their provenance.

use std::fmt;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};

use crate::{Document, FlatRecord, FlatconfError};

/// Where a source layer came from.
///
/// Provenance is descriptive only: precedence is decided by the order in
/// which layers are supplied, never by their provenance.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum SourceProvenance {
    /// Context object propagated from an earlier stage.
    Context,
    /// Statuses observed on managed resources.
    ResourceStatus,
    /// Values resolved from dependency-linked secrets.
    Dependency,
    /// Values read from an explicitly named secret.
    NamedSecret,
    /// The document's own previously stored record.
    StoredSecret,
    /// Any other caller-defined source.
    Custom,
}

impl SourceProvenance {
    /// Every provenance, in the order most call sites apply them.
    pub const ALL: [Self; 6] = [
        Self::Context,
        Self::ResourceStatus,
        Self::Dependency,
        Self::NamedSecret,
        Self::StoredSecret,
        Self::Custom,
    ];

    /// Stable kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::ResourceStatus => "resource-status",
            Self::Dependency => "dependency",
            Self::NamedSecret => "named-secret",
            Self::StoredSecret => "stored-secret",
            Self::Custom => "custom",
        }
    }

    /// Look up a provenance by its [`as_str`](Self::as_str) name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

impl fmt::Display for SourceProvenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload carried by a source layer.
#[derive(Clone, Debug)]
pub enum SourceContent {
    /// An already-decoded document.
    Tree(Document),
    /// A flat record still to be decoded.
    Record(FlatRecord),
    /// The source could not be obtained; it contributes nothing.
    Unavailable(Arc<FlatconfError>),
}

/// Representation of one configuration source.
#[derive(Clone, Debug)]
pub struct SourceLayer {
    provenance: SourceProvenance,
    label: String,
    content: SourceContent,
    path: Option<Utf8PathBuf>,
}

impl SourceLayer {
    /// Construct a layer from a decoded document.
    #[must_use]
    pub fn tree(provenance: SourceProvenance, label: impl Into<String>, document: Document) -> Self {
        Self::new(provenance, label, SourceContent::Tree(document))
    }

    /// Construct a layer from a flat record.
    #[must_use]
    pub fn record(provenance: SourceProvenance, label: impl Into<String>, record: FlatRecord) -> Self {
        Self::new(provenance, label, SourceContent::Record(record))
    }

    /// Construct a placeholder for a source that could not be obtained.
    #[must_use]
    pub fn unavailable(
        provenance: SourceProvenance,
        label: impl Into<String>,
        error: Arc<FlatconfError>,
    ) -> Self {
        Self::new(provenance, label, SourceContent::Unavailable(error))
    }

    fn new(provenance: SourceProvenance, label: impl Into<String>, content: SourceContent) -> Self {
        Self {
            provenance,
            label: label.into(),
            content,
            path: None,
        }
    }

    /// Attach the file the layer was read from.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Returns the provenance of the layer.
    #[must_use]
    pub const fn provenance(&self) -> SourceProvenance {
        self.provenance
    }

    /// Returns the caller-supplied label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the associated path if this layer was read from a file.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// Borrow the layer's payload.
    #[must_use]
    pub const fn content(&self) -> &SourceContent {
        &self.content
    }

    /// Whether the source was obtained.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        !matches!(self.content, SourceContent::Unavailable(_))
    }

    /// Consume the layer and return its payload.
    #[must_use]
    pub fn into_content(self) -> SourceContent {
        self.content
    }
}

//! The document tree model shared by every codec stage.
//!
//! A [`Node`] is a closed union of scalar strings, objects, and dense arrays.
//! A [`Document`] is a node that is guaranteed to be an object at the root.

mod convert;

use std::collections::BTreeMap;

use serde::Serialize;

/// Children of an object node, keyed by name.
pub type Object = BTreeMap<String, Node>;

/// A value in a configuration document.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// A leaf value. Every persisted value is a string.
    Scalar(String),
    /// A mapping from unique keys to child nodes.
    Object(Object),
    /// An ordered, dense sequence of child nodes.
    Array(Vec<Node>),
}

impl Node {
    /// An object node with no children.
    #[must_use]
    pub const fn empty_object() -> Self {
        Self::Object(BTreeMap::new())
    }

    /// Borrow the scalar text, if this is a scalar.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value.as_str()),
            Self::Object(_) | Self::Array(_) => None,
        }
    }

    /// Borrow the children, if this is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(children) => Some(children),
            Self::Scalar(_) | Self::Array(_) => None,
        }
    }

    /// Borrow the elements, if this is an array.
    #[must_use]
    pub const fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(elements) => Some(elements.as_slice()),
            Self::Scalar(_) | Self::Object(_) => None,
        }
    }

    /// Whether this is an object or array with no children.
    #[must_use]
    pub fn is_empty_container(&self) -> bool {
        match self {
            Self::Scalar(_) => false,
            Self::Object(children) => children.is_empty(),
            Self::Array(elements) => elements.is_empty(),
        }
    }

    /// Short name of the node's shape, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_owned())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

/// A configuration document: an object at the root.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document(Object);

impl Document {
    /// An empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Wrap an existing object as a document.
    #[must_use]
    pub const fn from_object(root: Object) -> Self {
        Self(root)
    }

    /// Borrow the root object.
    #[must_use]
    pub const fn as_object(&self) -> &Object {
        &self.0
    }

    /// Mutably borrow the root object.
    pub const fn as_object_mut(&mut self) -> &mut Object {
        &mut self.0
    }

    /// Consume the document and return the root object.
    #[must_use]
    pub fn into_object(self) -> Object {
        self.0
    }

    /// Look up a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    /// Whether the document has no top-level keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Object> for Document {
    fn from(root: Object) -> Self {
        Self(root)
    }
}

impl From<Document> for Node {
    fn from(document: Document) -> Self {
        Self::Object(document.0)
    }
}

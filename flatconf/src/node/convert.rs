//! Conversions between the tree model and `serde_json::Value`.
//!
//! The propagated context travels as JSON, which can carry shapes the tree
//! model cannot. Decoding normalises them:
//!
//! - `null` object members are dropped;
//! - `null` array elements become empty objects so indices are preserved;
//! - booleans and numbers become their textual form.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::{FlatconfError, FlatconfResult, FlatconfResultExt};

use super::{Document, Node, Object};

impl Node {
    /// Decode a JSON value, returning `None` for `null`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatconf::Node;
    /// use serde_json::json;
    ///
    /// assert_eq!(Node::from_json(json!(8080)), Some(Node::from("8080")));
    /// assert_eq!(Node::from_json(json!(null)), None);
    /// ```
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(flag) => Some(Self::Scalar(flag.to_string())),
            Value::Number(number) => Some(Self::Scalar(number.to_string())),
            Value::String(text) => Some(Self::Scalar(text)),
            Value::Array(elements) => Some(Self::Array(
                elements
                    .into_iter()
                    .map(|element| Self::from_json(element).unwrap_or_else(Self::empty_object))
                    .collect(),
            )),
            Value::Object(map) => Some(Self::Object(object_from_json(map))),
        }
    }
}

fn object_from_json(map: Map<String, Value>) -> Object {
    map.into_iter()
        .filter_map(|(key, value)| Node::from_json(value).map(|node| (key, node)))
        .collect()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Scalar(text) => Self::String(text),
            Node::Object(children) => Self::Object(
                children
                    .into_iter()
                    .map(|(key, child)| (key, Self::from(child)))
                    .collect(),
            ),
            Node::Array(elements) => Self::Array(elements.into_iter().map(Self::from).collect()),
        }
    }
}

impl Document {
    /// Decode a JSON value whose root must be an object.
    ///
    /// # Errors
    ///
    /// Returns [`FlatconfError::InvalidDocument`] when the root is not an object.
    pub fn from_json(value: Value) -> FlatconfResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(object_from_json(map))),
            other => Err(FlatconfError::InvalidDocument {
                found: json_kind(&other),
            })
            .into_flatconf(),
        }
    }

    /// Parse JSON text into a document.
    ///
    /// # Errors
    ///
    /// Returns [`FlatconfError::Json`] for invalid JSON and
    /// [`FlatconfError::InvalidDocument`] when the root is not an object.
    pub fn from_json_str(text: &str) -> FlatconfResult<Self> {
        let value: Value = serde_json::from_str(text).into_flatconf()?;
        Self::from_json(value)
    }

    /// Render the document as a JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::from(self.clone())
    }
}

impl TryFrom<Value> for Document {
    type Error = std::sync::Arc<FlatconfError>;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        Self::from(Node::from(document))
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(value).map_err(serde::de::Error::custom)
    }
}

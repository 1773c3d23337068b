//! Decoding flat entries into a document tree.
//!
//! Writes follow last-writer-wins: a scalar standing where a container is
//! needed is replaced, and re-inserting a key overwrites only that leaf.
//! Arrays are padded with empty objects so they stay dense and are never
//! shortened by an insert.

use std::sync::Arc;

use tracing::trace;

use crate::node::{Document, Node, Object};
use crate::path::{KeyGrammar, KeyPath, Segment, parse_key, parse_key_bounded};
use crate::{FlatconfError, FlatconfResult};

/// Insert `value` at `path`, creating intermediate containers as needed.
///
/// # Examples
///
/// ```
/// use flatconf::Document;
/// use flatconf::build::insert;
/// use flatconf::path::{KeyGrammar, parse_key};
/// use serde_json::json;
///
/// let mut doc = Document::new();
/// insert(&mut doc, &parse_key("list-2", KeyGrammar::Strict)?, "z");
/// assert_eq!(doc.to_json(), json!({"list": [{}, {}, "z"]}));
/// # Ok::<_, std::sync::Arc<flatconf::FlatconfError>>(())
/// ```
pub fn insert(doc: &mut Document, path: &KeyPath, value: impl Into<String>) {
    insert_node(doc, path, Node::Scalar(value.into()));
}

/// Insert an arbitrary node at `path`, replacing whatever the leaf held.
///
/// This is the general form of [`insert`], used when a source contributes a
/// whole subtree (for example a resource status) at a flat address.
pub fn insert_node(doc: &mut Document, path: &KeyPath, node: Node) {
    trace!(key = %path, kind = node.kind(), "inserting at flat key");
    place(doc.as_object_mut(), path.segments(), node);
}

/// Decode a sequence of flat entries into a new document.
///
/// Entries are applied in iteration order. Every key is parsed before any
/// insert happens, so a malformed key yields no tree at all.
///
/// # Errors
///
/// Returns [`FlatconfError::MalformedPath`] for a single bad key, or
/// [`FlatconfError::Aggregate`] listing every bad key when there are several.
pub fn build_tree<I, K, V>(entries: I, grammar: KeyGrammar) -> FlatconfResult<Document>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    build_tree_bounded(entries, grammar, None)
}

/// Decode flat entries, rejecting array indices above `max_index`.
///
/// # Errors
///
/// As [`build_tree`]; keys whose index exceeds `max_index` are reported as
/// [`FlatconfError::MalformedPath`] alongside any other bad keys.
///
/// # Examples
///
/// ```
/// use flatconf::build::build_tree_bounded;
/// use flatconf::path::KeyGrammar;
///
/// assert!(build_tree_bounded([("list-10", "z")], KeyGrammar::Strict, Some(10)).is_ok());
/// assert!(build_tree_bounded([("list-11", "z")], KeyGrammar::Strict, Some(10)).is_err());
/// ```
pub fn build_tree_bounded<I, K, V>(
    entries: I,
    grammar: KeyGrammar,
    max_index: Option<usize>,
) -> FlatconfResult<Document>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut parsed = Vec::new();
    let mut errors: Vec<Arc<FlatconfError>> = Vec::new();
    for (key, value) in entries {
        match parse_key_bounded(key.as_ref(), grammar, max_index) {
            Ok(path) => parsed.push((path, value)),
            Err(err) => errors.push(err),
        }
    }
    if let Some(err) = FlatconfError::try_aggregate(errors) {
        return Err(Arc::new(err));
    }
    let mut doc = Document::new();
    for (path, value) in parsed {
        insert(&mut doc, &path, value);
    }
    Ok(doc)
}

impl Document {
    /// Parse `key` under `grammar` and insert `value` at the resulting path.
    ///
    /// # Errors
    ///
    /// Returns [`FlatconfError::MalformedPath`] when `key` cannot be parsed;
    /// the document is left untouched in that case.
    pub fn insert(
        &mut self,
        key: &str,
        value: impl Into<String>,
        grammar: KeyGrammar,
    ) -> FlatconfResult<()> {
        let path = parse_key(key, grammar)?;
        insert(self, &path, value);
        Ok(())
    }
}

fn place(object: &mut Object, segments: &[Segment], value: Node) {
    let Some((segment, rest)) = segments.split_first() else {
        return;
    };
    let name = segment.name();
    let previous = object.remove(name);
    let replacement = match segment.index() {
        None => grow(previous, rest, value),
        Some(index) => {
            let mut elements = match previous {
                Some(Node::Array(elements)) => elements,
                Some(Node::Scalar(_) | Node::Object(_)) | None => Vec::new(),
            };
            if elements.len() <= index {
                elements.resize_with(index + 1, Node::empty_object);
            }
            if let Some(slot) = elements.get_mut(index) {
                let current = std::mem::replace(slot, Node::empty_object());
                *slot = grow(Some(current), rest, value);
            }
            Node::Array(elements)
        }
    };
    object.insert(name.to_owned(), replacement);
}

/// The node produced by writing `value` at `rest` beneath `previous`.
fn grow(previous: Option<Node>, rest: &[Segment], value: Node) -> Node {
    if rest.is_empty() {
        return value;
    }
    let mut children = match previous {
        Some(Node::Object(children)) => children,
        Some(Node::Scalar(_) | Node::Array(_)) | None => Object::new(),
    };
    place(&mut children, rest, value);
    Node::Object(children)
}

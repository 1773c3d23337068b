//! Deep merge of document trees with right-hand precedence.
//!
//! Behaviour:
//! - Keys present only in the base are kept.
//! - Where both sides hold objects, the objects are merged recursively.
//! - Anywhere else the overlay wins outright. Arrays are replaced wholesale,
//!   never merged element by element.

use crate::node::{Document, Node, Object};

/// Overlay `overlay` onto `base`.
///
/// # Examples
///
/// ```rust
/// use flatconf::{Document, merge::merge};
/// use serde_json::json;
///
/// let base = Document::from_json(json!({"a": "1", "b": {"x": "1"}}))?;
/// let overlay = Document::from_json(json!({"b": {"y": "2"}, "c": "3"}))?;
/// assert_eq!(
///     merge(base, overlay).to_json(),
///     json!({"a": "1", "b": {"x": "1", "y": "2"}, "c": "3"})
/// );
/// # Ok::<_, std::sync::Arc<flatconf::FlatconfError>>(())
/// ```
#[must_use]
pub fn merge(base: Document, overlay: Document) -> Document {
    Document::from_object(merge_objects(base.into_object(), overlay.into_object()))
}

/// Merge two nodes: objects merge recursively, otherwise `overlay` wins.
#[must_use]
pub fn merge_node(base: Node, overlay: Node) -> Node {
    match (base, overlay) {
        (Node::Object(lower), Node::Object(upper)) => Node::Object(merge_objects(lower, upper)),
        (_, upper) => upper,
    }
}

/// Fold `documents` left to right, starting from an empty document.
///
/// The first document has the lowest precedence and the last the highest.
#[must_use]
pub fn merge_all<I>(documents: I) -> Document
where
    I: IntoIterator<Item = Document>,
{
    documents.into_iter().fold(Document::new(), merge)
}

impl Document {
    /// Overlay `overlay` onto this document; see [`merge`].
    #[must_use]
    pub fn merged_with(self, overlay: Self) -> Self {
        merge(self, overlay)
    }
}

fn merge_objects(mut base: Object, overlay: Object) -> Object {
    for (key, value) in overlay {
        let merged = match base.remove(&key) {
            Some(existing) => merge_node(existing, value),
            None => value,
        };
        base.insert(key, merged);
    }
    base
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::{merge, merge_all};
    use crate::Document;

    fn doc(value: Value) -> Result<Document> {
        Ok(Document::from_json(value)?)
    }

    #[rstest]
    #[case::scalar_override(json!({"a": "1"}), json!({"a": "2"}), json!({"a": "2"}))]
    #[case::disjoint(json!({"a": "1"}), json!({"b": "2"}), json!({"a": "1", "b": "2"}))]
    #[case::deep(
        json!({"a": {"x": "1", "y": "1"}}),
        json!({"a": {"y": "2", "z": "2"}}),
        json!({"a": {"x": "1", "y": "2", "z": "2"}})
    )]
    #[case::array_replaces(
        json!({"a": ["1", "2", "3"]}),
        json!({"a": ["9"]}),
        json!({"a": ["9"]})
    )]
    #[case::scalar_over_object(json!({"a": {"x": "1"}}), json!({"a": "flat"}), json!({"a": "flat"}))]
    #[case::object_over_array(json!({"a": ["1"]}), json!({"a": {"x": "1"}}), json!({"a": {"x": "1"}}))]
    fn overlay_precedence(
        #[case] base: Value,
        #[case] overlay: Value,
        #[case] expected: Value,
    ) -> Result<()> {
        let merged = merge(doc(base)?, doc(overlay)?).to_json();
        ensure!(merged == expected, "expected {expected}, got {merged}");
        Ok(())
    }

    #[test]
    fn empty_document_is_identity_on_both_sides() -> Result<()> {
        let sample = doc(json!({"a": {"b": "1"}, "l": [{"k": "v"}]}))?;
        ensure!(merge(sample.clone(), Document::new()) == sample);
        ensure!(merge(Document::new(), sample.clone()) == sample);
        Ok(())
    }

    #[test]
    fn fold_is_independent_of_chunking() -> Result<()> {
        let sources = [
            doc(json!({"a": "1", "n": {"x": "1"}}))?,
            doc(json!({"a": "2", "n": {"y": "2"}}))?,
            doc(json!({"n": {"x": "3"}, "l": ["a"]}))?,
            doc(json!({"l": ["b"], "z": "4"}))?,
        ];
        let [s1, s2, s3, s4] = sources;
        let whole = merge_all([s1.clone(), s2.clone(), s3.clone(), s4.clone()]);
        let chunked = merge(merge(s1, s2), merge(s3, s4));
        ensure!(whole == chunked, "fold {whole:?} differs from chunked {chunked:?}");
        Ok(())
    }

    #[test]
    fn merge_is_not_commutative() -> Result<()> {
        let a = doc(json!({"k": "a"}))?;
        let b = doc(json!({"k": "b"}))?;
        ensure!(merge(a.clone(), b.clone()) != merge(b, a));
        Ok(())
    }
}

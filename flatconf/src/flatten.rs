//! Encoding a document tree as a flat record.
//!
//! Object children extend the key with `.`; array elements extend the array's
//! key with `-<index>`. Empty objects and arrays produce no entries, so they
//! do not survive a flatten/rebuild round trip. Arrays nested directly in
//! arrays have no flat spelling and are dropped with a warning.

use tracing::warn;

use crate::node::{Document, Node, Object};
use crate::record::FlatRecord;

/// Flatten `doc` into dotted keys.
///
/// # Examples
///
/// ```
/// use flatconf::{Document, flatten::flatten};
/// use serde_json::json;
///
/// let doc = Document::from_json(json!({"tags": [{"k": "v"}, "x"]}))?;
/// let record = flatten(&doc);
/// assert_eq!(record.get("tags-0.k"), Some("v"));
/// assert_eq!(record.get("tags-1"), Some("x"));
/// # Ok::<_, std::sync::Arc<flatconf::FlatconfError>>(())
/// ```
#[must_use]
pub fn flatten(doc: &Document) -> FlatRecord {
    let mut record = FlatRecord::new();
    walk_object(doc.as_object(), "", &mut record);
    record
}

impl Document {
    /// Flatten this document; see [`flatten`].
    #[must_use]
    pub fn flatten(&self) -> FlatRecord {
        flatten(self)
    }
}

fn walk_object(object: &Object, prefix: &str, record: &mut FlatRecord) {
    for (key, child) in object {
        let path = format!("{prefix}{key}");
        match child {
            Node::Scalar(value) => {
                record.insert(path, value.as_str());
            }
            Node::Object(children) => walk_object(children, &format!("{path}."), record),
            Node::Array(elements) => walk_array(elements, &path, record),
        }
    }
}

fn walk_array(elements: &[Node], path: &str, record: &mut FlatRecord) {
    for (index, element) in elements.iter().enumerate() {
        let element_path = format!("{path}-{index}");
        match element {
            Node::Scalar(value) => {
                record.insert(element_path, value.as_str());
            }
            Node::Object(children) => walk_object(children, &format!("{element_path}."), record),
            Node::Array(_) => {
                warn!(key = %element_path, "dropping array nested directly inside an array");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use serde_json::json;

    use super::flatten;
    use crate::{Document, FlatRecord};

    #[test]
    fn flattens_nested_objects_and_arrays() -> Result<()> {
        let doc = Document::from_json(json!({
            "db": {"host": "localhost", "port": 5432},
            "tags": [{"k": "v"}, "x"],
            "empty": {}
        }))?;
        let expected: FlatRecord = [
            ("db.host", "localhost"),
            ("db.port", "5432"),
            ("tags-0.k", "v"),
            ("tags-1", "x"),
        ]
        .into_iter()
        .collect();
        let actual = flatten(&doc);
        ensure!(actual == expected, "unexpected record {actual:?}");
        Ok(())
    }

    #[test]
    fn formats_indices_as_decimal() -> Result<()> {
        let items: Vec<String> = (0..12).map(|i| format!("v{i}")).collect();
        let doc = Document::from_json(json!({ "items": items }))?;
        let record = doc.flatten();
        ensure!(record.get("items-10") == Some("v10"), "missing items-10");
        ensure!(record.get("items-11") == Some("v11"), "missing items-11");
        ensure!(record.len() == 12, "unexpected entry count {}", record.len());
        Ok(())
    }

    #[test]
    fn drops_arrays_nested_in_arrays() -> Result<()> {
        let doc = Document::from_json(json!({"grid": [["a"], "b"]}))?;
        let record = flatten(&doc);
        ensure!(
            record.iter().collect::<Vec<_>>() == vec![("grid-1", "b")],
            "unexpected record {record:?}"
        );
        Ok(())
    }

    #[test]
    fn empty_document_flattens_to_empty_record() {
        assert!(flatten(&Document::new()).is_empty());
    }
}

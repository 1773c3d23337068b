//! Settings shared by the pipeline and the source adapters.

use serde::{Deserialize, Serialize};

use crate::path::KeyGrammar;

use super::ContextStamp;

/// Tunables for decoding and exporting documents.
///
/// Every field has a default, so partial configuration (for example a file
/// that only sets `grammar`) deserialises cleanly.
///
/// The pipeline reads with [`KeyGrammar::Heuristic`] unless told otherwise.
/// Tree sources are flattened without key validation, so a name such as
/// `app-name` from a context object must still decode when the stored record
/// is read on the next run.
///
/// ```
/// use flatconf::pipeline::PipelineOptions;
/// use flatconf::path::KeyGrammar;
///
/// let options: PipelineOptions =
///     serde_json::from_str(r#"{"grammar": "strict", "max_index": 1024}"#)?;
/// assert_eq!(options.grammar, KeyGrammar::Strict);
/// assert_eq!(options.max_index, Some(1024));
/// assert_eq!(options.status_pointer, "/atProvider");
/// assert_eq!(PipelineOptions::default().grammar, KeyGrammar::Heuristic);
/// # Ok::<_, serde_json::Error>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Grammar used to parse flat keys and resource names.
    pub grammar: KeyGrammar,
    /// Largest array index accepted while decoding; `None` means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_index: Option<usize>,
    /// JSON pointer selecting the part of a resource status to keep.
    pub status_pointer: String,
    /// First segment of keys produced from dependency secrets.
    pub dependency_prefix: String,
    /// Type metadata applied to exported context objects.
    pub stamp: ContextStamp,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            grammar: KeyGrammar::Heuristic,
            max_index: None,
            status_pointer: String::from("/atProvider"),
            dependency_prefix: String::from("external"),
            stamp: ContextStamp::default(),
        }
    }
}

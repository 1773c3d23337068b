//! Adapters that turn raw inputs into source layers.
//!
//! Fetching the inputs (resource statuses, secrets) is the caller's job.
//! These helpers only reshape what was fetched so it can be merged.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::build::insert_node;
use crate::path::{KeyPath, parse_segment};
use crate::{Document, FlatRecord, FlatconfError, FlatconfResult, Node};

use super::PipelineOptions;

/// Build a document from observed resource statuses.
///
/// Each status is narrowed with [`PipelineOptions::status_pointer`]; statuses
/// without that field (or where it is `null`) are skipped. The resource name
/// is read as a single segment, so `bucket-1` lands in slot 1 of the
/// `bucket` array while `database` lands under the `database` key. Under the
/// default grammar a name such as `my-bucket` is an ordinary key.
///
/// ```
/// use flatconf::pipeline::{PipelineOptions, sources::status_document};
/// use serde_json::json;
///
/// let doc = status_document(
///     [
///         ("bucket-1", json!({"atProvider": {"arn": "b1"}})),
///         ("database", json!({"atProvider": {"host": "db"}})),
///     ],
///     &PipelineOptions::default(),
/// )?;
/// assert_eq!(
///     doc.to_json(),
///     json!({"bucket": [{}, {"arn": "b1"}], "database": {"host": "db"}})
/// );
/// # Ok::<_, std::sync::Arc<flatconf::FlatconfError>>(())
/// ```
///
/// # Errors
///
/// Returns [`FlatconfError::MalformedPath`] (or an aggregate) for resource
/// names the configured grammar or index bound rejects. No document is
/// produced then.
pub fn status_document<I, K>(statuses: I, options: &PipelineOptions) -> FlatconfResult<Document>
where
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    let mut placements = Vec::new();
    let mut errors: Vec<Arc<FlatconfError>> = Vec::new();
    for (resource, status) in statuses {
        let name = resource.as_ref();
        let Some(node) = status
            .pointer(&options.status_pointer)
            .cloned()
            .and_then(Node::from_json)
        else {
            debug!(resource = name, pointer = %options.status_pointer, "status has no projected field");
            continue;
        };
        let parsed =
            parse_segment(name, options.grammar).and_then(|segment| segment.within(options.max_index));
        match parsed {
            Ok(segment) => placements.extend(
                KeyPath::from_segments(vec![segment]).map(|path| (path, node)),
            ),
            Err(reason) => errors.push(Arc::new(FlatconfError::malformed(name, name, reason))),
        }
    }
    if let Some(err) = FlatconfError::try_aggregate(errors) {
        return Err(Arc::new(err));
    }
    let mut doc = Document::new();
    for (path, node) in placements {
        insert_node(&mut doc, &path, node);
    }
    Ok(doc)
}

/// A dependency whose secret supplies named inputs.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    /// Name the dependency is exposed under.
    pub alias: String,
    /// Name of the secret holding the dependency's values.
    pub secret_name: String,
    /// Input name mapped to the secret key that provides it.
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
}

/// Build a flat record from dependency secrets.
///
/// For every input whose secret key is present in the fetched secret, emits
/// `<prefix>.<alias>.<input>`. A dependency whose secret cannot be fetched is
/// skipped; inputs whose key is missing from the secret are ignored.
///
/// ```
/// use std::collections::BTreeMap;
/// use flatconf::FlatRecord;
/// use flatconf::pipeline::PipelineOptions;
/// use flatconf::pipeline::sources::{Dependency, dependency_record};
///
/// let dependency = Dependency {
///     alias: "network".into(),
///     secret_name: "vpc-secret".into(),
///     inputs: BTreeMap::from([("vpcId".to_owned(), "id".to_owned())]),
/// };
/// let record = dependency_record(
///     &[dependency],
///     |_| Ok([("id", "vpc-123")].into_iter().collect::<FlatRecord>()),
///     &PipelineOptions::default(),
/// );
/// assert_eq!(record.get("external.network.vpcId"), Some("vpc-123"));
/// ```
#[must_use]
pub fn dependency_record<F>(
    dependencies: &[Dependency],
    mut fetch: F,
    options: &PipelineOptions,
) -> FlatRecord
where
    F: FnMut(&Dependency) -> FlatconfResult<FlatRecord>,
{
    let mut record = FlatRecord::new();
    for dependency in dependencies {
        let secret = match fetch(dependency) {
            Ok(secret) => secret,
            Err(err) => {
                warn!(
                    alias = %dependency.alias,
                    secret = %dependency.secret_name,
                    error = %err,
                    "dependency secret unavailable; skipping"
                );
                continue;
            }
        };
        for (input, secret_key) in &dependency.inputs {
            if let Some(value) = secret.get(secret_key) {
                record.insert(
                    format!("{}.{}.{input}", options.dependency_prefix, dependency.alias),
                    value,
                );
            }
        }
    }
    record
}

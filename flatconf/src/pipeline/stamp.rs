//! Type metadata for exported context objects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

const API_VERSION_KEY: &str = "apiVersion";
const KIND_KEY: &str = "kind";

/// The `apiVersion`/`kind` pair written onto an untyped context object.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextStamp {
    /// Value written to `apiVersion`.
    pub api_version: String,
    /// Value written to `kind`.
    pub kind: String,
}

impl Default for ContextStamp {
    fn default() -> Self {
        Self {
            api_version: String::from("internal.crossplane.io/v1alpha1"),
            kind: String::from("Environment"),
        }
    }
}

impl ContextStamp {
    /// Write the stamp onto `context` unless it already carries type metadata.
    ///
    /// A context counts as typed when either `apiVersion` or `kind` holds a
    /// non-empty string. Non-object values are returned unchanged.
    ///
    /// ```
    /// use flatconf::pipeline::ContextStamp;
    /// use serde_json::json;
    ///
    /// let stamped = ContextStamp::default().apply(json!({"db": {"host": "a"}}));
    /// assert_eq!(stamped["kind"], "Environment");
    ///
    /// let typed = json!({"apiVersion": "v1", "kind": "Custom"});
    /// assert_eq!(ContextStamp::default().apply(typed.clone()), typed);
    /// ```
    #[must_use]
    pub fn apply(&self, mut context: Value) -> Value {
        let Value::Object(map) = &mut context else {
            return context;
        };
        let typed = [API_VERSION_KEY, KIND_KEY]
            .iter()
            .any(|key| map.get(*key).and_then(Value::as_str).is_some_and(|v| !v.is_empty()));
        if !typed {
            map.insert(API_VERSION_KEY.to_owned(), Value::from(self.api_version.as_str()));
            map.insert(KIND_KEY.to_owned(), Value::from(self.kind.as_str()));
        }
        context
    }
}

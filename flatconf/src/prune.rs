//! Removal of null fields from desired-state output.
//!
//! Pruning is an optional post-processing step for JSON that is about to be
//! handed downstream as desired state. It is never applied to merged
//! configuration, where an empty object can be meaningful.

use serde_json::{Map, Value};

/// Remove null members and the objects that become empty as a result.
///
/// Nested objects are pruned before their parent decides whether to keep
/// them. Objects inside arrays are pruned too, but array elements are never
/// removed so indices stay stable.
///
/// # Examples
///
/// ```
/// use flatconf::prune::prune;
/// use serde_json::json;
///
/// let pruned = prune(json!({"a": null, "b": {"c": null}, "d": "v"}));
/// assert_eq!(pruned, json!({"d": "v"}));
/// ```
#[must_use]
pub fn prune(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(prune_object(map)),
        Value::Array(elements) => Value::Array(elements.into_iter().map(prune).collect()),
        other => other,
    }
}

fn prune_object(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::Object(children) => {
                let pruned = prune_object(children);
                (!pruned.is_empty()).then(|| (key, Value::Object(pruned)))
            }
            other => Some((key, prune(other))),
        })
        .collect()
}

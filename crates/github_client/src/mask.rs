//! Field masking for GitHub responses.
//!
//! GitHub returns far more than a configuration file cares about (URLs,
//! timestamps, node ids). [`project`] keeps an allow-list of top-level keys
//! and drops the rest, for a single object or for every object of a list.

use serde_json::{Map, Value};

use crate::Error;

#[cfg(test)]
#[path = "mask_tests.rs"]
mod tests;

/// Retains only `fields` from `value`.
///
/// Fields listed but absent from the payload are simply not present in the
/// output; the mask never invents keys.
///
/// # Errors
///
/// Returns `Error::UnexpectedPayload` when `value` is neither an object nor a
/// list of objects.
///
/// # Examples
///
/// ```rust
/// use github_client::project;
/// use serde_json::json;
///
/// let label = json!({"name": "bug", "color": "fc2929", "url": "https://..."});
/// let masked = project(label, &["name", "color"]).unwrap();
/// assert_eq!(masked, json!({"name": "bug", "color": "fc2929"}));
/// ```
pub fn project(value: Value, fields: &[&str]) -> Result<Value, Error> {
    match value {
        Value::Object(map) => Ok(Value::Object(mask_object(map, fields))),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => Ok(Value::Object(mask_object(map, fields))),
                other => Err(Error::UnexpectedPayload(format!(
                    "expected a list of objects, found {}",
                    kind(&other)
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Err(Error::UnexpectedPayload(format!(
            "expected an object or a list, got {}",
            kind(&other)
        ))),
    }
}

fn mask_object(mut map: Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    map.retain(|key, _| fields.contains(&key.as_str()));
    map
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

//! Helpers for inspecting encoded JSON trees.

use anyhow::{Context, Result, anyhow};
use serde_json::Value;

/// Parses `text` as JSON, attaching the input to any error.
///
/// # Errors
///
/// Returns an error when `text` is not valid JSON.
pub fn parse(text: &str) -> Result<Value> {
    serde_json::from_str(text).with_context(|| format!("invalid JSON: {text}"))
}

/// Keys of a JSON object in document order.
///
/// # Errors
///
/// Returns an error when `value` is not an object.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use test_helpers::json::object_keys;
///
/// let value = json!({"IsSuccess": true, "Value": 1});
/// let keys = object_keys(&value)?;
/// assert_eq!(keys, ["IsSuccess", "Value"]);
/// # Ok::<_, anyhow::Error>(())
/// ```
pub fn object_keys(value: &Value) -> Result<Vec<&str>> {
    value
        .as_object()
        .map(|object| object.keys().map(String::as_str).collect())
        .ok_or_else(|| anyhow!("expected a JSON object, found {value}"))
}

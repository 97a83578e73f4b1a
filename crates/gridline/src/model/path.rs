//! Dotted-path access into rows.
//!
//! Rows are arbitrary JSON values. A column names its field with a dotted
//! path such as `"country.name"`; numeric segments index into arrays
//! (`"phones.0"`). Anything that cannot be resolved, and an explicit `null`,
//! is reported as absent instead of raising.

use serde_json::Value;

/// Split a path into its non-empty segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|s| !s.is_empty())
}

/// Resolve `path` against `row`.
///
/// Returns `None` when any segment is missing, when an intermediate value
/// is not a container, when the path is empty, or when the leaf is `null`.
pub fn get<'a>(row: &'a Value, path: &str) -> Option<&'a Value> {
    let mut parts = segments(path).peekable();
    parts.peek()?;

    let mut current = row;
    for part in parts {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    match current {
        Value::Null => None,
        value => Some(value),
    }
}

/// Resolve `path` and render it as text.
///
/// Absent values become the empty string, strings are returned verbatim,
/// numbers and booleans use their display form, containers are serialized
/// as JSON.
pub fn get_text(row: &Value, path: &str) -> String {
    get(row, path).map(value_to_text).unwrap_or_default()
}

/// Render a single value the way [`get_text`] does.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

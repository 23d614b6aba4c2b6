// src/e_data_get.rs

use serde_json::Value;

/// Returns false for `null`, `false`, `0` and `""`, true for everything else.
///
/// Empty arrays and objects are truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Walks `data` along a dotted key and returns the value found there, or
/// `None` when some segment does not exist.
///
/// Objects are indexed by key and arrays by decimal index. Walking stops
/// early with `None` when an intermediate value is falsy (see [`is_truthy`]),
/// so `{"a": {"b": 0}}` has nothing at `a.b.c` even though `a.b` is defined.
/// A falsy value at the end of the path is still returned.
pub fn data_get_opt<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    let mut current = data;
    for segment in key.split('.') {
        if !is_truthy(current) {
            return None;
        }
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Reads the value at `key`, falling back to `default` when the path is missing.
///
/// # Example
/// ```
/// use serde_json::json;
/// use webpack_e::e_data_get::data_get;
///
/// let data = json!({"a": {"b": {"c": 5}}});
/// let fallback = json!("D");
/// assert_eq!(data_get(&data, "a.b.c", &fallback), &json!(5));
/// assert_eq!(data_get(&data, "a.x.c", &fallback), &json!("D"));
/// ```
pub fn data_get<'a>(data: &'a Value, key: &str, default: &'a Value) -> &'a Value {
    data_get_opt(data, key).unwrap_or(default)
}

/// Reads a line or column number. Anything that is not a non-negative
/// integral number counts as `0` (unknown).
pub fn as_position(value: &Value) -> usize {
    if let Some(n) = value.as_u64() {
        return usize::try_from(n).unwrap_or(0);
    }
    match value.as_f64() {
        Some(f) if f.is_finite() && f >= 1.0 && f.fract() == 0.0 => f as usize,
        _ => 0,
    }
}

/// Shorthand for `as_position(data_get(data, key, 0))`.
pub fn position_at(data: &Value, key: &str) -> usize {
    data_get_opt(data, key).map(as_position).unwrap_or(0)
}

//! Scalar coercions for loosely typed record fields.
//!
//! Records arrive from several client generations: numbers may be JSON
//! numbers or numeric strings (multipart form posts), booleans may be
//! strings, and nested objects may be JSON-encoded. Every helper here is
//! total: bad input yields `None` or the documented default, never an error.

use serde_json::Value;

/// `Number(v)` style coercion; blank strings and non-numeric values are `None`.
pub fn to_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

/// Non-negative currency amount, `default` when unparseable.
pub fn to_amount(value: Option<&Value>, default: f64) -> f64 {
    to_number(value).map(|v| v.max(0.0)).unwrap_or(default)
}

/// Non-negative integer count; fractional values are truncated.
pub fn to_count(value: Option<&Value>) -> u32 {
    to_number(value)
        .map(|v| v.max(0.0).trunc().min(u32::MAX as f64) as u32)
        .unwrap_or(0)
}

/// `true`, non-zero numbers and `true/1/yes/on` strings are true.
pub fn to_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        _ => false,
    }
}

/// Trimmed, non-empty text; numbers are rendered as text.
pub fn to_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Decodes a JSON-encoded string once; anything else is returned unchanged.
pub fn parse_maybe_json(value: &Value) -> Value {
    match value {
        Value::String(s) => serde_json::from_str(s).unwrap_or_else(|_| value.clone()),
        other => other.clone(),
    }
}

/// Object view of a field that may be an object or a JSON-encoded object.
pub fn as_object(value: Option<&Value>) -> Option<serde_json::Map<String, Value>> {
    match parse_maybe_json(value?) {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

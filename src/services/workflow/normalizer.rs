//! Response Normalizer
//!
//! Pulls the JSON value out of a backend reply and repairs numeric fields that
//! came back as decorated strings (`"72%"`, `"$45,000"`, `"Month 3"`).

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Number, Value};

/// Keys whose values must end up as plain numbers.
pub const NUMERIC_KEYS: [&str; 7] = ["score", "current", "target", "min", "max", "avg", "month"];

/// Greedy span from the first `{` (or `[`) to the last matching closer kind.
fn json_span_regex() -> Option<&'static Regex> {
    static SPAN: OnceLock<Option<Regex>> = OnceLock::new();
    SPAN.get_or_init(|| Regex::new(r"(?s)(\{.*\}|\[.*\])").ok())
        .as_ref()
}

/// Locate the JSON candidate inside `text`. Falls back to the whole text.
fn candidate_span(text: &str) -> &str {
    json_span_regex()
        .and_then(|re| re.find(text))
        .map(|m| m.as_str())
        .unwrap_or(text)
}

/// Extract and parse the JSON value embedded in `text`.
///
/// Returns `None` when nothing parses or the value is `null`. The offending
/// text is logged, never retried here.
pub fn extract_json(text: &str) -> Option<Value> {
    let candidate = candidate_span(text);
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Null) => {
            tracing::warn!("[Normalizer] reply parsed to null");
            None
        }
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(error = %e, text = %text, "[Normalizer] no parsable JSON in reply");
            None
        }
    }
}

/// Convert a float to a JSON number, preferring an integer representation.
fn to_number(value: f64) -> Value {
    if !value.is_finite() {
        return Value::from(0);
    }
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        return Value::from(value as i64);
    }
    Number::from_f64(value).map(Value::Number).unwrap_or_else(|| Value::from(0))
}

/// Coerce a single numeric-key value. Never fails.
fn coerce_number(value: &Value) -> Value {
    match value {
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            if cleaned.is_empty() {
                return Value::from(0);
            }
            to_number(cleaned.parse::<f64>().unwrap_or(0.0))
        }
        Value::Bool(b) => Value::from(u8::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => Value::from(0),
    }
}

/// Recursively coerce every numeric-key field; other fields are untouched.
pub fn coerce_numeric_fields(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, v)| {
                    let coerced = if NUMERIC_KEYS.contains(&key.as_str()) {
                        coerce_number(&v)
                    } else {
                        coerce_numeric_fields(v)
                    };
                    (key, coerced)
                })
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(coerce_numeric_fields).collect()),
        other => other,
    }
}

/// Extract then coerce. `None` means the reply carried no usable data.
pub fn normalize(text: &str) -> Option<Value> {
    extract_json(text).map(coerce_numeric_fields)
}

//! JSON rendering of values for failure messages

use std::fmt;

use crate::value::Value;

impl Value {
    /// JSON form of the value
    ///
    /// Dates render as RFC 3339 text, sets as arrays, predicates as their
    /// name. The absent marker renders as null.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null | Value::Absent => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(f.to_string())),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Date(date) => serde_json::Value::String(date.to_rfc3339()),
            Value::Sequence(items) | Value::Set(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Mapping(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Value::Record(record) => record.to_json(),
            Value::Predicate(predicate) => {
                serde_json::Value::String(format!("<predicate {}>", predicate.name()))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// Render a value as compact JSON, cut to at most `limit` characters
pub fn render(value: &Value, limit: usize) -> String {
    let text = value.to_json().to_string();
    if text.chars().count() <= limit {
        return text;
    }
    let mut cut: String = text.chars().take(limit).collect();
    cut.push_str("...");
    cut
}

/// Quote a key for messages
pub fn quote(key: &str) -> String {
    serde_json::Value::String(key.to_string()).to_string()
}

/// Render a number the way JSON would, keeping integral floats short
pub fn render_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

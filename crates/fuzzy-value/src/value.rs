//! The value tree compared by the matcher

use std::borrow::Cow;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::dates::parse_date;
use crate::error::ValueResult;
use crate::predicate::Predicate;
use crate::record::{Record, SerdeRecord};

/// Key/value pairs, kept in insertion order for readable messages
pub type Mapping = IndexMap<String, Value>;

/// A loosely-typed value: either an observed value or an expected pattern
///
/// Observed values and patterns share one type. Some variants only make
/// sense as patterns: [`Value::Absent`] asserts that the observed value is
/// missing, and [`Value::Predicate`] is called with the observed value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// No value. As a pattern, imposes no constraint.
    #[default]
    Null,

    /// Explicit "must not exist" marker
    Absent,

    Bool(bool),

    Int(i64),

    Float(f64),

    Text(String),

    /// A point in time, normalized to UTC
    Date(DateTime<Utc>),

    /// Ordered sequence; order matters when matching
    Sequence(Vec<Value>),

    /// Unordered collection of distinct elements
    Set(Vec<Value>),

    Mapping(Mapping),

    /// Opaque object with attribute access
    Record(Arc<dyn Record>),

    /// Callable pattern
    Predicate(Predicate),
}

impl Value {
    /// Build a sequence from anything convertible to values
    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Build a set, dropping duplicate elements
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let mut distinct: Vec<Value> = Vec::new();
        for item in items {
            let item = item.into();
            if !distinct.contains(&item) {
                distinct.push(item);
            }
        }
        Value::Set(distinct)
    }

    /// Build a mapping from key/value pairs
    pub fn mapping<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// The "must not exist" marker
    pub fn absent() -> Self {
        Value::Absent
    }

    /// Wrap a record
    pub fn record(record: impl Record + 'static) -> Self {
        Value::Record(Arc::new(record))
    }

    /// Record view of any serializable struct
    pub fn from_serialize<T: Serialize>(value: &T) -> ValueResult<Self> {
        Ok(Value::record(SerdeRecord::from_serialize(value)?))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Null, the absent marker, empty text, and empty sequences or sets
    /// are interchangeable markers of absence.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null | Value::Absent => true,
            Value::Text(s) => s.is_empty(),
            Value::Sequence(items) | Value::Set(items) => items.is_empty(),
            Value::Record(record) => record.is_missing(),
            _ => false,
        }
    }

    /// Numeric reading of the value; numeric text counts
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        }
    }

    /// Date reading of the value; date-like text counts
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Date(date) => Some(*date),
            Value::Text(s) => parse_date(s).ok(),
            _ => None,
        }
    }

    /// Elements of a container: sequences, sets and sequence-like records
    pub fn elements(&self) -> Option<Cow<'_, [Value]>> {
        match self {
            Value::Sequence(items) | Value::Set(items) => Some(Cow::Borrowed(items.as_slice())),
            Value::Record(record) => record.elements().map(Cow::Owned),
            _ => None,
        }
    }

    /// Key lookup for mappings and mapping-like records; absent keys are null
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Mapping(map) => map.get(key).cloned().unwrap_or_default(),
            Value::Record(record) if record.is_mapping_like() => {
                record.attribute(key).unwrap_or_default()
            }
            _ => Value::Null,
        }
    }

    /// Attribute lookup: any record answers by attribute name, a mapping by
    /// key, everything else has no attributes
    pub fn attribute(&self, name: &str) -> Value {
        match self {
            Value::Record(record) => record.attribute(name).unwrap_or_default(),
            _ => self.get(name),
        }
    }

    /// Name of the variant, for messages
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Absent => "absent",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::Sequence(_) => "sequence",
            Value::Set(_) => "set",
            Value::Mapping(_) => "mapping",
            Value::Record(record) => record.type_name(),
            Value::Predicate(_) => "predicate",
        }
    }

    /// Loose equality: numbers compare by value, dates compare against
    /// date-like text.
    pub fn loosely_equals(&self, other: &Value) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (Value::Date(date), Value::Text(text)) | (Value::Text(text), Value::Date(date)) => {
                parse_date(text).map(|parsed| parsed == *date).unwrap_or(false)
            }
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Absent, Value::Absent) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                self.as_number() == other.as_number()
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => {
                a.len() == b.len() && a.iter().all(|item| b.contains(item))
            }
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => Arc::ptr_eq(a, b),
            (Value::Predicate(a), Value::Predicate(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(date: DateTime<Utc>) -> Self {
        Value::Date(date)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(date: NaiveDateTime) -> Self {
        Value::Date(Utc.from_utc_datetime(&date))
    }
}

impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Value::from(date.and_time(NaiveTime::MIN))
    }
}

impl From<Predicate> for Value {
    fn from(predicate: Predicate) -> Self {
        Value::Predicate(predicate)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::sequence(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => Value::sequence(items),
            serde_json::Value::Object(map) => Value::mapping(map),
        }
    }
}

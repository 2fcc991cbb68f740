//! One-time classification of a value for rule dispatch

use std::fmt;

use crate::value::Value;

/// Closed set of value categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Absent,
    Scalar,
    Number,
    Date,
    Sequence,
    Set,
    Mapping,
    Record,
    Callable,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Null => write!(f, "null"),
            Kind::Absent => write!(f, "absent"),
            Kind::Scalar => write!(f, "scalar"),
            Kind::Number => write!(f, "number"),
            Kind::Date => write!(f, "date"),
            Kind::Sequence => write!(f, "sequence"),
            Kind::Set => write!(f, "set"),
            Kind::Mapping => write!(f, "mapping"),
            Kind::Record => write!(f, "record"),
            Kind::Callable => write!(f, "callable"),
        }
    }
}

/// Capabilities of a value, computed once before dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub kind: Kind,
    /// Holds elements (sequence, set, or sequence-like record)
    pub many: bool,
    /// Supports key lookup (mapping, or mapping-like record)
    pub data: bool,
    /// Counts as absent
    pub missing: bool,
}

impl Shape {
    pub fn of(value: &Value) -> Self {
        let kind = match value {
            Value::Null => Kind::Null,
            Value::Absent => Kind::Absent,
            Value::Bool(_) | Value::Text(_) => Kind::Scalar,
            Value::Int(_) | Value::Float(_) => Kind::Number,
            Value::Date(_) => Kind::Date,
            Value::Sequence(_) => Kind::Sequence,
            Value::Set(_) => Kind::Set,
            Value::Mapping(_) => Kind::Mapping,
            Value::Record(_) => Kind::Record,
            Value::Predicate(_) => Kind::Callable,
        };
        let (many, data) = match value {
            Value::Sequence(_) | Value::Set(_) => (true, false),
            Value::Mapping(_) => (false, true),
            Value::Record(record) => (record.is_sequence_like(), record.is_mapping_like()),
            _ => (false, false),
        };

        Self {
            kind,
            many,
            data,
            missing: value.is_missing(),
        }
    }
}

impl Value {
    /// Classify this value
    pub fn shape(&self) -> Shape {
        Shape::of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Table;

    #[test]
    fn test_classification() {
        assert_eq!(Value::Null.shape().kind, Kind::Null);
        assert_eq!(Value::from("x").shape().kind, Kind::Scalar);
        assert_eq!(Value::from(1.5).shape().kind, Kind::Number);

        let seq = Value::sequence([1]).shape();
        assert!(seq.many && !seq.data && !seq.missing);

        let map = Value::mapping([("a", 1)]).shape();
        assert!(map.data && !map.many);

        assert!(Value::from("").shape().missing);
    }

    #[test]
    fn test_table_is_many_and_data() {
        let table = Value::record(Table::new(["a"]));
        let shape = table.shape();
        assert_eq!(shape.kind, Kind::Record);
        assert!(shape.many);
        assert!(shape.data);
    }
}

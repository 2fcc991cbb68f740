//! Opaque objects exposed to the matcher through attribute access

use std::fmt;

use serde::Serialize;

use crate::error::{ValueError, ValueResult};
use crate::value::{Mapping, Value};

/// An object the matcher reads by attribute name
///
/// A mapping pattern compared against a record checks each pattern key
/// against the attribute of the same name. Records may additionally behave
/// like a sequence (tabular wrappers) or like a mapping.
pub trait Record: fmt::Debug + Send + Sync {
    /// Type name used in messages
    fn type_name(&self) -> &str;

    /// Read an attribute; `None` when the record has no such attribute
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Plain-sequence view of the record, if it has one
    fn elements(&self) -> Option<Vec<Value>> {
        None
    }

    fn is_sequence_like(&self) -> bool {
        self.elements().is_some()
    }

    /// Whether key lookup on this record behaves like a mapping
    fn is_mapping_like(&self) -> bool {
        false
    }

    /// Whether this record stands for "nothing"
    fn is_missing(&self) -> bool {
        false
    }

    /// JSON rendering for messages
    fn to_json(&self) -> serde_json::Value;
}

/// Record view of a serializable struct
#[derive(Debug, Clone)]
pub struct SerdeRecord {
    type_name: String,
    fields: Mapping,
    json: serde_json::Value,
}

impl SerdeRecord {
    pub fn from_serialize<T: Serialize>(value: &T) -> ValueResult<Self> {
        let type_name = short_type_name::<T>();
        let json = serde_json::to_value(value).map_err(|source| ValueError::Serialize {
            type_name: type_name.clone(),
            source,
        })?;

        let fields = match &json {
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(k, v)| (k.clone(), Value::from(v.clone())))
                .collect(),
            _ => return Err(ValueError::NotAnObject { type_name }),
        };

        Ok(Self {
            type_name,
            fields,
            json,
        })
    }
}

impl Record for SerdeRecord {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    fn to_json(&self) -> serde_json::Value {
        self.json.clone()
    }
}

fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full).to_string()
}

/// Column-oriented table
///
/// As a sequence, a table reads as the values of its first column. As a
/// mapping, each column name looks up that column's values.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; it must have one cell per column
    pub fn push_row<I, T>(&mut self, row: I) -> ValueResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let row: Vec<Value> = row.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(ValueError::RowWidth {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn with_row<I, T>(mut self, row: I) -> ValueResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.push_row(row)?;
        Ok(self)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<Value>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row[index].clone()).collect())
    }
}

impl Record for Table {
    fn type_name(&self) -> &str {
        "Table"
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        self.column(name).map(Value::Sequence)
    }

    fn elements(&self) -> Option<Vec<Value>> {
        match self.columns.first() {
            Some(first) => self.column(first),
            None => Some(Vec::new()),
        }
    }

    fn is_mapping_like(&self) -> bool {
        true
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.rows
                .iter()
                .map(|row| {
                    serde_json::Value::Object(
                        self.columns
                            .iter()
                            .zip(row)
                            .map(|(c, v)| (c.clone(), v.to_json()))
                            .collect(),
                    )
                })
                .collect(),
        )
    }
}

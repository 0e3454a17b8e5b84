//! # Row Boundary
//!
//! Rows are flat maps from origin column name to a tagged `ColumnValue`. The
//! tag tells the engine whether a value is a plain scalar, JSON text still to
//! be decoded, or an already structured sequence/record, so relation data is
//! dispatched on the tag instead of by probing strings.

#[cfg(feature = "postgres")]
pub mod postgres;

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Plain scalar cell
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Tagged cell value supplied by the database collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Null,
    Scalar(Scalar),
    /// JSON document still in its textual encoding
    Encoded(String),
    Sequence(Vec<Value>),
    Record(Map<String, Value>),
}

impl ColumnValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(value.into()))
    }

    pub fn encoded(value: impl Into<String>) -> Self {
        Self::Encoded(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Raw JSON form of the cell; encoded text is kept as a string
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
            Self::Scalar(Scalar::Int(i)) => Value::from(*i),
            Self::Scalar(Scalar::Float(f)) => Value::from(*f),
            Self::Scalar(Scalar::Text(s)) | Self::Encoded(s) => Value::String(s.clone()),
            Self::Sequence(items) => Value::Array(items.clone()),
            Self::Record(map) => Value::Object(map.clone()),
        }
    }

    /// Decode textual cells as JSON; structured and null cells pass through
    pub fn decode_json(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Encoded(text) | Self::Scalar(Scalar::Text(text)) => serde_json::from_str(text),
            other => Ok(other.to_json()),
        }
    }
}

impl From<Value> for ColumnValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Scalar(Scalar::Int(i)),
                None => n
                    .as_f64()
                    .map(|f| Self::Scalar(Scalar::Float(f)))
                    .unwrap_or_else(|| Self::Encoded(n.to_string())),
            },
            Value::String(s) => Self::Scalar(Scalar::Text(s)),
            Value::Array(items) => Self::Sequence(items),
            Value::Object(map) => Self::Record(map),
        }
    }
}

impl From<bool> for ColumnValue {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<i32> for ColumnValue {
    fn from(value: i32) -> Self {
        Self::Scalar(Scalar::Int(i64::from(value)))
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Int(value))
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::Float(value))
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Flat row keyed by origin column name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: HashMap<String, ColumnValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, column: impl Into<String>, value: impl Into<ColumnValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<ColumnValue>) {
        self.columns.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&ColumnValue> {
        self.columns.get(column)
    }

    /// Value of the column when it exists and is not null
    pub fn present(&self, column: &str) -> Option<&ColumnValue> {
        self.columns.get(column).filter(|value| !value.is_null())
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<ColumnValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        }
    }
}

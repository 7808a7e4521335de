// dqm-core/src/domain/dataset.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::error::DomainError;

/// Logical type of a column. Columns are homogeneous: every non-null value
/// of a column has the column's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Number,
    Text,
    Timestamp,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single cell.
///
/// Equality and hashing are value-wise with two twists needed for full-row
/// duplicate detection: `Null == Null`, and numbers compare by canonical bit
/// pattern (all NaNs are null, `-0.0 == 0.0`).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Number(f64),
    Timestamp(NaiveDateTime),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    pub fn data_type(&self) -> Option<DataType> {
        if self.is_null() {
            return None;
        }
        match self {
            Value::Number(_) => Some(DataType::Number),
            Value::Text(_) => Some(DataType::Text),
            Value::Timestamp(_) => Some(DataType::Timestamp),
            Value::Null => None,
        }
    }

    fn number_bits(n: f64) -> u64 {
        if n == 0.0 { 0.0f64.to_bits() } else { n.to_bits() }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.is_null() || other.is_null() {
            return self.is_null() && other.is_null();
        }
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Self::number_bits(*a) == Self::number_bits(*b),
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_null() {
            0u8.hash(state);
            return;
        }
        match self {
            Value::Number(n) => {
                1u8.hash(state);
                Self::number_bits(*n).hash(state);
            }
            Value::Timestamp(t) => {
                2u8.hash(state);
                t.hash(state);
            }
            Value::Text(s) => {
                3u8.hash(state);
                s.hash(state);
            }
            Value::Null => 0u8.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            v if v.is_null() => write!(f, "NULL"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Timestamp(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
            Value::Text(s) => write!(f, "{}", s),
            Value::Null => write!(f, "NULL"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
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

impl From<NaiveDateTime> for Value {
    fn from(t: NaiveDateTime) -> Self {
        Value::Timestamp(t)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// In-memory, read-only table: a schema plus row-major values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<ColumnSchema>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Builds a dataset, rejecting duplicate column names, ragged rows and
    /// values that do not match their column's type.
    pub fn new(columns: Vec<ColumnSchema>, rows: Vec<Vec<Value>>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                return Err(DomainError::InvalidDataset(format!(
                    "duplicate column name '{}'",
                    col.name
                )));
            }
        }

        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(DomainError::InvalidDataset(format!(
                    "row {} has {} values, expected {}",
                    idx,
                    row.len(),
                    columns.len()
                )));
            }
            for (value, col) in row.iter().zip(&columns) {
                if let Some(actual) = value.data_type() {
                    if actual != col.data_type {
                        return Err(DomainError::InvalidDataset(format!(
                            "row {} column '{}' holds a {} value in a {} column",
                            idx, col.name, actual, col.data_type
                        )));
                    }
                }
            }
        }

        Ok(Self { columns, rows })
    }

    /// Column-oriented constructor, mostly for tests and small fixtures.
    /// Every column must have the same length.
    pub fn from_columns(columns: Vec<(ColumnSchema, Vec<Value>)>) -> Result<Self, DomainError> {
        let height = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        if let Some((col, values)) = columns.iter().find(|(_, v)| v.len() != height) {
            return Err(DomainError::InvalidDataset(format!(
                "column '{}' has {} values, expected {}",
                col.name,
                values.len(),
                height
            )));
        }

        let mut rows = vec![Vec::with_capacity(columns.len()); height];
        let mut schema = Vec::with_capacity(columns.len());
        for (col, values) in columns {
            for (row, value) in rows.iter_mut().zip(values) {
                row.push(value);
            }
            schema.push(col);
        }

        Self::new(schema, rows)
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Iterates over the values of one column, top to bottom.
    pub fn column_values(&self, name: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Non-null numeric values of a column. Empty for non-numeric columns.
    pub fn numeric_values(&self, name: &str) -> Vec<f64> {
        self.column_values(name)
            .map(|values| values.filter_map(Value::as_number).collect())
            .unwrap_or_default()
    }

    pub fn null_count(&self, name: &str) -> usize {
        self.column_values(name)
            .map(|values| values.filter(|v| v.is_null()).count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_from_columns_builds_rows() -> Result<()> {
        let ds = Dataset::from_columns(vec![
            (
                ColumnSchema::new("id", DataType::Number),
                vec![1i64.into(), 2i64.into()],
            ),
            (
                ColumnSchema::new("name", DataType::Text),
                vec!["a".into(), Value::Null],
            ),
        ])?;

        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.column_count(), 2);
        assert_eq!(ds.rows()[1], vec![Value::Number(2.0), Value::Null]);
        assert_eq!(ds.null_count("name"), 1);
        assert_eq!(ds.numeric_values("id"), vec![1.0, 2.0]);
        Ok(())
    }

    #[test]
    fn test_rejects_type_mismatch() {
        let res = Dataset::from_columns(vec![(
            ColumnSchema::new("price", DataType::Number),
            vec![1i64.into(), "oops".into()],
        )]);
        assert!(matches!(res, Err(DomainError::InvalidDataset(_))));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let res = Dataset::new(
            vec![ColumnSchema::new("a", DataType::Number)],
            vec![vec![Value::Number(1.0), Value::Number(2.0)]],
        );
        assert!(matches!(res, Err(DomainError::InvalidDataset(_))));
    }

    #[test]
    fn test_rejects_duplicate_column_names() {
        let res = Dataset::new(
            vec![
                ColumnSchema::new("a", DataType::Number),
                ColumnSchema::new("a", DataType::Text),
            ],
            vec![],
        );
        assert!(matches!(res, Err(DomainError::InvalidDataset(_))));
    }

    #[test]
    fn test_values_serialize_untagged() -> Result<()> {
        let ts = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap();
        let row = vec![
            Value::Number(1.5),
            Value::Text("2024-03-01T10:00:00".into()),
            Value::Timestamp(ts),
            Value::Null,
        ];
        assert_eq!(
            serde_json::to_string(&row)?,
            r#"[1.5,"2024-03-01T10:00:00","2024-03-01T10:00:00",null]"#
        );
        Ok(())
    }

    #[test]
    fn test_nan_counts_as_null_and_equals_null() {
        assert!(Value::Number(f64::NAN).is_null());
        assert_eq!(Value::Number(f64::NAN), Value::Null);
        assert_eq!(Value::Number(-0.0), Value::Number(0.0));
        assert_ne!(Value::Number(1.0), Value::Text("1".into()));
    }

    #[test]
    fn test_nan_allowed_in_text_column() -> Result<()> {
        // NaN is a null, so it carries no type.
        let ds = Dataset::from_columns(vec![(
            ColumnSchema::new("name", DataType::Text),
            vec![Value::Number(f64::NAN)],
        )])?;
        assert_eq!(ds.null_count("name"), 1);
        Ok(())
    }
}

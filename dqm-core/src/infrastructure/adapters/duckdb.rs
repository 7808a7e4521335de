// dqm-core/src/infrastructure/adapters/duckdb.rs

use chrono::DateTime;
use duckdb::{Config, Connection};
use std::path::Path;
use tracing::{debug, instrument};

use crate::domain::dataset::{ColumnSchema, DataType, Dataset, Value};
use crate::error::DqmError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::dataset_source::{DatasetPreview, DatasetSource};

/// Loads tabular files through DuckDB's readers, which gives us type
/// inference (numbers, dates, timestamps) for free.
pub struct DuckDbSource {
    conn: Connection,
}

impl DuckDbSource {
    pub fn new() -> Result<Self, InfrastructureError> {
        let conn = Connection::open_in_memory_with_flags(Config::default())?;
        Ok(Self { conn })
    }

    fn describe(&self, relation: &str) -> Result<Vec<ColumnSchema>, InfrastructureError> {
        let mut stmt = self.conn.prepare(&format!("DESCRIBE SELECT * FROM {}", relation))?;
        let rows = stmt.query_map([], |row| {
            let name: String = row.get(0)?;
            let sql_type: String = row.get(1)?;
            Ok(ColumnSchema::new(name, map_sql_type(&sql_type)))
        })?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row?);
        }
        Ok(columns)
    }

    fn fetch(
        &self,
        relation: &str,
        columns: &[ColumnSchema],
        limit: Option<usize>,
    ) -> Result<Vec<Vec<Value>>, InfrastructureError> {
        let projection = columns
            .iter()
            .map(projection_for)
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!("SELECT {} FROM {}", projection, relation);
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        debug!(%sql, "Fetching rows");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(columns.len());
            for (i, col) in columns.iter().enumerate() {
                let value = match col.data_type {
                    DataType::Number => Value::from(row.get::<_, Option<f64>>(i)?),
                    DataType::Text => Value::from(row.get::<_, Option<String>>(i)?),
                    DataType::Timestamp => row
                        .get::<_, Option<i64>>(i)?
                        .and_then(DateTime::from_timestamp_micros)
                        .map(|dt| Value::Timestamp(dt.naive_utc()))
                        .unwrap_or(Value::Null),
                };
                values.push(value);
            }
            out.push(values);
        }
        Ok(out)
    }

    fn count(&self, relation: &str) -> Result<usize, InfrastructureError> {
        let total: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", relation),
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(total).unwrap_or(0))
    }
}

impl DatasetSource for DuckDbSource {
    #[instrument(skip(self))]
    fn load(&self, location: &str) -> Result<Dataset, DqmError> {
        let relation = relation_for(location)?;
        let columns = self.describe(&relation)?;
        let rows = self.fetch(&relation, &columns, None)?;
        debug!(columns = columns.len(), rows = rows.len(), "Dataset loaded");

        Ok(Dataset::new(columns, rows)?)
    }

    #[instrument(skip(self))]
    fn preview(&self, location: &str, limit: usize) -> Result<DatasetPreview, DqmError> {
        let relation = relation_for(location)?;
        let columns = self.describe(&relation)?;
        let rows = self.fetch(&relation, &columns, Some(limit))?;
        let total_rows = self.count(&relation)?;

        Ok(DatasetPreview {
            columns,
            rows,
            total_rows,
        })
    }
}

/// Table function matching the file extension. CSV is the fallback.
fn relation_for(location: &str) -> Result<String, InfrastructureError> {
    let path = Path::new(location);
    if !path.is_file() {
        return Err(InfrastructureError::DatasetNotFound(location.to_string()));
    }

    let reader = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("parquet") => "read_parquet",
        Some("json") | Some("ndjson") | Some("jsonl") => "read_json_auto",
        _ => "read_csv_auto",
    };

    Ok(format!("{}('{}')", reader, location.replace('\'', "''")))
}

/// Every value leaves DuckDB as DOUBLE, VARCHAR or epoch microseconds so
/// the row decoder only deals with three Rust types.
fn projection_for(col: &ColumnSchema) -> String {
    let ident = format!("\"{}\"", col.name.replace('"', "\"\""));
    match col.data_type {
        DataType::Number => format!("CAST({} AS DOUBLE)", ident),
        DataType::Timestamp => format!("epoch_us(CAST({} AS TIMESTAMP))", ident),
        DataType::Text => format!("CAST({} AS VARCHAR)", ident),
    }
}

/// Only scalar numeric and temporal types map to their logical type. Nested
/// types (`BIGINT[]`, `STRUCT(...)`, `MAP(...)`, `UNION(...)`) are read as text.
fn map_sql_type(sql_type: &str) -> DataType {
    let upper = sql_type.trim().to_ascii_uppercase();
    if upper.contains('[') || NESTED.iter().any(|t| upper.starts_with(t)) {
        return DataType::Text;
    }

    // DECIMAL(10,2) -> DECIMAL
    let base = upper.split('(').next().unwrap_or_default().trim();
    if NUMERIC.contains(&base) {
        DataType::Number
    } else if TEMPORAL.contains(&base) {
        DataType::Timestamp
    } else {
        DataType::Text
    }
}

const NESTED: [&str; 3] = ["STRUCT", "MAP", "UNION"];

const NUMERIC: [&str; 16] = [
    "TINYINT", "SMALLINT", "INTEGER", "BIGINT", "HUGEINT", "UTINYINT", "USMALLINT", "UINTEGER",
    "UBIGINT", "UHUGEINT", "FLOAT", "DOUBLE", "REAL", "DECIMAL", "NUMERIC", "VARINT",
];

const TEMPORAL: [&str; 7] = [
    "DATE",
    "TIMESTAMP",
    "TIMESTAMP_S",
    "TIMESTAMP_MS",
    "TIMESTAMP_NS",
    "TIMESTAMP WITH TIME ZONE",
    "TIMESTAMPTZ",
];

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::tempdir;

    const CSV: &str = "\
transaction_id,customer,transaction_date,price
1,alice,2024-03-01 10:00:00,19.99
2,bob,2024-03-02 11:30:00,
3,,2024-03-03 09:15:00,-4.5
";

    #[test]
    fn test_load_csv_with_inferred_types() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("transactions.csv");
        fs::write(&path, CSV)?;

        let source = DuckDbSource::new()?;
        let ds = source.load(path.to_str().expect("utf-8 path"))?;

        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.column("transaction_id").unwrap().data_type, DataType::Number);
        assert_eq!(ds.column("customer").unwrap().data_type, DataType::Text);
        assert_eq!(
            ds.column("transaction_date").unwrap().data_type,
            DataType::Timestamp
        );
        assert_eq!(ds.column("price").unwrap().data_type, DataType::Number);

        assert_eq!(ds.null_count("price"), 1);
        assert_eq!(ds.null_count("customer"), 1);
        assert_eq!(ds.numeric_values("price"), vec![19.99, -4.5]);

        let expected = NaiveDate::from_ymd_opt(2024, 3, 3)
            .and_then(|d| d.and_hms_opt(9, 15, 0))
            .expect("valid date");
        let last = ds.column_values("transaction_date").unwrap().last().cloned();
        assert_eq!(last, Some(Value::Timestamp(expected)));
        Ok(())
    }

    #[test]
    fn test_preview_limits_rows() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("transactions.csv");
        fs::write(&path, CSV)?;

        let preview = DuckDbSource::new()?.preview(path.to_str().expect("utf-8 path"), 2)?;
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.total_rows, 3);
        assert_eq!(preview.columns.len(), 4);
        Ok(())
    }

    #[test]
    fn test_missing_file() -> Result<()> {
        let res = DuckDbSource::new()?.load("/no/such/file.csv");
        assert!(matches!(
            res,
            Err(DqmError::Infrastructure(InfrastructureError::DatasetNotFound(_)))
        ));
        Ok(())
    }

    #[test]
    fn test_sql_type_mapping() {
        assert_eq!(map_sql_type("BIGINT"), DataType::Number);
        assert_eq!(map_sql_type("DECIMAL(10,2)"), DataType::Number);
        assert_eq!(map_sql_type("TIMESTAMP WITH TIME ZONE"), DataType::Timestamp);
        assert_eq!(map_sql_type("DATE"), DataType::Timestamp);
        assert_eq!(map_sql_type("VARCHAR"), DataType::Text);
        assert_eq!(map_sql_type("BOOLEAN"), DataType::Text);
        assert_eq!(map_sql_type("INTERVAL"), DataType::Text);
        assert_eq!(map_sql_type("UBIGINT"), DataType::Number);
        assert_eq!(map_sql_type("TIMESTAMP_NS"), DataType::Timestamp);
    }

    #[test]
    fn test_nested_types_are_text() {
        assert_eq!(map_sql_type("BIGINT[]"), DataType::Text);
        assert_eq!(map_sql_type("INTEGER[3]"), DataType::Text);
        assert_eq!(map_sql_type("STRUCT(a INTEGER)"), DataType::Text);
        assert_eq!(map_sql_type("MAP(VARCHAR, BIGINT)"), DataType::Text);
        assert_eq!(map_sql_type("UNION(num INTEGER, str VARCHAR)"), DataType::Text);
        assert_eq!(map_sql_type("TIMESTAMP[]"), DataType::Text);
    }

    #[test]
    fn test_load_json_with_nested_columns() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("orders.json");
        fs::write(
            &path,
            r#"[
                {"id": 1, "tags": [1, 2], "meta": {"a": 1}, "price": 9.5},
                {"id": 2, "tags": [3], "meta": {"a": 2}, "price": 12.0}
            ]"#,
        )?;

        let ds = DuckDbSource::new()?.load(path.to_str().expect("utf-8 path"))?;

        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.column("id").unwrap().data_type, DataType::Number);
        assert_eq!(ds.column("tags").unwrap().data_type, DataType::Text);
        assert_eq!(ds.column("meta").unwrap().data_type, DataType::Text);
        assert_eq!(ds.numeric_values("price"), vec![9.5, 12.0]);
        assert_eq!(ds.null_count("tags"), 0);
        Ok(())
    }

    #[test]
    fn test_identifiers_are_quoted() {
        let col = ColumnSchema::new("odd\"name", DataType::Number);
        assert_eq!(projection_for(&col), "CAST(\"odd\"\"name\" AS DOUBLE)");
    }
}

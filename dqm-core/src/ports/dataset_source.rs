// dqm-core/src/ports/dataset_source.rs

// What the application needs to get a table into memory, without knowing
// whether it comes from a CSV file, a Parquet file or a test fixture.

use crate::domain::dataset::{ColumnSchema, Dataset, Value};
use crate::error::DqmError;

/// First rows of a dataset plus its schema, for quick inspection.
#[derive(Debug, Clone)]
pub struct DatasetPreview {
    pub columns: Vec<ColumnSchema>,
    pub rows: Vec<Vec<Value>>,
    pub total_rows: usize,
}

pub trait DatasetSource {
    /// Loads the full dataset found at `location`.
    fn load(&self, location: &str) -> Result<Dataset, DqmError>;

    /// Loads the schema and at most `limit` rows.
    fn preview(&self, location: &str, limit: usize) -> Result<DatasetPreview, DqmError> {
        let dataset = self.load(location)?;
        Ok(DatasetPreview {
            columns: dataset.columns().to_vec(),
            rows: dataset.rows().iter().take(limit).cloned().collect(),
            total_rows: dataset.row_count(),
        })
    }
}

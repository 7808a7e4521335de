// dqm-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

/// Broad classification used by callers that only care whether the rule set
/// or the data was at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Data,
}

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Configuration Error: {0}")]
    #[diagnostic(
        code(dqm::domain::config),
        help("Every section (freshness, completeness, validity, consistency, thresholds) is required.")
    )]
    Config(String),

    #[error("Column '{column}' required by the {check} check is missing from the dataset")]
    #[diagnostic(code(dqm::domain::missing_column))]
    MissingColumn { check: String, column: String },

    #[error("Column '{column}' contains a value that is not a timestamp: '{value}'")]
    #[diagnostic(
        code(dqm::domain::timestamp),
        help("Supported formats: 'YYYY-MM-DD HH:MM:SS', ISO 8601 / RFC 3339, 'YYYY-MM-DD'.")
    )]
    UnparseableTimestamp { column: String, value: String },

    #[error("Column '{0}' holds no timestamp to measure freshness against")]
    #[diagnostic(code(dqm::domain::no_timestamps))]
    NoTimestamps(String),

    #[error("Dataset has no rows")]
    #[diagnostic(code(dqm::domain::empty_dataset))]
    EmptyDataset,

    #[error("Invalid dataset: {0}")]
    #[diagnostic(code(dqm::domain::dataset))]
    InvalidDataset(String),

    #[error("No check produced a result, cannot compute an aggregate score")]
    #[diagnostic(code(dqm::domain::no_results))]
    NoResults,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Config(_) => ErrorKind::Config,
            _ => ErrorKind::Data,
        }
    }
}

// dqm-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(dqm::infra::database::duckdb),
        help("An error occurred inside the SQL engine while reading the dataset.")
    )]
    DuckDB(#[from] duckdb::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(dqm::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- REPORT SERIALIZATION ---
    #[error("JSON Error: {0}")]
    #[diagnostic(code(dqm::infra::json))]
    JsonError(#[from] serde_json::Error),

    // --- CONFIG ---

    #[error("Rule configuration not found at '{0}'")]
    #[diagnostic(
        code(dqm::infra::config_missing),
        help("Pass --config or set DQM_CONFIG.")
    )]
    ConfigNotFound(String),

    // --- DATASETS ---
    #[error("Dataset not found at '{0}'")]
    #[diagnostic(code(dqm::infra::dataset_missing))]
    DatasetNotFound(String),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(code(dqm::infra::template))]
    TemplateError(#[from] minijinja::Error),
}

// Manual implementation for shortcuts (e.g. `?` operator on duckdb calls)
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}

// dqm-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DqmError {
    // --- DOMAIN ERRORS (rule config, dataset contract) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, parsing, DuckDB) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

impl DqmError {
    /// The domain error behind this one, if any.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            DqmError::Domain(e) => Some(e),
            _ => None,
        }
    }
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for DqmError {
    fn from(err: std::io::Error) -> Self {
        DqmError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<duckdb::Error> for DqmError {
    fn from(err: duckdb::Error) -> Self {
        DqmError::Infrastructure(InfrastructureError::from(err))
    }
}

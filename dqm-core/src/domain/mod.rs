pub mod dataset;
pub mod error;
pub mod quality;
pub mod rules;

// Handy re-exports to keep imports short elsewhere
pub use dataset::{ColumnSchema, DataType, Dataset, Value};
pub use error::{DomainError, ErrorKind};
pub use rules::RuleConfig;

// dqm-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts the application needs from the outside world (DatasetSource...)
pub mod ports;

// 2. Domain (business core)
// Dataset model, rule configuration, check families, scoring.
// Depends on NOTHING else (no infra, no app).
pub mod domain;

// 3. Infrastructure (Adapters)
// DuckDB loader, config files, Jinja rendering, filesystem.
pub mod infrastructure;

// 4. Application (Use Cases)
// Engine runner, report generation, console summary.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use application::{QualityEngine, run_all_checks, run_all_checks_at};
pub use domain::quality::{CheckResult, CheckStatus, QualityLevel, QualityReport};
pub use domain::rules::RuleConfig;
pub use error::DqmError;

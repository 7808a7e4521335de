// dqm-core/src/application/mod.rs

pub mod engine;
pub mod ports;
pub mod report;
pub mod summary;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI do `use dqm_core::application::{run_all_checks, ReportGenerator};`
// without knowing the internal file layout.

pub use engine::{QualityEngine, run_all_checks, run_all_checks_at};
pub use report::{ReportFormats, ReportGenerator, WrittenReports};
pub use summary::render_console_summary;

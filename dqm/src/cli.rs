// dqm/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dqm")]
#[command(about = "Rule-driven data quality monitoring for tabular datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Html,
    Json,
    All,
    None,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔍 Runs every quality check and prints the score
    Check {
        /// Dataset file (CSV, Parquet or JSON)
        #[arg(long, short)]
        data: PathBuf,

        /// Rule configuration (YAML or JSON)
        #[arg(long, short, env = "DQM_CONFIG", default_value = "config/quality_rules.yaml")]
        config: PathBuf,

        /// Display name used in the reports (default: file stem)
        #[arg(long)]
        name: Option<String>,

        /// Directory receiving the report artifacts
        #[arg(long, default_value = "reports")]
        report_dir: PathBuf,

        /// Which report artifacts to write
        #[arg(long, value_enum, default_value = "all")]
        format: ReportFormat,

        /// Exit with an error when the overall score is below this value
        #[arg(long)]
        fail_under: Option<f64>,
    },

    /// 🕵️ Shows the inferred schema and a few rows of a dataset
    Inspect {
        /// Dataset file (CSV, Parquet or JSON)
        #[arg(long, short)]
        data: PathBuf,

        /// Number of sample rows to display
        #[arg(long, default_value = "5")]
        limit: usize,
    },
}

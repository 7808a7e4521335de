// dqm/src/commands/check.rs
//
// USE CASE: Evaluate a dataset against the rule set and write the reports.

use anyhow::{Context, bail};
use std::path::{Path, PathBuf};

use dqm_core::application::{ReportFormats, ReportGenerator, render_console_summary};
use dqm_core::infrastructure::adapters::DuckDbSource;
use dqm_core::infrastructure::config::load_rule_config;
use dqm_core::infrastructure::render::JinjaRenderer;
use dqm_core::ports::DatasetSource;
use dqm_core::{QualityEngine, QualityLevel};

use crate::cli::ReportFormat;

pub struct CheckArgs {
    pub data: PathBuf,
    pub config: PathBuf,
    pub name: Option<String>,
    pub report_dir: PathBuf,
    pub format: ReportFormat,
    pub fail_under: Option<f64>,
}

pub fn execute(args: CheckArgs) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the rules (Infra)
    let rules = load_rule_config(&args.config).with_context(|| {
        format!("Failed to load rule configuration from {:?}", args.config)
    })?;
    let engine = QualityEngine::new(rules)?;

    // B. Load the dataset through DuckDB
    let location = args
        .data
        .to_str()
        .with_context(|| format!("Dataset path is not valid UTF-8: {:?}", args.data))?;
    println!("📂 Loading dataset: {}", location);
    let source = DuckDbSource::new().context("Failed to start DuckDB")?;
    let dataset = source
        .load(location)
        .with_context(|| format!("Failed to load dataset {:?}", args.data))?;
    println!("✅ {} rows loaded\n", dataset.row_count());

    // C. Run the checks (Application Layer)
    let report = engine.run(&dataset)?;
    let dataset_name = args.name.unwrap_or_else(|| dataset_label(&args.data));
    let thresholds = &engine.rules().thresholds;

    println!("{}", render_console_summary(&dataset_name, &report, thresholds));

    // D. Write the artifacts
    if let Some(formats) = report_formats(args.format) {
        let renderer = JinjaRenderer::new();
        let written = ReportGenerator::generate(
            &args.report_dir,
            &dataset_name,
            &report,
            thresholds,
            &renderer,
            formats,
        )
        .with_context(|| format!("Failed to write reports to {:?}", args.report_dir))?;

        for path in written.html.iter().chain(written.json.iter()) {
            println!("📝 Report written: {}", path.display());
        }
    }

    println!("\n⏱️  Finished in {:.2?}", start.elapsed());

    if let Some(min) = args.fail_under {
        if report.score() < min {
            bail!(
                "Quality score {:.1}% is below the required {:.1}% ({})",
                report.score(),
                min,
                engine.level(&report)
            );
        }
    }

    if engine.level(&report) == QualityLevel::Low {
        tracing::warn!(score = report.score(), "Dataset quality is low");
    }

    Ok(())
}

fn report_formats(format: ReportFormat) -> Option<ReportFormats> {
    match format {
        ReportFormat::None => None,
        ReportFormat::All => Some(ReportFormats::ALL),
        ReportFormat::Html => Some(ReportFormats {
            html: true,
            json: false,
        }),
        ReportFormat::Json => Some(ReportFormats {
            html: false,
            json: true,
        }),
    }
}

fn dataset_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::application::ports::TemplateEngine;
use crate::domain::quality::{CheckResult, QualityLevel, QualityReport, StatusCounts};
use crate::domain::rules::Thresholds;
use crate::error::DqmError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

// --- DTOs (Data Transfer Objects) ---
// Exactly what the JSON artifact and the HTML page display.

#[derive(Debug, Serialize)]
pub struct ReportArtifact {
    pub dataset: String,
    pub generated_at: String,
    pub score: f64,
    pub level: QualityLevel,
    pub level_label: String,
    pub level_color: String,
    pub level_emoji: String,
    pub counts: StatusCounts,
    pub results: Vec<ReportRow>,
}

#[derive(Debug, Serialize)]
pub struct ReportRow {
    #[serde(flatten)]
    pub result: CheckResult,
    pub status_color: String,
}

impl ReportArtifact {
    pub fn new(
        dataset_name: &str,
        report: &QualityReport,
        thresholds: &Thresholds,
        generated_at: DateTime<Local>,
    ) -> Self {
        let level = QualityLevel::from_score(report.score(), thresholds);
        Self {
            dataset: dataset_name.to_string(),
            generated_at: generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            score: report.score(),
            level,
            level_label: level.as_str().to_string(),
            level_color: level.color().to_string(),
            level_emoji: level.emoji().to_string(),
            counts: report.status_counts(),
            results: report
                .results()
                .iter()
                .map(|r| ReportRow {
                    result: r.clone(),
                    status_color: status_color(r).to_string(),
                })
                .collect(),
        }
    }
}

fn status_color(result: &CheckResult) -> &'static str {
    use crate::domain::quality::CheckStatus;
    match result.status {
        CheckStatus::Pass => "#22c55e",
        CheckStatus::Warning => "#f97316",
        CheckStatus::Fail => "#ef4444",
    }
}

/// Which artifacts to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportFormats {
    pub html: bool,
    pub json: bool,
}

impl ReportFormats {
    pub const ALL: Self = Self {
        html: true,
        json: true,
    };
}

/// Paths of the artifacts actually written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenReports {
    pub html: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

// --- GENERATOR SERVICE ---

pub struct ReportGenerator;

impl ReportGenerator {
    /// Writes `quality_report_<timestamp>.{json,html}` into `report_dir`.
    pub fn generate(
        report_dir: &Path,
        dataset_name: &str,
        report: &QualityReport,
        thresholds: &Thresholds,
        renderer: &dyn TemplateEngine,
        formats: ReportFormats,
    ) -> Result<WrittenReports, DqmError> {
        let now = Local::now();
        let artifact = ReportArtifact::new(dataset_name, report, thresholds, now);
        let stem = format!("quality_report_{}", now.format("%Y%m%d_%H%M%S"));
        let mut written = WrittenReports::default();

        let context = serde_json::to_value(&artifact).map_err(InfrastructureError::from)?;

        if formats.json {
            let json_path = report_dir.join(format!("{}.json", stem));
            let json_content =
                serde_json::to_string_pretty(&context).map_err(InfrastructureError::from)?;
            atomic_write(&json_path, json_content)?;
            info!(path = ?json_path, "JSON report written");
            written.json = Some(json_path);
        }

        if formats.html {
            let html_path = report_dir.join(format!("{}.html", stem));
            let html_content = renderer.render("quality_report.html", HTML_TEMPLATE, &context)?;
            atomic_write(&html_path, html_content)?;
            info!(path = ?html_path, "HTML report written");
            written.html = Some(html_path);
        }

        Ok(written)
    }
}

// --- EMBEDDED HTML TEMPLATE ---
const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Data Quality Report - {{ dataset }}</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background: #f3f4f6; padding: 20px; }
        .container { max-width: 1200px; margin: 0 auto; background: white; border-radius: 12px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); overflow: hidden; }
        .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 40px; text-align: center; }
        .header h1 { font-size: 32px; margin-bottom: 10px; }
        .score-section { display: flex; justify-content: space-around; padding: 30px; background: #fafafa; border-bottom: 2px solid #e5e7eb; }
        .score-card { text-align: center; padding: 20px; background: white; border-radius: 8px; flex: 1; margin: 0 10px; }
        .score-value { font-size: 48px; font-weight: bold; color: {{ level_color }}; margin: 10px 0; }
        .score-label { color: #6b7280; font-size: 14px; text-transform: uppercase; letter-spacing: 1px; }
        .stats { display: flex; justify-content: center; gap: 30px; margin-top: 15px; }
        .stat-number { font-size: 24px; font-weight: bold; }
        .pass { color: #22c55e; } .warning { color: #f97316; } .fail { color: #ef4444; }
        .content { padding: 40px; }
        table { width: 100%; border-collapse: collapse; margin-top: 20px; }
        th { background: #f9fafb; padding: 12px; text-align: left; color: #374151; border-bottom: 2px solid #e5e7eb; }
        td { padding: 12px; border-bottom: 1px solid #e5e7eb; }
        .badge { color: white; padding: 4px 12px; border-radius: 12px; font-weight: bold; font-size: 12px; }
        .footer { background: #f9fafb; padding: 20px; text-align: center; color: #6b7280; font-size: 14px; }
    </style>
</head>
<body>
<div class="container">
    <div class="header">
        <h1>Data Quality Report</h1>
        <p>Dataset: <strong>{{ dataset }}</strong></p>
        <p>Generated {{ generated_at }}</p>
    </div>
    <div class="score-section">
        <div class="score-card">
            <div class="score-label">Overall Quality Score</div>
            <div class="score-value">{{ level_emoji }} {{ score|pct }}</div>
            <div style="font-size: 18px; color: {{ level_color }}; font-weight: bold;">{{ level_label }}</div>
        </div>
        <div class="score-card">
            <div class="score-label">Checks</div>
            <div class="stats">
                <div><div class="stat-number pass">{{ counts.pass }}</div>PASS</div>
                <div><div class="stat-number warning">{{ counts.warning }}</div>WARNING</div>
                <div><div class="stat-number fail">{{ counts.fail }}</div>FAIL</div>
            </div>
        </div>
    </div>
    <div class="content">
        <h2>Check Details</h2>
        <table>
            <thead>
                <tr><th>Check</th><th>Status</th><th>Details</th><th style="text-align: center;">Score</th></tr>
            </thead>
            <tbody>
            {%- for row in results %}
                <tr>
                    <td>{{ row.check }}</td>
                    <td><span class="badge" style="background: {{ row.status_color }};">{{ row.status }}</span></td>
                    <td>{{ row.details }}</td>
                    <td style="text-align: center; font-weight: bold;">{{ row.score|pct }}</td>
                </tr>
            {%- endfor %}
            </tbody>
        </table>
    </div>
    <div class="footer">Data Quality Monitor</div>
</div>
</body>
</html>
"#;

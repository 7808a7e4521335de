// dqm-core/src/application/summary.rs

use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL};
use std::fmt::Write;

use crate::domain::quality::{CheckStatus, QualityLevel, QualityReport};
use crate::domain::rules::Thresholds;

fn status_marker(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "✅",
        CheckStatus::Warning => "⚠️",
        CheckStatus::Fail => "❌",
    }
}

/// Console rendering of a finished run: headline score and level, then one
/// table row per check.
pub fn render_console_summary(
    dataset_name: &str,
    report: &QualityReport,
    thresholds: &Thresholds,
) -> String {
    let level = QualityLevel::from_score(report.score(), thresholds);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Check", "Status", "Score", "Details"]);
    for result in report.results() {
        table.add_row(vec![
            Cell::new(&result.check),
            Cell::new(format!("{} {}", status_marker(result.status), result.status)),
            Cell::new(format!("{:.1}%", result.score)).set_alignment(CellAlignment::Right),
            Cell::new(&result.details),
        ]);
    }

    let counts = report.status_counts();
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "📁 Dataset: {}", dataset_name);
    let _ = writeln!(out, "🎯 Overall score: {:.1}%", report.score());
    let _ = writeln!(out, "📈 Level: {} {}", level.emoji(), level);
    let _ = writeln!(
        out,
        "   {} passed, {} warnings, {} failed",
        counts.pass, counts.warning, counts.fail
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", table);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::quality::CheckResult;

    #[test]
    fn test_summary_lists_every_check() {
        let report = QualityReport::from_results(vec![
            CheckResult::new("Freshness", CheckStatus::Pass, "Last update 2.0h ago (limit: 24h)", 100.0),
            CheckResult::new("Outliers - quantity", CheckStatus::Warning, "7 outliers (7.00%)", 65.0),
        ])
        .unwrap();

        let text = render_console_summary("orders", &report, &Thresholds::default());

        assert!(text.contains("📁 Dataset: orders"));
        assert!(text.contains("🎯 Overall score: 82.5%"));
        assert!(text.contains("Level: 🟡 Good"));
        assert!(text.contains("1 passed, 1 warnings, 0 failed"));
        assert!(text.contains("Outliers - quantity"));
        assert!(text.contains("65.0%"));
    }
}

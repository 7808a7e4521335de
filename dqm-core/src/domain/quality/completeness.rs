// dqm-core/src/domain/quality/completeness.rs

use std::collections::BTreeSet;

use crate::domain::dataset::Dataset;
use crate::domain::quality::result::{CheckResult, CheckStatus};
use crate::domain::quality::stats::{decayed_score, percentage};
use crate::domain::rules::CompletenessRule;

pub const COLUMNS_CHECK: &str = "Completeness - Columns";
pub const NULLS_CHECK: &str = "Completeness - Nulls";

/// Points lost per column above the null budget.
const PENALTY_PER_COLUMN: f64 = 20.0;

/// Column presence first; the null budget is only measured when every
/// required column exists. A missing column degrades to a FAIL result.
pub fn check_completeness(dataset: &Dataset, rule: &CompletenessRule) -> Vec<CheckResult> {
    let required = rule.unique_required_columns();

    let missing: BTreeSet<&str> = required
        .iter()
        .copied()
        .filter(|c| !dataset.has_column(c))
        .collect();
    if !missing.is_empty() {
        let listed: Vec<&str> = missing.into_iter().collect();
        return vec![CheckResult::new(
            COLUMNS_CHECK,
            CheckStatus::Fail,
            format!("Missing columns: {}", listed.join(", ")),
            0.0,
        )];
    }

    let issues: Vec<(&str, f64)> = required
        .iter()
        .map(|c| (*c, percentage(dataset.null_count(c), dataset.row_count())))
        .filter(|(_, pct)| *pct > rule.max_null_percentage)
        .collect();

    let result = if issues.is_empty() {
        CheckResult::new(
            NULLS_CHECK,
            CheckStatus::Pass,
            format!(
                "All columns have <={}% null values",
                rule.max_null_percentage
            ),
            100.0,
        )
    } else {
        let listed: Vec<String> = issues
            .iter()
            .map(|(col, pct)| format!("{}: {:.2}%", col, pct))
            .collect();
        CheckResult::new(
            NULLS_CHECK,
            CheckStatus::Fail,
            format!(
                "{} columns with >{}% nulls: {}",
                issues.len(),
                rule.max_null_percentage,
                listed.join(", ")
            ),
            decayed_score(issues.len() as f64, PENALTY_PER_COLUMN),
        )
    };

    vec![result]
}

// dqm-core/src/domain/quality/validity.rs

use crate::domain::dataset::Dataset;
use crate::domain::quality::result::{CheckResult, CheckStatus};
use crate::domain::quality::stats::{decayed_score, percentage};
use crate::domain::rules::{Bounds, ValidityRules};

const PASS_BELOW_PCT: f64 = 1.0;
const PENALTY_PER_PCT: f64 = 10.0;

pub fn check_name(column: &str) -> String {
    format!("Validity - {}", column)
}

/// One result per configured column that exists in the dataset, in rule order.
/// Columns absent from the dataset are skipped without a result.
pub fn check_validity(dataset: &Dataset, rules: &ValidityRules) -> Vec<CheckResult> {
    rules
        .iter()
        .filter(|rule| dataset.has_column(&rule.column))
        .map(|rule| check_column(dataset, &rule.column, &rule.bounds))
        .collect()
}

fn check_column(dataset: &Dataset, column: &str, bounds: &Bounds) -> CheckResult {
    let values = dataset.numeric_values(column);
    let invalid_count = count_violations(&values, bounds);
    let invalid_pct = percentage(invalid_count, dataset.row_count());

    let status = if invalid_pct < PASS_BELOW_PCT {
        CheckStatus::Pass
    } else {
        CheckStatus::Fail
    };

    CheckResult::new(
        check_name(column),
        status,
        format!("{} invalid values ({:.2}%)", invalid_count, invalid_pct),
        decayed_score(invalid_pct, PENALTY_PER_PCT),
    )
}

// Each bound is counted on its own and the counts are summed.
fn count_violations(values: &[f64], bounds: &Bounds) -> usize {
    let below = bounds
        .min
        .map_or(0, |min| values.iter().filter(|v| **v < min).count());
    let above = bounds
        .max
        .map_or(0, |max| values.iter().filter(|v| **v > max).count());
    below + above
}

// dqm-core/src/domain/quality/duplicates.rs

use std::collections::HashSet;

use crate::domain::dataset::Dataset;
use crate::domain::quality::result::{CheckResult, CheckStatus};
use crate::domain::quality::stats::{decayed_score, percentage};
use crate::domain::rules::ConsistencyRule;

pub const CHECK_NAME: &str = "Duplicates";

const PENALTY_PER_PCT: f64 = 20.0;

/// Full-row duplicates. Never fails, only warns.
pub fn check_duplicates(dataset: &Dataset, rule: &ConsistencyRule) -> CheckResult {
    let duplicate_count = count_duplicate_rows(dataset);
    let duplicate_pct = percentage(duplicate_count, dataset.row_count());

    let status = if duplicate_pct <= rule.duplicate_threshold {
        CheckStatus::Pass
    } else {
        CheckStatus::Warning
    };

    CheckResult::new(
        CHECK_NAME,
        status,
        format!("{} duplicates ({:.2}%)", duplicate_count, duplicate_pct),
        decayed_score(duplicate_pct, PENALTY_PER_PCT),
    )
}

/// Rows equal to some earlier row. The first occurrence is not counted.
pub fn count_duplicate_rows(dataset: &Dataset) -> usize {
    let mut seen = HashSet::with_capacity(dataset.row_count());
    dataset
        .rows()
        .iter()
        .filter(|row| !seen.insert(row.as_slice()))
        .count()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::dataset::{ColumnSchema, DataType, Value};

    fn dataset(ids: Vec<Value>) -> Dataset {
        let labels = ids
            .iter()
            .map(|v| {
                if v.is_null() {
                    Value::Null
                } else {
                    Value::Text(format!("row-{}", v))
                }
            })
            .collect();
        Dataset::from_columns(vec![
            (ColumnSchema::new("id", DataType::Number), ids),
            (ColumnSchema::new("label", DataType::Text), labels),
        ])
        .unwrap()
    }

    #[test]
    fn test_repeats_beyond_first_are_counted() {
        // 95 distinct rows + 5 repeats of row 0
        let mut ids: Vec<Value> = (0..95).map(|i| Value::Number(i as f64)).collect();
        ids.extend((0..5).map(|_| Value::Number(0.0)));
        let ds = dataset(ids);

        let res = check_duplicates(
            &ds,
            &ConsistencyRule {
                duplicate_threshold: 2.0,
            },
        );
        assert_eq!(res.status, CheckStatus::Warning);
        assert_eq!(res.score, 0.0);
        insta::assert_snapshot!(res.details, @"5 duplicates (5.00%)");
    }

    #[test]
    fn test_within_threshold_passes() {
        let mut ids: Vec<Value> = (0..99).map(|i| Value::Number(i as f64)).collect();
        ids.push(Value::Number(10.0));
        let ds = dataset(ids);

        let res = check_duplicates(
            &ds,
            &ConsistencyRule {
                duplicate_threshold: 2.0,
            },
        );
        assert_eq!(res.status, CheckStatus::Pass);
        assert!((res.score - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_null_rows_compare_equal() {
        let ds = dataset(vec![Value::Null, Value::Number(f64::NAN), Value::Null]);
        assert_eq!(count_duplicate_rows(&ds), 2);
    }

    #[test]
    fn test_partial_match_is_not_a_duplicate() {
        let ds = Dataset::from_columns(vec![
            (
                ColumnSchema::new("a", DataType::Number),
                vec![Value::Number(1.0), Value::Number(1.0)],
            ),
            (
                ColumnSchema::new("b", DataType::Text),
                vec!["x".into(), "y".into()],
            ),
        ])
        .unwrap();
        assert_eq!(count_duplicate_rows(&ds), 0);
    }
}

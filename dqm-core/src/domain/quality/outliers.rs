// dqm-core/src/domain/quality/outliers.rs

use crate::domain::dataset::{DataType, Dataset};
use crate::domain::quality::result::{CheckResult, CheckStatus};
use crate::domain::quality::stats::{Quartiles, decayed_score, percentage};

const PASS_BELOW_PCT: f64 = 5.0;
const PENALTY_PER_PCT: f64 = 5.0;

pub fn check_name(column: &str) -> String {
    format!("Outliers - {}", column)
}

/// IQR fences on every numeric column, in schema order. Other columns
/// produce no result. Never fails, only warns.
pub fn check_outliers(dataset: &Dataset) -> Vec<CheckResult> {
    dataset
        .columns()
        .iter()
        .filter(|c| c.data_type == DataType::Number)
        .map(|c| check_column(dataset, &c.name))
        .collect()
}

fn check_column(dataset: &Dataset, column: &str) -> CheckResult {
    let values = dataset.numeric_values(column);
    let outlier_count = Quartiles::from_values(&values).map_or(0, |q| {
        let (lower, upper) = q.fences();
        values.iter().filter(|v| **v < lower || **v > upper).count()
    });
    let outlier_pct = percentage(outlier_count, dataset.row_count());

    let status = if outlier_pct < PASS_BELOW_PCT {
        CheckStatus::Pass
    } else {
        CheckStatus::Warning
    };

    CheckResult::new(
        check_name(column),
        status,
        format!("{} outliers ({:.2}%)", outlier_count, outlier_pct),
        decayed_score(outlier_pct, PENALTY_PER_PCT),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::dataset::{ColumnSchema, Value};

    fn numbers(values: &[f64]) -> Vec<Value> {
        values.iter().map(|v| Value::Number(*v)).collect()
    }

    #[test]
    fn test_no_extreme_values_pass() {
        let values: Vec<f64> = (1..=20).map(f64::from).collect();
        let ds = Dataset::from_columns(vec![(
            ColumnSchema::new("quantity", DataType::Number),
            numbers(&values),
        )])
        .unwrap();

        let results = check_outliers(&ds);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].check, "Outliers - quantity");
        assert_eq!(results[0].status, CheckStatus::Pass);
        assert_eq!(results[0].score, 100.0);
        insta::assert_snapshot!(results[0].details, @"0 outliers (0.00%)");
    }

    #[test]
    fn test_extreme_value_warns() {
        // Q1 = 2.25, Q3 = 4, fences [-0.375, 6.625]: 1 of 10 rows is out -> 10%
        let ds = Dataset::from_columns(vec![(
            ColumnSchema::new("amount", DataType::Number),
            numbers(&[1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0, 4.0, 5.0, 1000.0]),
        )])
        .unwrap();

        let res = &check_outliers(&ds)[0];
        assert_eq!(res.status, CheckStatus::Warning);
        assert!((res.score - 50.0).abs() < 1e-9);
        assert_eq!(res.details, "1 outliers (10.00%)");
    }

    #[test]
    fn test_only_numeric_columns_are_checked() {
        let ds = Dataset::from_columns(vec![
            (
                ColumnSchema::new("name", DataType::Text),
                vec!["a".into(), "b".into()],
            ),
            (ColumnSchema::new("x", DataType::Number), numbers(&[1.0, 2.0])),
            (ColumnSchema::new("y", DataType::Number), numbers(&[3.0, 4.0])),
        ])
        .unwrap();

        let checks: Vec<String> = check_outliers(&ds).into_iter().map(|r| r.check).collect();
        assert_eq!(checks, vec!["Outliers - x", "Outliers - y"]);
    }

    #[test]
    fn test_all_null_column_has_no_outliers() {
        let ds = Dataset::from_columns(vec![(
            ColumnSchema::new("x", DataType::Number),
            vec![Value::Null, Value::Null],
        )])
        .unwrap();
        let res = &check_outliers(&ds)[0];
        assert_eq!(res.status, CheckStatus::Pass);
        assert_eq!(res.score, 100.0);
    }
}

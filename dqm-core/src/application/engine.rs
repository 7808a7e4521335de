// dqm-core/src/application/engine.rs

use chrono::{Local, NaiveDateTime};
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::domain::dataset::Dataset;
use crate::domain::error::DomainError;
use crate::domain::quality::{CheckContext, CheckFamily, QualityLevel, QualityReport};
use crate::domain::rules::RuleConfig;
use crate::error::DqmError;

/// Runs every check family against `dataset`, measuring freshness against
/// the local wall clock.
pub fn run_all_checks(dataset: &Dataset, rules: &RuleConfig) -> Result<QualityReport, DqmError> {
    run_all_checks_at(dataset, rules, Local::now().naive_local())
}

/// Same as [`run_all_checks`] with an explicit reference time.
///
/// The rule set is validated before anything runs: a ConfigError aborts the
/// run with no partial results. Families run in [`CheckFamily::ORDERED`]
/// order and each returns its own results; the first DataError aborts.
#[instrument(skip_all, fields(rows = dataset.row_count(), columns = dataset.column_count()))]
pub fn run_all_checks_at(
    dataset: &Dataset,
    rules: &RuleConfig,
    now: NaiveDateTime,
) -> Result<QualityReport, DqmError> {
    rules.ensure_valid()?;
    if dataset.is_empty() {
        return Err(DomainError::EmptyDataset.into());
    }

    let start = Instant::now();
    let ctx = CheckContext {
        dataset,
        rules,
        now,
    };

    let mut results = Vec::new();
    for family in CheckFamily::ORDERED {
        let produced = family.run(&ctx)?;
        debug!(family = %family, results = produced.len(), "Check family finished");
        results.extend(produced);
    }

    let report = QualityReport::from_results(results)?;
    info!(
        checks = report.results().len(),
        score = report.score(),
        "Quality checks finished in {:.2?}",
        start.elapsed()
    );
    Ok(report)
}

/// A validated rule set bound to the runner. Holds no other state, so one
/// engine can be shared across threads and reused for any number of runs.
#[derive(Debug, Clone)]
pub struct QualityEngine {
    rules: RuleConfig,
}

impl QualityEngine {
    pub fn new(rules: RuleConfig) -> Result<Self, DqmError> {
        rules.ensure_valid()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    pub fn run(&self, dataset: &Dataset) -> Result<QualityReport, DqmError> {
        run_all_checks(dataset, &self.rules)
    }

    pub fn run_at(&self, dataset: &Dataset, now: NaiveDateTime) -> Result<QualityReport, DqmError> {
        run_all_checks_at(dataset, &self.rules, now)
    }

    pub fn level(&self, report: &QualityReport) -> QualityLevel {
        QualityLevel::from_score(report.score(), &self.rules.thresholds)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::dataset::{ColumnSchema, DataType, Value};
    use crate::domain::error::ErrorKind;
    use crate::domain::quality::CheckStatus;
    use crate::domain::rules::tests::sample_rules;
    use anyhow::Result;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    /// `transaction_id, transaction_date, price, category`
    fn clean_dataset(rows: usize) -> Dataset {
        let ids = (0..rows).map(|i| Value::Number(i as f64)).collect();
        let dates = (0..rows)
            .map(|i| Value::Timestamp(now() - Duration::minutes(i as i64)))
            .collect();
        let prices = (0..rows).map(|i| Value::Number(10.0 + (i % 5) as f64)).collect();
        let categories = (0..rows).map(|i| Value::Text(format!("cat-{}", i % 3))).collect();
        Dataset::from_columns(vec![
            (ColumnSchema::new("transaction_id", DataType::Number), ids),
            (ColumnSchema::new("transaction_date", DataType::Timestamp), dates),
            (ColumnSchema::new("price", DataType::Number), prices),
            (ColumnSchema::new("category", DataType::Text), categories),
        ])
        .unwrap()
    }

    #[test]
    fn test_clean_dataset_scores_100_in_fixed_order() -> Result<()> {
        let report = run_all_checks_at(&clean_dataset(50), &sample_rules(), now())?;

        let checks: Vec<&str> = report.results().iter().map(|r| r.check.as_str()).collect();
        assert_eq!(
            checks,
            vec![
                "Freshness",
                "Completeness - Nulls",
                "Validity - price",
                "Duplicates",
                "Outliers - transaction_id",
                "Outliers - price",
            ]
        );
        assert!(report.results().iter().all(|r| r.status == CheckStatus::Pass));
        assert_eq!(report.score(), 100.0);
        Ok(())
    }

    #[test]
    fn test_aggregate_is_mean_of_results() -> Result<()> {
        let mut rules = sample_rules();
        rules.freshness.max_age_hours = 0.0;
        let stale = now() + Duration::hours(2);

        let report = run_all_checks_at(&clean_dataset(20), &rules, stale)?;
        let mean = report.results().iter().map(|r| r.score).sum::<f64>()
            / report.results().len() as f64;

        assert_eq!(report.results()[0].status, CheckStatus::Fail);
        assert!((report.score() - mean).abs() < 1e-9);
        assert!(report.score() < 100.0);
        Ok(())
    }

    #[test]
    fn test_all_scores_within_bounds() -> Result<()> {
        let dirty = Dataset::from_columns(vec![
            (
                ColumnSchema::new("transaction_id", DataType::Number),
                vec![Value::Null, Value::Null, Value::Null, Value::Number(1e9)],
            ),
            (
                ColumnSchema::new("transaction_date", DataType::Timestamp),
                vec![now().into(), now().into(), now().into(), now().into()],
            ),
            (
                ColumnSchema::new("price", DataType::Number),
                vec![(-1.0).into(), (-1.0).into(), (-1.0).into(), 5.0.into()],
            ),
        ])?;

        let report = run_all_checks_at(&dirty, &sample_rules(), now())?;
        assert!(report.results().iter().all(|r| (0.0..=100.0).contains(&r.score)));
        assert!((0.0..=100.0).contains(&report.score()));
        Ok(())
    }

    #[test]
    fn test_missing_required_column_degrades() -> Result<()> {
        let mut rules = sample_rules();
        rules.completeness.required_columns.push("customer_id".into());

        let report = run_all_checks_at(&clean_dataset(10), &rules, now())?;
        let completeness: Vec<_> = report
            .results()
            .iter()
            .filter(|r| r.check.starts_with("Completeness"))
            .collect();

        assert_eq!(completeness.len(), 1);
        assert_eq!(completeness[0].check, "Completeness - Columns");
        assert_eq!(completeness[0].score, 0.0);
        Ok(())
    }

    #[test]
    fn test_freshness_data_error_is_fatal() {
        let mut rules = sample_rules();
        rules.freshness.date_column = "shipped_at".into();

        let err = run_all_checks_at(&clean_dataset(10), &rules, now()).unwrap_err();
        assert_eq!(err.as_domain().map(DomainError::kind), Some(ErrorKind::Data));
    }

    #[test]
    fn test_invalid_rules_abort_before_checks() {
        let mut rules = sample_rules();
        rules.thresholds.acceptable = 101.0;

        let err = run_all_checks_at(&clean_dataset(10), &rules, now()).unwrap_err();
        assert_eq!(err.as_domain().map(DomainError::kind), Some(ErrorKind::Config));
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let empty = Dataset::new(vec![ColumnSchema::new("a", DataType::Number)], vec![]).unwrap();
        let err = run_all_checks_at(&empty, &sample_rules(), now()).unwrap_err();
        assert!(matches!(err, DqmError::Domain(DomainError::EmptyDataset)));
    }

    #[test]
    fn test_runs_are_idempotent() -> Result<()> {
        let ds = clean_dataset(30);
        let engine = QualityEngine::new(sample_rules())?;
        let first = engine.run_at(&ds, now())?;
        let second = engine.run_at(&ds, now())?;
        assert_eq!(first, second);
        assert_eq!(engine.level(&first), QualityLevel::Excellent);
        Ok(())
    }

    #[test]
    fn test_engine_is_shareable_across_threads() -> Result<()> {
        let engine = std::sync::Arc::new(QualityEngine::new(sample_rules())?);
        let handles: Vec<_> = (1..4)
            .map(|i| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    engine
                        .run_at(&clean_dataset(10 * i), now())
                        .map(|r| r.score())
                        .unwrap_or(-1.0)
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), 100.0);
        }
        Ok(())
    }
}

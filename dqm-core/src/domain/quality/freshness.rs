// dqm-core/src/domain/quality/freshness.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::dataset::{DataType, Dataset, Value};
use crate::domain::error::DomainError;
use crate::domain::quality::result::{CheckResult, CheckStatus};
use crate::domain::rules::FreshnessRule;

pub const CHECK_NAME: &str = "Freshness";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Binary check: the newest timestamp must be at most `max_age_hours` old.
pub fn check_freshness(
    dataset: &Dataset,
    rule: &FreshnessRule,
    now: NaiveDateTime,
) -> Result<CheckResult, DomainError> {
    let latest = latest_timestamp(dataset, &rule.date_column)?;
    let age_hours = (now - latest).num_milliseconds() as f64 / 3_600_000.0;

    let status = if age_hours <= rule.max_age_hours {
        CheckStatus::Pass
    } else {
        CheckStatus::Fail
    };
    let score = if status == CheckStatus::Pass { 100.0 } else { 0.0 };

    Ok(CheckResult::new(
        CHECK_NAME,
        status,
        format!(
            "Last update {:.1}h ago (limit: {}h)",
            age_hours, rule.max_age_hours
        ),
        score,
    ))
}

fn latest_timestamp(dataset: &Dataset, column: &str) -> Result<NaiveDateTime, DomainError> {
    let schema = dataset.column(column).ok_or_else(|| DomainError::MissingColumn {
        check: CHECK_NAME.to_string(),
        column: column.to_string(),
    })?;
    let values = dataset
        .column_values(column)
        .ok_or_else(|| DomainError::MissingColumn {
            check: CHECK_NAME.to_string(),
            column: column.to_string(),
        })?;

    let mut latest: Option<NaiveDateTime> = None;
    for value in values.filter(|v| !v.is_null()) {
        let ts = match (schema.data_type, value) {
            (_, Value::Timestamp(t)) => *t,
            (DataType::Text, Value::Text(raw)) => {
                parse_timestamp(raw).ok_or_else(|| DomainError::UnparseableTimestamp {
                    column: column.to_string(),
                    value: raw.clone(),
                })?
            }
            (_, other) => {
                return Err(DomainError::UnparseableTimestamp {
                    column: column.to_string(),
                    value: other.to_string(),
                });
            }
        };
        latest = Some(latest.map_or(ts, |l| l.max(ts)));
    }

    latest.ok_or_else(|| DomainError::NoTimestamps(column.to_string()))
}

/// Parses the textual timestamp shapes commonly found in exports.
/// Offsets are normalised to UTC; naive values are taken as-is.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

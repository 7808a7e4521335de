// dqm-core/src/domain/quality/result.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Warning => "WARNING",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one check invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check: String,
    pub status: CheckStatus,
    pub details: String,
    pub score: f64,
}

impl CheckResult {
    /// Scores are clamped into [0, 100].
    pub fn new(
        check: impl Into<String>,
        status: CheckStatus,
        details: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            check: check.into(),
            status,
            details: details.into(),
            score: score.clamp(0.0, 100.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusCounts {
    pub pass: usize,
    pub warning: usize,
    pub fail: usize,
}

/// Ordered check results plus their unweighted mean. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    results: Vec<CheckResult>,
    score: f64,
}

impl QualityReport {
    pub fn from_results(results: Vec<CheckResult>) -> Result<Self, DomainError> {
        if results.is_empty() {
            return Err(DomainError::NoResults);
        }
        let score = results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64;
        Ok(Self { results, score })
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.results
            .iter()
            .fold(StatusCounts::default(), |mut acc, r| {
                match r.status {
                    CheckStatus::Pass => acc.pass += 1,
                    CheckStatus::Warning => acc.warning += 1,
                    CheckStatus::Fail => acc.fail += 1,
                }
                acc
            })
    }
}

// dqm-core/src/domain/quality/mod.rs

pub mod completeness;
pub mod duplicates;
pub mod freshness;
pub mod level;
pub mod outliers;
pub mod result;
pub mod stats;
pub mod validity;

pub use level::QualityLevel;
pub use result::{CheckResult, CheckStatus, QualityReport, StatusCounts};

use chrono::NaiveDateTime;
use std::fmt;

use crate::domain::dataset::Dataset;
use crate::domain::error::DomainError;
use crate::domain::rules::RuleConfig;

/// Everything a check family may look at. Borrowed, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    pub dataset: &'a Dataset,
    pub rules: &'a RuleConfig,
    pub now: NaiveDateTime,
}

/// The fixed dispatch table of check families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckFamily {
    Freshness,
    Completeness,
    Validity,
    Duplicates,
    Outliers,
}

impl CheckFamily {
    /// Execution order. Results are reported in this order.
    pub const ORDERED: [CheckFamily; 5] = [
        CheckFamily::Freshness,
        CheckFamily::Completeness,
        CheckFamily::Validity,
        CheckFamily::Duplicates,
        CheckFamily::Outliers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Freshness => "freshness",
            Self::Completeness => "completeness",
            Self::Validity => "validity",
            Self::Duplicates => "duplicates",
            Self::Outliers => "outliers",
        }
    }

    pub fn run(self, ctx: &CheckContext<'_>) -> Result<Vec<CheckResult>, DomainError> {
        let results = match self {
            Self::Freshness => vec![freshness::check_freshness(
                ctx.dataset,
                &ctx.rules.freshness,
                ctx.now,
            )?],
            Self::Completeness => {
                completeness::check_completeness(ctx.dataset, &ctx.rules.completeness)
            }
            Self::Validity => validity::check_validity(ctx.dataset, &ctx.rules.validity),
            Self::Duplicates => vec![duplicates::check_duplicates(
                ctx.dataset,
                &ctx.rules.consistency,
            )],
            Self::Outliers => outliers::check_outliers(ctx.dataset),
        };
        Ok(results)
    }
}

impl fmt::Display for CheckFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

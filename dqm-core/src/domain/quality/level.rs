// dqm-core/src/domain/quality/level.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::rules::Thresholds;

// Declared from worst to best so the derived ordering matches the score bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    Low,
    Acceptable,
    Good,
    Excellent,
}

impl QualityLevel {
    /// Bands are evaluated from the top down; every bound is inclusive.
    pub fn from_score(score: f64, thresholds: &Thresholds) -> Self {
        match score {
            s if s >= thresholds.excellent => Self::Excellent,
            s if s >= thresholds.good => Self::Good,
            s if s >= thresholds.acceptable => Self::Acceptable,
            _ => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Acceptable => "Acceptable",
            Self::Low => "Low",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Excellent => "🟢",
            Self::Good => "🟡",
            Self::Acceptable => "🟠",
            Self::Low => "🔴",
        }
    }

    /// Accent color used by the HTML report.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Excellent => "#22c55e",
            Self::Good => "#eab308",
            Self::Acceptable => "#f97316",
            Self::Low => "#ef4444",
        }
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

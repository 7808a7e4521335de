// dqm-core/src/domain/rules.rs

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use validator::{Validate, ValidationError};

use crate::domain::error::DomainError;

// --- CONFIGURATION STRUCTS ---

/// The rule set driving every check family. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RuleConfig {
    #[validate(nested)]
    pub freshness: FreshnessRule,

    #[validate(nested)]
    pub completeness: CompletenessRule,

    #[validate(custom(function = "validate_bounds"))]
    pub validity: ValidityRules,

    #[validate(nested)]
    pub consistency: ConsistencyRule,

    #[validate(nested)]
    pub thresholds: Thresholds,
}

impl RuleConfig {
    /// Runs the declarative validation rules and folds any violation into a
    /// single `DomainError::Config`.
    pub fn ensure_valid(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|e| DomainError::Config(e.to_string().replace('\n', "; ")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FreshnessRule {
    #[validate(length(min = 1, message = "date_column cannot be empty"))]
    pub date_column: String,

    #[validate(
        range(min = 0.0, message = "max_age_hours must be positive"),
        custom(function = "validate_finite")
    )]
    pub max_age_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CompletenessRule {
    pub required_columns: Vec<String>,

    #[validate(
        range(min = 0.0, max = 100.0, message = "must be a percentage"),
        custom(function = "validate_finite")
    )]
    pub max_null_percentage: f64,
}

impl CompletenessRule {
    /// Required columns without repeats, in declaration order.
    pub fn unique_required_columns(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.required_columns
            .iter()
            .map(String::as_str)
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ConsistencyRule {
    #[validate(
        range(min = 0.0, max = 100.0, message = "must be a percentage"),
        custom(function = "validate_finite")
    )]
    pub duplicate_threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_threshold_order"))]
pub struct Thresholds {
    #[validate(range(min = 0.0, max = 100.0), custom(function = "validate_finite"))]
    pub excellent: f64,
    #[validate(range(min = 0.0, max = 100.0), custom(function = "validate_finite"))]
    pub good: f64,
    #[validate(range(min = 0.0, max = 100.0), custom(function = "validate_finite"))]
    pub acceptable: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            excellent: 95.0,
            good: 80.0,
            acceptable: 60.0,
        }
    }
}

/// Inclusive bounds for one column. Either side may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidityRule {
    pub column: String,
    pub bounds: Bounds,
}

/// `column -> {min, max}` mapping that keeps document order, so results come
/// out in the order the rules were written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidityRules(Vec<ValidityRule>);

impl ValidityRules {
    pub fn new(rules: Vec<ValidityRule>) -> Self {
        Self(rules)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidityRule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&Bounds> {
        self.0.iter().find(|r| r.column == column).map(|r| &r.bounds)
    }
}

impl<'a> IntoIterator for &'a ValidityRules {
    type Item = &'a ValidityRule;
    type IntoIter = std::slice::Iter<'a, ValidityRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for ValidityRules {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for rule in &self.0 {
            map.serialize_entry(&rule.column, &rule.bounds)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ValidityRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedRules;

        impl<'de> Visitor<'de> for OrderedRules {
            type Value = ValidityRules;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of column name to {min, max} bounds")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut rules = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((column, bounds)) = access.next_entry::<String, Bounds>()? {
                    // Last declaration wins, position of the first is kept.
                    match rules.iter_mut().find(|r: &&mut ValidityRule| r.column == column) {
                        Some(existing) => existing.bounds = bounds,
                        None => rules.push(ValidityRule { column, bounds }),
                    }
                }
                Ok(ValidityRules(rules))
            }
        }

        deserializer.deserialize_map(OrderedRules)
    }
}

// --- CUSTOM VALIDATORS ---

// `range` lets NaN through, and every comparison against NaN is false.
fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        return Ok(());
    }
    let mut err = ValidationError::new("not_finite");
    err.message = Some(format!("{} is not a finite number", value).into());
    Err(err)
}

fn validate_bounds(rules: &ValidityRules) -> Result<(), ValidationError> {
    for rule in rules {
        for bound in [rule.bounds.min, rule.bounds.max].into_iter().flatten() {
            if !bound.is_finite() {
                let mut err = ValidationError::new("not_finite");
                err.message = Some(
                    format!("validity rule for '{}' has a non-finite bound", rule.column).into(),
                );
                return Err(err);
            }
        }
        if let (Some(min), Some(max)) = (rule.bounds.min, rule.bounds.max) {
            if min > max {
                let mut err = ValidationError::new("inverted_bounds");
                err.message = Some(
                    format!(
                        "validity rule for '{}' has min ({}) greater than max ({})",
                        rule.column, min, max
                    )
                    .into(),
                );
                return Err(err);
            }
        }
    }
    Ok(())
}

fn validate_threshold_order(t: &Thresholds) -> Result<(), ValidationError> {
    if t.excellent >= t.good && t.good >= t.acceptable {
        return Ok(());
    }
    let mut err = ValidationError::new("threshold_order");
    err.message = Some("thresholds must satisfy excellent >= good >= acceptable".into());
    Err(err)
}

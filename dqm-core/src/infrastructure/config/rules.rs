// dqm-core/src/infrastructure/config/rules.rs

use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::error::DomainError;
use crate::domain::rules::RuleConfig;
use crate::error::DqmError;
use crate::infrastructure::error::InfrastructureError;

pub const ENV_MAX_AGE_HOURS: &str = "DQM_MAX_AGE_HOURS";
pub const ENV_DUPLICATE_THRESHOLD: &str = "DQM_DUPLICATE_THRESHOLD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Loads a rule document (YAML or JSON, picked by extension), layers the
/// environment overrides on top, then validates the result.
///
/// Missing keys, wrong types and rule violations all surface as
/// `DomainError::Config`; a missing file is an infrastructure error.
#[instrument]
pub fn load_rule_config(path: &Path) -> Result<RuleConfig, DqmError> {
    if !path.exists() {
        return Err(InfrastructureError::ConfigNotFound(path.display().to_string()).into());
    }
    info!(path = ?path, "Loading rule configuration");

    let content = fs::read_to_string(path)?;
    let mut config = parse_rule_config(&content, DocumentFormat::from_path(path))
        .map_err(|e| DomainError::Config(format!("{}: {}", path.display(), e)))?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.ensure_valid()?;

    Ok(config)
}

fn parse_rule_config(content: &str, format: DocumentFormat) -> Result<RuleConfig, String> {
    match format {
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    }
}

/// Layering: lets a CI job relax or tighten limits without editing the file,
/// e.g. `DQM_MAX_AGE_HOURS=48 dqm check ...`.
pub fn apply_env_overrides<F>(config: &mut RuleConfig, lookup: F) -> Result<(), DomainError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(ENV_MAX_AGE_HOURS) {
        let val = parse_override(ENV_MAX_AGE_HOURS, &raw)?;
        info!(old = config.freshness.max_age_hours, new = val, "Overriding max_age_hours via ENV");
        config.freshness.max_age_hours = val;
    }
    if let Some(raw) = lookup(ENV_DUPLICATE_THRESHOLD) {
        let val = parse_override(ENV_DUPLICATE_THRESHOLD, &raw)?;
        info!(
            old = config.consistency.duplicate_threshold,
            new = val,
            "Overriding duplicate_threshold via ENV"
        );
        config.consistency.duplicate_threshold = val;
    }
    Ok(())
}

fn parse_override(key: &str, raw: &str) -> Result<f64, DomainError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DomainError::Config(format!("{} must be a number, got '{}'", key, raw)))
}

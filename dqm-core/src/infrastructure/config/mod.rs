pub mod rules;

pub use crate::domain::rules::RuleConfig;
pub use rules::{apply_env_overrides, load_rule_config};

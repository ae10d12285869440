//! Validator configuration

use crate::error::RuleError;
use serde::{Deserialize, Serialize};
use std::env;

/// Enables the `"undefined"`-means-pass escape hatch for custom checkers
pub const LEGACY_UNDEFINED_ENV: &str = "PARAM_VALIDATION_LEGACY_UNDEFINED";
/// Seeds the `reg` and `object` rules alongside the defaults
pub const EXTENDED_RULES_ENV: &str = "PARAM_VALIDATION_EXTENDED_RULES";

/// Where a configuration value came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value loaded from environment variable
    EnvVar(String),
    /// Default value used
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::EnvVar(var) => write!(f, "Environment variable: {}", var),
            ConfigSource::Default => write!(f, "Default value"),
        }
    }
}

/// Behaviour switches for a [`Validator`](crate::Validator)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Treat a checker message of exactly `"undefined"` as a pass
    pub legacy_undefined_pass: bool,
    /// Register the `reg` and `object` checkers at construction
    pub extended_rules: bool,
}

impl ValidatorConfig {
    /// Default configuration plus the `reg` and `object` rules
    pub fn extended() -> Self {
        Self {
            extended_rules: true,
            ..Self::default()
        }
    }

    pub fn with_legacy_undefined_pass(mut self, enabled: bool) -> Self {
        self.legacy_undefined_pass = enabled;
        self
    }

    pub fn with_extended_rules(mut self, enabled: bool) -> Self {
        self.extended_rules = enabled;
        self
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, RuleError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from a JSON document; absent keys take defaults
    pub fn from_json(source: &str) -> Result<Self, RuleError> {
        serde_json::from_str(source).map_err(|e| RuleError::InvalidConfig(e.to_string()))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, RuleError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (legacy_undefined_pass, legacy_source) = bool_setting(&lookup, LEGACY_UNDEFINED_ENV)?;
        let (extended_rules, extended_source) = bool_setting(&lookup, EXTENDED_RULES_ENV)?;

        tracing::debug!(
            legacy_undefined_pass,
            extended_rules,
            legacy_source = %legacy_source,
            extended_source = %extended_source,
            "loaded validator configuration"
        );

        Ok(Self {
            legacy_undefined_pass,
            extended_rules,
        })
    }
}

fn bool_setting<F>(lookup: &F, key: &str) -> Result<(bool, ConfigSource), RuleError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok((false, ConfigSource::Default));
    };

    let value = match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => true,
        "false" | "0" | "no" => false,
        _ => {
            return Err(RuleError::InvalidConfig(format!(
                "{} must be a boolean, got '{}'",
                key, raw
            )))
        }
    };

    Ok((value, ConfigSource::EnvVar(key.to_string())))
}

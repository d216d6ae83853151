//! Top-level autogate configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ReplayConfig, StrategyKind, ThresholdConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`AUTOGATE_*`)
/// 2. Config file passed to [`AutogateConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutogateConfig {
    pub threshold: ThresholdConfig,
    pub replay: ReplayConfig,
}

impl AutogateConfig {
    /// Load configuration with layered resolution and validate the result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.threshold.validate()?;
        self.replay.validate()
    }

    /// Apply `AUTOGATE_*` overrides using `lookup` to read variables.
    ///
    /// A present but unparsable variable is an error.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("AUTOGATE_STRATEGY") {
            self.threshold.strategy = v.parse::<StrategyKind>()?;
        }
        if let Some(v) = lookup("AUTOGATE_WINDOW") {
            self.threshold.window = parse_env("AUTOGATE_WINDOW", &v)?;
        }
        if let Some(v) = lookup("AUTOGATE_CONFIDENCE") {
            self.threshold.confidence = parse_env("AUTOGATE_CONFIDENCE", &v)?;
        }
        if let Some(v) = lookup("AUTOGATE_DEVIATION") {
            self.threshold.deviation = parse_env("AUTOGATE_DEVIATION", &v)?;
        }
        if let Some(v) = lookup("AUTOGATE_MAX_PROB") {
            self.threshold.max_prob = parse_env("AUTOGATE_MAX_PROB", &v)?;
        }
        if let Some(v) = lookup("AUTOGATE_DELAY_SECS") {
            self.replay.delay_secs = parse_env("AUTOGATE_DELAY_SECS", &v)?;
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::invalid(key, format!("cannot parse `{raw}`")))
}

//! Threshold strategy configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Which threshold strategy to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Drift-aware logistic controller.
    #[default]
    Adaptive,
    /// Fixed-confidence baseline.
    Constant,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adaptive => f.write_str("adaptive"),
            Self::Constant => f.write_str("constant"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "adaptive" => Ok(Self::Adaptive),
            "constant" => Ok(Self::Constant),
            other => Err(ConfigError::invalid(
                "threshold.strategy",
                format!("unknown strategy `{other}`, expected `adaptive` or `constant`"),
            )),
        }
    }
}

/// Per-model parameters that replace the defaults at registration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOverride {
    pub window: Option<u32>,
    pub confidence: Option<f64>,
    pub deviation: Option<f64>,
}

/// Threshold subsystem configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub strategy: StrategyKind,
    /// Sliding-window size; decay is `(window - 1) / window`.
    pub window: u32,
    /// Long-run target accuracy.
    pub confidence: f64,
    /// Long-run target standard deviation of accuracy.
    pub deviation: f64,
    /// Ceiling on every adaptive threshold.
    pub max_prob: f64,
    /// Threshold used by the constant baseline.
    pub constant_confidence: f64,
    /// Overrides keyed by model id.
    pub models: BTreeMap<String, ModelOverride>,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            window: defaults::DEFAULT_WINDOW,
            confidence: defaults::DEFAULT_CONFIDENCE,
            deviation: defaults::DEFAULT_DEVIATION,
            max_prob: defaults::DEFAULT_MAX_PROB,
            constant_confidence: defaults::DEFAULT_CONSTANT_CONFIDENCE,
            models: BTreeMap::new(),
        }
    }
}

impl ThresholdConfig {
    /// Validate every field, including per-model overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_window("threshold.window", self.window)?;
        validate_confidence("threshold.confidence", self.confidence)?;
        validate_deviation("threshold.deviation", self.deviation)?;
        validate_max_prob("threshold.max_prob", self.max_prob)?;
        validate_confidence("threshold.constant_confidence", self.constant_confidence)?;

        for (id, o) in &self.models {
            if let Some(w) = o.window {
                validate_window(&format!("threshold.models.{id}.window"), w)?;
            }
            if let Some(c) = o.confidence {
                validate_confidence(&format!("threshold.models.{id}.confidence"), c)?;
            }
            if let Some(d) = o.deviation {
                validate_deviation(&format!("threshold.models.{id}.deviation"), d)?;
            }
        }
        Ok(())
    }
}

/// Window must be an integer greater than 1.
pub fn validate_window(field: &str, window: u32) -> Result<(), ConfigError> {
    if window < 2 {
        return Err(ConfigError::invalid(field, "must be greater than 1"));
    }
    Ok(())
}

/// Confidence must lie in the open interval (0, 1).
pub fn validate_confidence(field: &str, confidence: f64) -> Result<(), ConfigError> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(ConfigError::invalid(field, "must be strictly between 0.0 and 1.0"));
    }
    Ok(())
}

/// Deviation must be strictly positive and finite.
pub fn validate_deviation(field: &str, deviation: f64) -> Result<(), ConfigError> {
    if !(deviation > 0.0 && deviation.is_finite()) {
        return Err(ConfigError::invalid(field, "must be a finite value greater than 0.0"));
    }
    Ok(())
}

/// The threshold ceiling must lie in (0.5, 1).
pub fn validate_max_prob(field: &str, max_prob: f64) -> Result<(), ConfigError> {
    if !(max_prob > 0.5 && max_prob < 1.0) {
        return Err(ConfigError::invalid(field, "must be strictly between 0.5 and 1.0"));
    }
    Ok(())
}

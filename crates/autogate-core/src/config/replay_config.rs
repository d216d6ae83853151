//! Replay protocol configuration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Configuration for the replay drivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Model ids whose `prob_<id>` / `label_<id>` columns are replayed.
    pub models: Vec<String>,
    /// Name of the ordering column.
    pub timestamp_col: String,
    /// Delay before buffered feedback is applied, in seconds.
    pub delay_secs: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            models: Vec::new(),
            timestamp_col: defaults::DEFAULT_TIMESTAMP_COL.to_string(),
            delay_secs: defaults::DEFAULT_DELAY_SECS,
        }
    }
}

impl ReplayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timestamp_col.trim().is_empty() {
            return Err(ConfigError::invalid("replay.timestamp_col", "must not be empty"));
        }
        if let Some(empty) = self.models.iter().position(|m| m.trim().is_empty()) {
            return Err(ConfigError::invalid(
                format!("replay.models[{empty}]"),
                "model ids must not be empty",
            ));
        }
        let mut seen = BTreeSet::new();
        if let Some(dup) = self.models.iter().find(|m| !seen.insert(m.as_str())) {
            return Err(ConfigError::invalid(
                "replay.models",
                format!("duplicate model id {dup}"),
            ));
        }
        Ok(())
    }
}

//! Drift-aware logistic threshold controller.
//!
//! Each model carries a drift signal `gamma` that is squashed through a
//! logistic into the threshold range `(0.5, max_prob)`:
//!
//! ```text
//! threshold = sigmoid(gamma) · 2(max_prob − 0.5) / 2 + 0.5
//! ```
//!
//! Feedback only arrives for predictions that were auto-released. Each one
//! moves the model's rolling accuracy, and the gap between the long-run
//! target `confidence` and that rolling accuracy, normalised by `deviation`,
//! is folded into `gamma`:
//!
//! ```text
//! gamma ← gamma · decay + 10 · tanh((confidence − accuracy) / deviation) · (1 − decay)
//! ```

use std::collections::{BTreeMap, HashMap};

use autogate_core::config::threshold_config::{
    validate_confidence, validate_deviation, validate_max_prob, validate_window,
};
use autogate_core::config::{defaults, ModelOverride, ThresholdConfig};
use autogate_core::constants::{CHANCE_THRESHOLD, DRIFT_STEP_SCALE};
use autogate_core::errors::{ConfigError, ThresholdError};
use autogate_core::models::DeploymentManifest;
use autogate_core::traits::{Estimator, ThresholdStrategy};
use tracing::{debug, trace, warn};

use crate::state::ModelState;

/// Parameters every newly registered model starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerDefaults {
    pub window: u32,
    pub confidence: f64,
    pub deviation: f64,
}

impl Default for ControllerDefaults {
    fn default() -> Self {
        Self {
            window: defaults::DEFAULT_WINDOW,
            confidence: defaults::DEFAULT_CONFIDENCE,
            deviation: defaults::DEFAULT_DEVIATION,
        }
    }
}

impl ControllerDefaults {
    fn validate(&self) -> Result<(), ConfigError> {
        validate_window("window", self.window)?;
        validate_confidence("confidence", self.confidence)?;
        validate_deviation("deviation", self.deviation)
    }
}

/// Adaptive auto-release thresholds, one [`ModelState`] per model id.
///
/// Every id must be registered before use; operations on an unknown id fail
/// with [`ThresholdError::NotRegistered`].
#[derive(Debug, Clone)]
pub struct AdaptiveThreshold {
    defaults: ControllerDefaults,
    max_prob: f64,
    overrides: BTreeMap<String, ModelOverride>,
    models: HashMap<String, ModelState>,
}

impl AdaptiveThreshold {
    pub fn new(defaults: ControllerDefaults, max_prob: f64) -> Result<Self, ConfigError> {
        defaults.validate()?;
        validate_max_prob("max_prob", max_prob)?;
        Ok(Self {
            defaults,
            max_prob,
            overrides: BTreeMap::new(),
            models: HashMap::new(),
        })
    }

    /// Build from the `[threshold]` config section, including per-model
    /// overrides applied at registration.
    pub fn from_config(config: &ThresholdConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut controller = Self::new(
            ControllerDefaults {
                window: config.window,
                confidence: config.confidence,
                deviation: config.deviation,
            },
            config.max_prob,
        )?;
        controller.overrides = config.models.clone();
        Ok(controller)
    }

    pub fn defaults(&self) -> &ControllerDefaults {
        &self.defaults
    }

    pub fn max_prob(&self) -> f64 {
        self.max_prob
    }

    pub fn is_registered(&self, model_id: &str) -> bool {
        self.models.contains_key(model_id)
    }

    /// Registered ids in sorted order.
    pub fn registered_models(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.models.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn state(&self, model_id: &str) -> Result<&ModelState, ThresholdError> {
        self.models
            .get(model_id)
            .ok_or_else(|| ThresholdError::not_registered(model_id))
    }

    fn state_mut(&mut self, model_id: &str) -> Result<&mut ModelState, ThresholdError> {
        self.models
            .get_mut(model_id)
            .ok_or_else(|| ThresholdError::not_registered(model_id))
    }

    /// Snapshot of every registered model, keyed by id.
    pub fn deploy_all(&self) -> Result<DeploymentManifest, ThresholdError> {
        let mut manifest = DeploymentManifest::new();
        for id in self.registered_models() {
            manifest.insert(id, self.deploy_it(id)?);
        }
        Ok(manifest)
    }

    pub fn set_confidence(&mut self, model_id: &str, confidence: f64) -> Result<(), ThresholdError> {
        let state = self.state_mut(model_id)?;
        validate_confidence("confidence", confidence).map_err(|e| rejected(model_id, e))?;
        state.confidence = confidence;
        Ok(())
    }

    pub fn set_deviation(&mut self, model_id: &str, deviation: f64) -> Result<(), ThresholdError> {
        let state = self.state_mut(model_id)?;
        validate_deviation("deviation", deviation).map_err(|e| rejected(model_id, e))?;
        state.deviation = deviation;
        Ok(())
    }

    /// Change the window; the new decay also applies to the live rolling
    /// accuracy estimate, whose current value is kept.
    pub fn set_window(&mut self, model_id: &str, window: u32) -> Result<(), ThresholdError> {
        let state = self.state_mut(model_id)?;
        validate_window("window", window).map_err(|e| rejected(model_id, e))?;
        state.set_window(window);
        Ok(())
    }
}

impl Default for AdaptiveThreshold {
    fn default() -> Self {
        Self {
            defaults: ControllerDefaults::default(),
            max_prob: defaults::DEFAULT_MAX_PROB,
            overrides: BTreeMap::new(),
            models: HashMap::new(),
        }
    }
}

impl ThresholdStrategy for AdaptiveThreshold {
    fn name(&self) -> &'static str {
        "adaptive"
    }

    fn register(&mut self, model_id: &str) {
        if self.models.contains_key(model_id) {
            return;
        }
        let o = self.overrides.get(model_id).cloned().unwrap_or_default();
        let state = ModelState::new(
            o.window.unwrap_or(self.defaults.window),
            o.confidence.unwrap_or(self.defaults.confidence),
            o.deviation.unwrap_or(self.defaults.deviation),
        );
        debug!(
            model_id,
            window = state.window,
            confidence = state.confidence,
            deviation = state.deviation,
            "registered model"
        );
        self.models.insert(model_id.to_string(), state);
    }

    fn threshold(&self, model_id: &str) -> Result<f64, ThresholdError> {
        let state = self.state(model_id)?;
        let prob_range = (self.max_prob - CHANCE_THRESHOLD) * 2.0;
        Ok(sigmoid(state.gamma) * prob_range / 2.0 + CHANCE_THRESHOLD)
    }

    fn get_performance(&self, model_id: &str) -> Result<f64, ThresholdError> {
        Ok(self.state(model_id)?.short_term.get())
    }

    fn update(&mut self, model_id: &str, auto: bool, label: bool) -> Result<(), ThresholdError> {
        let state = self.state_mut(model_id)?;
        if !auto {
            return Ok(());
        }

        state.short_term.update(if label { 1.0 } else { 0.0 });
        let diff = state.confidence - state.short_term.get();
        let change = diff / state.deviation;
        state.gamma = state.gamma * state.decay
            + DRIFT_STEP_SCALE * change.tanh() * (1.0 - state.decay);

        trace!(
            model_id,
            label,
            performance = state.short_term.get(),
            gamma = state.gamma,
            "feedback applied"
        );
        Ok(())
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn rejected(model_id: &str, source: ConfigError) -> ThresholdError {
    warn!(model_id, error = %source, "rejected reconfiguration");
    ThresholdError::InvalidParameter {
        model_id: model_id.to_string(),
        source,
    }
}

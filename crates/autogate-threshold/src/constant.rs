//! Fixed-confidence baseline.

use autogate_core::config::defaults::DEFAULT_CONSTANT_CONFIDENCE;
use autogate_core::constants::DEFAULT_ESTIMATOR_SEED;
use autogate_core::errors::ThresholdError;
use autogate_core::traits::{Estimator, ThresholdStrategy};
use autogate_stats::Constant;

/// Same threshold for every model, never updated.
///
/// Accepts any model id without registration. Its reported performance is a
/// [`Constant`] at the estimator seed, so the performance gate is always
/// open and admission reduces to `prob > confidence`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantThreshold {
    confidence: f64,
    performance: Constant,
}

impl ConstantThreshold {
    pub fn new(confidence: f64) -> Self {
        Self {
            confidence,
            performance: Constant::new(DEFAULT_ESTIMATOR_SEED),
        }
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

impl Default for ConstantThreshold {
    fn default() -> Self {
        Self::new(DEFAULT_CONSTANT_CONFIDENCE)
    }
}

impl ThresholdStrategy for ConstantThreshold {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn register(&mut self, _model_id: &str) {}

    fn threshold(&self, _model_id: &str) -> Result<f64, ThresholdError> {
        Ok(self.confidence)
    }

    fn get_performance(&self, _model_id: &str) -> Result<f64, ThresholdError> {
        Ok(self.performance.get())
    }

    fn update(&mut self, _model_id: &str, _auto: bool, _label: bool) -> Result<(), ThresholdError> {
        Ok(())
    }
}

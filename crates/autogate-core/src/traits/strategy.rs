use crate::constants::AUTO_RELEASE_PERFORMANCE_GATE;
use crate::errors::ThresholdError;
use crate::models::DeploymentRecord;

/// A per-model auto-release threshold policy.
///
/// Implementations own all per-model state; callers only reach it through
/// `register`, `update`, and the read operations below.
pub trait ThresholdStrategy: Send {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Create state for `model_id`. Calling it again is a no-op.
    fn register(&mut self, model_id: &str);

    /// Probability a prediction must exceed to be auto-released.
    fn threshold(&self, model_id: &str) -> Result<f64, ThresholdError>;

    /// Rolling accuracy among instances this strategy auto-released.
    fn get_performance(&self, model_id: &str) -> Result<f64, ThresholdError>;

    /// Two-gate admission: sustained performance first, then probability.
    fn is_auto(&self, model_id: &str, prob: f64) -> Result<bool, ThresholdError> {
        if self.get_performance(model_id)? <= AUTO_RELEASE_PERFORMANCE_GATE {
            return Ok(false);
        }
        Ok(prob > self.threshold(model_id)?)
    }

    /// Feed back the outcome of one instance. `label` is whether the
    /// prediction turned out to be correct.
    fn update(&mut self, model_id: &str, auto: bool, label: bool) -> Result<(), ThresholdError>;

    /// Snapshot for the deployed threshold artifact.
    fn deploy_it(&self, model_id: &str) -> Result<DeploymentRecord, ThresholdError> {
        Ok(DeploymentRecord::from_state(
            self.threshold(model_id)?,
            self.get_performance(model_id)?,
        ))
    }
}

impl<S: ThresholdStrategy + ?Sized> ThresholdStrategy for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn register(&mut self, model_id: &str) {
        (**self).register(model_id)
    }

    fn threshold(&self, model_id: &str) -> Result<f64, ThresholdError> {
        (**self).threshold(model_id)
    }

    fn get_performance(&self, model_id: &str) -> Result<f64, ThresholdError> {
        (**self).get_performance(model_id)
    }

    fn is_auto(&self, model_id: &str, prob: f64) -> Result<bool, ThresholdError> {
        (**self).is_auto(model_id, prob)
    }

    fn update(&mut self, model_id: &str, auto: bool, label: bool) -> Result<(), ThresholdError> {
        (**self).update(model_id, auto, label)
    }

    fn deploy_it(&self, model_id: &str) -> Result<DeploymentRecord, ThresholdError> {
        (**self).deploy_it(model_id)
    }
}

//! Decayed confusion-matrix rates from a boolean decision stream.

use autogate_core::traits::Estimator;

use crate::estimator::DecayedMean;

/// Four decayed means tracking the rate of each outcome category.
///
/// Each `update` feeds a 1 to exactly one category and a 0 to the other
/// three.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionAccumulator {
    tp: DecayedMean,
    fp: DecayedMean,
    tn: DecayedMean,
    fn_: DecayedMean,
}

impl ConfusionAccumulator {
    pub fn new(decay: f64) -> Self {
        Self {
            tp: DecayedMean::new(decay),
            fp: DecayedMean::new(decay),
            tn: DecayedMean::new(decay),
            fn_: DecayedMean::new(decay),
        }
    }

    /// Start from known rates instead of the default seed.
    pub fn seeded(decay: f64, tp: f64, fp: f64, tn: f64, fn_: f64) -> Self {
        Self {
            tp: DecayedMean::with_seed(decay, tp),
            fp: DecayedMean::with_seed(decay, fp),
            tn: DecayedMean::with_seed(decay, tn),
            fn_: DecayedMean::with_seed(decay, fn_),
        }
    }

    /// Classify one `(predicted, label)` pair.
    pub fn update(&mut self, predicted: bool, label: bool) {
        let indicator = |hit: bool| if hit { 1.0 } else { 0.0 };
        self.tp.update(indicator(predicted && label));
        self.fp.update(indicator(predicted && !label));
        self.tn.update(indicator(!predicted && !label));
        self.fn_.update(indicator(!predicted && label));
    }

    pub fn tp(&self) -> f64 {
        self.tp.get()
    }

    pub fn fp(&self) -> f64 {
        self.fp.get()
    }

    pub fn tn(&self) -> f64 {
        self.tn.get()
    }

    pub fn fn_(&self) -> f64 {
        self.fn_.get()
    }

    /// `tp / (tp + fp)`. NaN when no positive prediction carries weight.
    pub fn precision(&self) -> f64 {
        self.tp() / (self.tp() + self.fp())
    }

    /// `tp / (tp + fn)`. NaN when no positive label carries weight.
    pub fn recall(&self) -> f64 {
        self.tp() / (self.tp() + self.fn_())
    }
}

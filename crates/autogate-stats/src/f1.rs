//! Streaming F1 score over a decayed confusion matrix.

use crate::confusion::ConfusionAccumulator;

/// F1 of admission decisions against ground truth, computed on read.
///
/// Zero denominators are not special-cased: when no positive prediction or
/// positive label carries weight under the current decay, `get` returns NaN
/// and callers aggregating the metric must handle it.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamingF1 {
    confusion: ConfusionAccumulator,
}

impl StreamingF1 {
    pub fn new(decay: f64) -> Self {
        Self {
            confusion: ConfusionAccumulator::new(decay),
        }
    }

    pub fn from_confusion(confusion: ConfusionAccumulator) -> Self {
        Self { confusion }
    }

    pub fn update(&mut self, predicted: bool, label: bool) {
        self.confusion.update(predicted, label);
    }

    pub fn confusion(&self) -> &ConfusionAccumulator {
        &self.confusion
    }

    pub fn get(&self) -> f64 {
        let precision = self.confusion.precision();
        let recall = self.confusion.recall();
        2.0 * (precision * recall) / (precision + recall)
    }
}

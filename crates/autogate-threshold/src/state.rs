//! Per-model controller state.

use autogate_core::traits::Estimator;
use autogate_stats::{decay_from_window, DecayedMean};

/// Everything the adaptive controller knows about one model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelState {
    pub(crate) confidence: f64,
    pub(crate) deviation: f64,
    pub(crate) window: u32,
    pub(crate) decay: f64,
    /// Decayed accuracy of this model's auto-released predictions.
    pub(crate) short_term: DecayedMean,
    /// Drift signal. Starts at `confidence`; every step is a decay-weighted
    /// blend with a value in [-10, 10], so it never leaves that range.
    pub(crate) gamma: f64,
}

impl ModelState {
    pub(crate) fn new(window: u32, confidence: f64, deviation: f64) -> Self {
        let decay = decay_from_window(window);
        Self {
            confidence,
            deviation,
            window,
            decay,
            short_term: DecayedMean::new(decay),
            gamma: confidence,
        }
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn deviation(&self) -> f64 {
        self.deviation
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn performance(&self) -> f64 {
        self.short_term.get()
    }

    pub(crate) fn set_window(&mut self, window: u32) {
        self.window = window;
        self.decay = decay_from_window(window);
        self.short_term.set_decay(self.decay);
    }
}

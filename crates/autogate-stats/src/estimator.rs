//! Exponentially weighted online estimators.
//!
//! Every decayed estimator blends a new observation into its running value as
//! `value · decay + new · (1 − decay)`. Values are seeded (1.0 by default), so
//! early reads are dominated by the seed until roughly one half-life of
//! observations has been absorbed.

use autogate_core::constants::DEFAULT_ESTIMATOR_SEED;
use autogate_core::traits::Estimator;

/// Decay for a sliding window of `window` observations: `(w − 1) / w`.
///
/// Callers validate `window > 1`; a window of 1 yields decay 0 (no memory).
pub fn decay_from_window(window: u32) -> f64 {
    let w = f64::from(window.max(1));
    (w - 1.0) / w
}

/// Decayed running mean.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayedMean {
    decay: f64,
    value: f64,
}

impl DecayedMean {
    /// New mean seeded at 1.0.
    pub fn new(decay: f64) -> Self {
        Self::with_seed(decay, DEFAULT_ESTIMATOR_SEED)
    }

    pub fn with_seed(decay: f64, seed: f64) -> Self {
        debug_assert!((0.0..1.0).contains(&decay), "decay must lie in [0, 1)");
        Self { decay, value: seed }
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Change the decay of a live estimator. The running value is kept.
    pub fn set_decay(&mut self, decay: f64) {
        debug_assert!((0.0..1.0).contains(&decay), "decay must lie in [0, 1)");
        self.decay = decay;
    }

    /// Number of observations after which the seed's weight halves.
    pub fn half_life(&self) -> f64 {
        if self.decay <= 0.0 {
            return 0.0;
        }
        std::f64::consts::LN_2 / (1.0 / self.decay).ln()
    }
}

impl Estimator for DecayedMean {
    fn update(&mut self, value: f64) {
        self.value = self.value * self.decay + value * (1.0 - self.decay);
    }

    fn get(&self) -> f64 {
        self.value
    }
}

/// Decayed standard deviation around a companion [`DecayedMean`].
///
/// The companion is borrowed on every observation and never stored, so the
/// deviation always measures spread around whatever the companion believes
/// the mean to be at that moment.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayedDeviation {
    decay: f64,
    variance: f64,
}

impl DecayedDeviation {
    /// New deviation sharing the companion's decay, seeded at 1.0.
    pub fn for_mean(companion: &DecayedMean) -> Self {
        Self {
            decay: companion.decay(),
            variance: DEFAULT_ESTIMATOR_SEED,
        }
    }

    /// Absorb `value`'s squared distance from the companion's current mean.
    pub fn observe(&mut self, value: f64, companion: &DecayedMean) {
        let dist = value - companion.get();
        self.variance = self.variance * self.decay + dist * dist * (1.0 - self.decay);
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Standard deviation.
    pub fn get(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// A mean together with the deviation around it.
///
/// On `update` the deviation is measured against the mean as it stood before
/// the new value, then the mean absorbs the value. `get` reports the mean.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayedMoments {
    mean: DecayedMean,
    deviation: DecayedDeviation,
}

impl DecayedMoments {
    pub fn new(decay: f64) -> Self {
        let mean = DecayedMean::new(decay);
        let deviation = DecayedDeviation::for_mean(&mean);
        Self { mean, deviation }
    }

    pub fn mean(&self) -> f64 {
        self.mean.get()
    }

    pub fn std_dev(&self) -> f64 {
        self.deviation.get()
    }
}

impl Estimator for DecayedMoments {
    fn update(&mut self, value: f64) {
        self.deviation.observe(value, &self.mean);
        self.mean.update(value);
    }

    fn get(&self) -> f64 {
        self.mean.get()
    }
}

/// Estimator that ignores every update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Estimator for Constant {
    fn update(&mut self, _value: f64) {}

    fn get(&self) -> f64 {
        self.value
    }
}

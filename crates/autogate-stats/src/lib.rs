//! # autogate-stats
//!
//! Decayed online statistics: means, deviations, constants, and a streaming
//! confusion accumulator with precision/recall/F1 computed on read.

pub mod confusion;
pub mod estimator;
pub mod f1;

pub use confusion::ConfusionAccumulator;
pub use estimator::{decay_from_window, Constant, DecayedDeviation, DecayedMean, DecayedMoments};
pub use f1::StreamingF1;

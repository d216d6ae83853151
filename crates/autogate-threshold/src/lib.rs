//! # autogate-threshold
//!
//! Per-model auto-release thresholds. [`AdaptiveThreshold`] re-estimates each
//! model's threshold from the accuracy of its own auto-released predictions;
//! [`ConstantThreshold`] is the fixed-confidence baseline. [`build_strategy`]
//! selects one from configuration.

pub mod adaptive;
pub mod constant;
pub mod selection;
pub mod state;

pub use adaptive::{AdaptiveThreshold, ControllerDefaults};
pub use constant::ConstantThreshold;
pub use selection::build_strategy;
pub use state::ModelState;

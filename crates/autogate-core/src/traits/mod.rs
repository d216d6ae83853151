//! Shared traits implemented across the workspace.

pub mod estimator;
pub mod strategy;

pub use estimator::Estimator;
pub use strategy::ThresholdStrategy;

//! # autogate-core
//!
//! Foundation crate for the autogate auto-release system.
//! Defines the shared traits, errors, config, tracing setup, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing_setup;

// Re-export the most commonly used types at the crate root.
pub use config::AutogateConfig;
pub use errors::{ConfigError, ReplayError, ThresholdError};
pub use models::{DeploymentManifest, DeploymentRecord};
pub use traits::{Estimator, ThresholdStrategy};

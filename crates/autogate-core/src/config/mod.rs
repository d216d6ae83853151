//! Configuration system for autogate.
//! TOML-based, 3-layer resolution: env > file > compiled defaults.

pub mod autogate_config;
pub mod defaults;
pub mod replay_config;
pub mod threshold_config;

pub use autogate_config::AutogateConfig;
pub use replay_config::ReplayConfig;
pub use threshold_config::{ModelOverride, StrategyKind, ThresholdConfig};

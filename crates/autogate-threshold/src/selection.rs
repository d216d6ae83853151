//! Strategy selection from configuration.

use autogate_core::config::{StrategyKind, ThresholdConfig};
use autogate_core::errors::ConfigError;
use autogate_core::traits::ThresholdStrategy;
use tracing::info;

use crate::{AdaptiveThreshold, ConstantThreshold};

/// Build the strategy named by `config.strategy`.
pub fn build_strategy(config: &ThresholdConfig) -> Result<Box<dyn ThresholdStrategy>, ConfigError> {
    config.validate()?;
    let strategy: Box<dyn ThresholdStrategy> = match config.strategy {
        StrategyKind::Adaptive => Box::new(AdaptiveThreshold::from_config(config)?),
        StrategyKind::Constant => Box::new(ConstantThreshold::new(config.constant_confidence)),
    };
    info!(strategy = strategy.name(), "threshold strategy selected");
    Ok(strategy)
}

//! Error handling for autogate.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod replay_error;
pub mod threshold_error;

pub use config_error::ConfigError;
pub use error_code::AutogateErrorCode;
pub use replay_error::ReplayError;
pub use threshold_error::ThresholdError;

//! Threshold strategy errors.

use super::error_code::{self, AutogateErrorCode};
use super::ConfigError;

/// Errors raised by threshold strategies.
#[derive(Debug, thiserror::Error)]
pub enum ThresholdError {
    /// The model id was never passed to `register`.
    #[error("model {model_id} is not registered")]
    NotRegistered { model_id: String },

    /// A runtime reconfiguration was rejected.
    #[error("invalid parameter for model {model_id}: {source}")]
    InvalidParameter {
        model_id: String,
        #[source]
        source: ConfigError,
    },
}

impl ThresholdError {
    pub fn not_registered(model_id: &str) -> Self {
        Self::NotRegistered {
            model_id: model_id.to_string(),
        }
    }
}

impl AutogateErrorCode for ThresholdError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotRegistered { .. } => error_code::NOT_REGISTERED,
            Self::InvalidParameter { .. } => error_code::INVALID_PARAMETER,
        }
    }
}

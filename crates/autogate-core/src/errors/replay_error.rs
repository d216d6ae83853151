//! Replay protocol errors.

use super::error_code::{self, AutogateErrorCode};
use super::ThresholdError;

/// Errors that abort a replay. A replay either runs to completion or fails
/// with one of these; no event is ever skipped silently.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("the timestamp field must be present on every event (expected column `{field}`)")]
    MissingTimestamp { field: String },

    #[error("event {row} has no column `{column}`")]
    MissingColumn { column: String, row: usize },

    #[error("event {row} has label {value} in `{column}`; labels must be 0 or 1")]
    InvalidLabel {
        column: String,
        row: usize,
        value: f64,
    },

    #[error("Threshold error: {0}")]
    Threshold(#[from] ThresholdError),
}

impl AutogateErrorCode for ReplayError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingTimestamp { .. } => error_code::MISSING_TIMESTAMP,
            Self::MissingColumn { .. } => error_code::MISSING_COLUMN,
            Self::InvalidLabel { .. } => error_code::INVALID_LABEL,
            Self::Threshold(e) => e.error_code(),
        }
    }
}

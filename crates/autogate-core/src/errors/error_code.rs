//! Structured error codes shared by every autogate error enum.

/// Every error enum implements this to expose a stable, machine-readable
/// code alongside its human-readable message.
pub trait AutogateErrorCode {
    /// Returns the error code string (e.g., "NOT_REGISTERED").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const NOT_REGISTERED: &str = "NOT_REGISTERED";
pub const INVALID_PARAMETER: &str = "INVALID_PARAMETER";
pub const MISSING_TIMESTAMP: &str = "MISSING_TIMESTAMP";
pub const MISSING_COLUMN: &str = "MISSING_COLUMN";
pub const INVALID_LABEL: &str = "INVALID_LABEL";

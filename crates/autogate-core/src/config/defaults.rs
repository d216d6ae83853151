//! Compiled defaults.

pub const DEFAULT_WINDOW: u32 = 1000;
pub const DEFAULT_CONFIDENCE: f64 = 0.985;
pub const DEFAULT_DEVIATION: f64 = 0.001;
pub const DEFAULT_MAX_PROB: f64 = 0.99;
pub const DEFAULT_CONSTANT_CONFIDENCE: f64 = 0.95;
pub const DEFAULT_TIMESTAMP_COL: &str = "timestamp";
pub const DEFAULT_DELAY_SECS: u64 = 3600;

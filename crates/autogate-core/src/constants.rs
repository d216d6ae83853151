/// autogate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rolling accuracy a model must exceed among its own auto-released
/// instances before the probability gate is consulted at all.
pub const AUTO_RELEASE_PERFORMANCE_GATE: f64 = 0.98;

/// Lowest admissible threshold: a prediction must at least beat chance.
pub const CHANCE_THRESHOLD: f64 = 0.5;

/// Bound on the raw per-step influence of the drift signal: `10 · tanh(change)`.
pub const DRIFT_STEP_SCALE: f64 = 10.0;

/// Seed value of every decayed mean before its first observation.
pub const DEFAULT_ESTIMATOR_SEED: f64 = 1.0;

/// Replay timestamps are in milliseconds; delays are configured in seconds.
pub const MILLIS_PER_SECOND: f64 = 1000.0;

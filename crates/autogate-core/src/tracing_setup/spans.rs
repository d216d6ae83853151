//! Span definitions per operation: replay, flush, fit.

/// Create a replay span for one `evaluate` pass.
#[macro_export]
macro_rules! replay_span {
    ($protocol:expr, $rows:expr) => {
        tracing::info_span!("autogate.replay", protocol = %$protocol, rows = $rows)
    };
}

/// Create a span around one delayed-batch flush.
#[macro_export]
macro_rules! flush_span {
    ($batch_size:expr, $timestamp:expr) => {
        tracing::debug_span!("autogate.flush", batch_size = $batch_size, timestamp = $timestamp)
    };
}

/// Create a warm-start span.
#[macro_export]
macro_rules! fit_span {
    ($protocol:expr, $rows:expr) => {
        tracing::info_span!("autogate.fit", protocol = %$protocol, rows = $rows)
    };
}


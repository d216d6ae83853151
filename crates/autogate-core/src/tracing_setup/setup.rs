//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::VERSION;

static INIT: Once = Once::new();

/// Environment variable holding per-crate log directives.
pub const LOG_ENV_VAR: &str = "AUTOGATE_LOG";

/// Initialize the autogate tracing/logging system.
///
/// Reads `AUTOGATE_LOG` for per-crate log levels, e.g.
/// `AUTOGATE_LOG=autogate_replay=debug,autogate_threshold=info`.
/// Falls back to `autogate=info` if unset or invalid.
///
/// Idempotent. Does nothing if another global subscriber is already set.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("autogate=info"));

        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(filter)
            .try_init()
            .is_ok();
        tracing::debug!(version = VERSION, installed, "autogate tracing initialized");
    });
}

//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding per-module log levels,
/// e.g. `OVERRUN_LOG=project_overrun::simulation=debug`.
pub const LOG_ENV_VAR: &str = "OVERRUN_LOG";

/// Installs the global subscriber. Safe to call more than once.
///
/// `OVERRUN_LOG` wins when set; otherwise `verbose` picks debug over info.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose {
            "project_overrun=debug"
        } else {
            "project_overrun=info"
        };
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}

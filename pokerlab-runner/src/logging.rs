//! Structured logging setup via `tracing`.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

const DEFAULT_LEVEL: &str = "info";

/// Install the global subscriber. Later calls are no-ops.
///
/// `RUST_LOG`, when set, overrides the configured level. Output goes to
/// stderr so command output on stdout stays machine-readable.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(&config.level));

        if config.json {
            tracing_subscriber::fmt()
                .json()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }

        tracing::debug!(level = %config.level, json = config.json, "logging initialized");
    });
}

/// Parse the configured level, falling back to `info` on a bad directive.
fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|e| {
        eprintln!("warning: invalid log level '{level}' ({e}); using 'info'");
        EnvFilter::new(DEFAULT_LEVEL)
    })
}

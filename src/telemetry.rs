//! Tracing subscriber initialisation.

use crate::config::LogConfig;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "TASKBOARD_LOG_FILTER";

/// Error raised when the global subscriber cannot be installed.
#[derive(Debug, Error)]
#[error("failed to initialise tracing subscriber: {0}")]
pub struct TelemetryInitError(String);

/// Resolves the filter: `TASKBOARD_LOG_FILTER` first, then the configured
/// directive, then `info` when the directive does not parse.
#[must_use]
pub fn resolve_filter(config: &LogConfig) -> EnvFilter {
    select_filter(std::env::var(LOG_ENV).ok().as_deref(), config)
}

fn select_filter(override_directive: Option<&str>, config: &LogConfig) -> EnvFilter {
    override_directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_new(&config.filter).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Installs a formatting subscriber as the global default.
///
/// # Errors
///
/// Returns [`TelemetryInitError`] when a global subscriber is already set.
pub fn init(config: &LogConfig) -> Result<(), TelemetryInitError> {
    tracing_subscriber::fmt()
        .with_env_filter(resolve_filter(config))
        .try_init()
        .map_err(|err| TelemetryInitError(err.to_string()))
}

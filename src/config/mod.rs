//! Layered configuration loading.
//!
//! Sources, highest priority first:
//! 1. Environment variables with the `TASKBOARD_` prefix, `__` separating
//!    sections (`TASKBOARD_DATABASE__URL` maps to `database.url`)
//! 2. `taskboard.toml` in the working directory
//! 3. Built-in defaults

mod error;

pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// `TASKBOARD_LOG_FILTER` belongs to [`crate::telemetry`], not [`AppConfig`].
const TELEMETRY_OVERRIDE_KEY: &str = "log_filter";

/// Project-local configuration file name.
pub const CONFIG_FILE: &str = "taskboard.toml";

const fn default_max_connections() -> u32 {
    10
}

const fn default_connection_timeout_secs() -> u64 {
    30
}

fn default_database_url() -> String {
    "postgres://localhost/taskboard".to_owned()
}

fn default_log_filter() -> String {
    "info".to_owned()
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Upper bound on pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection.
    #[serde(default = "default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connection_timeout_secs: default_connection_timeout_secs(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogConfig {
    /// `tracing-subscriber` filter directive, e.g. `info,taskboard=debug`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Loads configuration from defaults, `taskboard.toml`, and environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a value fails
    /// validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Loads a `.env` file from the working directory, then [`Self::load`].
    ///
    /// A missing `.env` file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a value fails
    /// validation.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Some(err) = dotenvy::dotenv().err().filter(|err| !err.not_found()) {
            tracing::warn!(error = %err, "ignoring unreadable .env file");
        }
        Self::load()
    }

    /// Builds the provider chain.
    ///
    /// Public so callers can merge extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if Path::new(CONFIG_FILE).exists() {
            figment = figment.merge(Toml::file(CONFIG_FILE));
        }
        figment.merge(
            Env::prefixed(ENV_PREFIX)
                .ignore(&[TELEMETRY_OVERRIDE_KEY])
                .split("__"),
        )
    }

    /// Extracts and validates configuration from `figment`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.url".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections".to_owned(),
                reason: "must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; every section is optional and
//! `TALIKA_DATABASE` overrides the database path.
//!
//! # Example
//!
//! ```no_run
//! use talika_analytics::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("talika.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::cache::{CacheBackend, CacheConfig};
use super::database::DatabaseConfig;
use super::logging::LoggingConfig;
use crate::application::analytics::AnalyticsConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// SQLite database location.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Report semantics: record types, date field, week start, offset.
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Grouped-row cache backend and lifetime.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., an out-of-range UTC offset)
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.database.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Default configuration with environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.database.apply_env();
        config
    }

    /// Initialize tracing from the logging section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if !self.logging.is_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected 'pretty' or 'json', got '{}'", self.logging.format),
            }
            .into());
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.path",
            }
            .into());
        }

        let analytics = &self.analytics;
        for (field, value) in [
            ("analytics.entity_type", &analytics.entity_type),
            ("analytics.date_field", &analytics.date_field),
            ("analytics.staff_type", &analytics.staff_type),
            ("analytics.service_type", &analytics.service_type),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField { field }.into());
            }
        }
        if analytics.utc_offset().is_none() {
            return Err(ConfigError::InvalidValue {
                field: "analytics.utc_offset_minutes",
                reason: "must be within -1439..=1439".to_string(),
            }
            .into());
        }

        if self.cache.backend != CacheBackend::None && self.cache.ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache.ttl_secs",
                reason: "must be greater than 0 unless the cache is disabled".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

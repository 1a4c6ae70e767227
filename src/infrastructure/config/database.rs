//! Database location.

use serde::Deserialize;

/// Environment variable overriding [`DatabaseConfig::path`].
pub const DATABASE_ENV: &str = "TALIKA_DATABASE";

/// SQLite database configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file, or `:memory:`.
    pub path: String,
}

impl DatabaseConfig {
    /// Apply the `TALIKA_DATABASE` override, if set and non-empty.
    pub fn apply_env(&mut self) {
        if let Some(path) = std::env::var(DATABASE_ENV)
            .ok()
            .filter(|path| !path.trim().is_empty())
        {
            self.path = path;
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "talika.db".to_string(),
        }
    }
}

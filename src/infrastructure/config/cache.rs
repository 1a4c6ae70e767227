//! Bucket cache selection.

use std::time::Duration;

use serde::Deserialize;

/// Where grouped rows are cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Cache table in the report database, shared across runs.
    #[default]
    Sqlite,
    /// Process-local map.
    Memory,
    /// Caching disabled.
    None,
}

/// Bucket cache configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    /// Lifetime of cached rows in seconds.
    pub ttl_secs: u64,
}

impl CacheConfig {
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            ttl_secs: 3600,
        }
    }
}

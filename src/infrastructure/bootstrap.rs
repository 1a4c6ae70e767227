//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use chrono::{Offset, Utc};
use tracing::info;

use crate::adapter::outbound::memory::MemoryBucketCache;
use crate::adapter::outbound::sqlite::database::connection::{open, DbPool};
use crate::adapter::outbound::sqlite::{SqliteBucketCache, SqliteRecordStore};
use crate::application::analytics::AnalyticsService;
use crate::error::Result;
use crate::infrastructure::config::cache::CacheBackend;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::cache::{BucketCache, NoopCache};
use crate::port::outbound::clock::SystemClock;

/// Open the configured database and apply pending migrations.
///
/// # Errors
/// Returns an error if the database cannot be opened or migrated.
pub fn open_database(config: &Config) -> Result<DbPool> {
    let pool = open(&config.database.path)?;
    info!(path = %config.database.path, "Opened report database");
    Ok(pool)
}

/// Build the configured bucket cache over `pool`.
#[must_use]
pub fn build_cache(config: &Config, pool: &DbPool) -> Arc<dyn BucketCache> {
    match config.cache.backend {
        CacheBackend::Sqlite => Arc::new(SqliteBucketCache::new(pool.clone())),
        CacheBackend::Memory => Arc::new(MemoryBucketCache::new()),
        CacheBackend::None => Arc::new(NoopCache),
    }
}

/// Wire an [`AnalyticsService`] over SQLite storage and the system clock.
///
/// # Errors
/// Returns an error if the database cannot be opened or migrated.
pub fn build_service(config: &Config) -> Result<AnalyticsService> {
    let pool = open_database(config)?;
    let store = Arc::new(SqliteRecordStore::new(pool.clone()));
    let cache = build_cache(config, &pool);
    let offset = config.analytics.utc_offset().unwrap_or_else(|| Utc.fix());

    Ok(AnalyticsService::new(
        store.clone(),
        store,
        cache,
        Arc::new(SystemClock::new(offset)),
        config.analytics.clone(),
    )
    .with_cache_ttl(config.cache.ttl()))
}

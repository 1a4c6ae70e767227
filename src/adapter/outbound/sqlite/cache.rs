//! SQLite bucket cache.
//!
//! Rows are stored as JSON payloads with a unix-seconds expiry. Expired
//! entries read as misses and are purged before each write.

use std::time::Duration;

use chrono::Utc;
use diesel::prelude::*;
use tracing::warn;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::CacheEntryRow;
use crate::adapter::outbound::sqlite::database::schema::cache_entries;
use crate::domain::BucketRow;
use crate::error::{Error, Result};
use crate::port::outbound::cache::BucketCache;

/// SQLite-backed [`BucketCache`].
pub struct SqliteBucketCache {
    pool: DbPool,
}

impl SqliteBucketCache {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Delete expired entries, returning how many were removed.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn purge_expired(&self) -> Result<usize> {
        let mut conn = self.pool.get().map_err(|e| Error::Cache(e.to_string()))?;
        diesel::delete(cache_entries::table.filter(cache_entries::expires_at.le(Utc::now().timestamp())))
            .execute(&mut conn)
            .map_err(|e| Error::Cache(e.to_string()))
    }
}

impl BucketCache for SqliteBucketCache {
    fn get(&self, key: &str) -> Result<Option<Vec<BucketRow>>> {
        let mut conn = self.pool.get().map_err(|e| Error::Cache(e.to_string()))?;
        let entry: Option<CacheEntryRow> = cache_entries::table
            .find(key)
            .filter(cache_entries::expires_at.gt(Utc::now().timestamp()))
            .select(CacheEntryRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Cache(e.to_string()))?;

        entry
            .map(|entry| serde_json::from_str(&entry.payload))
            .transpose()
            .map_err(|e| Error::Cache(e.to_string()))
    }

    fn set(&self, key: &str, rows: &[BucketRow], ttl: Duration) -> Result<()> {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let row = CacheEntryRow {
            key: key.to_string(),
            payload: serde_json::to_string(rows)?,
            expires_at: Utc::now().timestamp().saturating_add(ttl_secs),
        };
        if let Err(error) = self.purge_expired() {
            warn!(error = %error, "Failed to purge expired cache entries");
        }
        let mut conn = self.pool.get().map_err(|e| Error::Cache(e.to_string()))?;
        diesel::replace_into(cache_entries::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Cache(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{open, MEMORY_DATABASE};

    fn cache() -> SqliteBucketCache {
        SqliteBucketCache::new(open(MEMORY_DATABASE).unwrap())
    }

    #[test]
    fn stores_and_reads_rows() {
        let cache = cache();
        let rows = vec![BucketRow::hour(2024, 3, 4, 9, 2), BucketRow::hour(2024, 3, 4, 13, 1)];
        cache.set("k", &rows, Duration::from_secs(3600)).unwrap();

        assert_eq!(cache.get("k").unwrap(), Some(rows));
        assert_eq!(cache.get("other").unwrap(), None);
    }

    #[test]
    fn expired_entries_are_misses() {
        let cache = cache();
        cache
            .set("k", &[BucketRow::day(2024, 3, 4, 1)], Duration::ZERO)
            .unwrap();

        assert_eq!(cache.get("k").unwrap(), None);
        assert_eq!(cache.purge_expired().unwrap(), 1);
    }

    #[test]
    fn writes_purge_expired_entries() {
        let cache = cache();
        cache
            .set("stale", &[BucketRow::day(2024, 3, 4, 1)], Duration::ZERO)
            .unwrap();
        cache
            .set("live", &[BucketRow::day(2024, 3, 5, 2)], Duration::from_secs(3600))
            .unwrap();

        let mut conn = cache.pool.get().unwrap();
        let keys: Vec<String> = cache_entries::table
            .select(cache_entries::key)
            .load(&mut conn)
            .unwrap();
        assert_eq!(keys, vec!["live".to_string()]);
    }

    #[test]
    fn later_writes_replace_earlier_ones() {
        let cache = cache();
        let ttl = Duration::from_secs(60);
        cache.set("k", &[BucketRow::month(2024, 3, 1)], ttl).unwrap();
        cache.set("k", &[BucketRow::month(2024, 3, 5)], ttl).unwrap();

        assert_eq!(cache.get("k").unwrap(), Some(vec![BucketRow::month(2024, 3, 5)]));
    }
}

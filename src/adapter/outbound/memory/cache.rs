//! In-memory bucket cache with TTL expiry.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::BucketRow;
use crate::error::Result;
use crate::port::outbound::cache::BucketCache;

#[derive(Debug, Clone)]
struct Entry {
    rows: Vec<BucketRow>,
    expires_at: DateTime<Utc>,
}

/// Process-local [`BucketCache`]. Entries expire after the TTL given at
/// write time and are dropped on the next write.
#[derive(Debug, Default)]
pub struct MemoryBucketCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryBucketCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries held, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl BucketCache for MemoryBucketCache {
    fn get(&self, key: &str) -> Result<Option<Vec<BucketRow>>> {
        let entries = self.entries.read();
        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > Utc::now())
            .map(|entry| entry.rows.clone()))
    }

    fn set(&self, key: &str, rows: &[BucketRow], ttl: Duration) -> Result<()> {
        let now = Utc::now();
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        let expires_at = now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut entries = self.entries.write();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                rows: rows.to_vec(),
                expires_at,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_rows_until_expiry() {
        let cache = MemoryBucketCache::new();
        let rows = vec![BucketRow::day(2024, 3, 4, 2)];
        cache.set("live", &rows, Duration::from_secs(3600)).unwrap();
        cache.set("stale", &rows, Duration::ZERO).unwrap();

        assert_eq!(cache.get("live").unwrap(), Some(rows));
        assert_eq!(cache.get("stale").unwrap(), None);
        assert_eq!(cache.get("absent").unwrap(), None);
    }

    #[test]
    fn writes_drop_expired_entries() {
        let cache = MemoryBucketCache::new();
        cache.set("stale", &[], Duration::ZERO).unwrap();
        assert_eq!(cache.len(), 1);

        cache.set("live", &[], Duration::from_secs(3600)).unwrap();
        assert_eq!(cache.len(), 1);
        assert!(cache.get("live").unwrap().is_some());
        assert!(cache.get("stale").unwrap().is_none());
    }
}

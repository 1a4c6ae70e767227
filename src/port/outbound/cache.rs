//! Grouped-row cache port.

use std::time::Duration;

use crate::domain::BucketRow;
use crate::error::Result;

/// Key-value cache for grouped count rows.
///
/// Entries expire after their TTL and are never invalidated on writes.
/// Failures are reported so callers can treat them as misses.
pub trait BucketCache: Send + Sync {
    /// Return the unexpired rows stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<BucketRow>>>;

    /// Store rows under `key` for `ttl`, replacing any existing entry.
    fn set(&self, key: &str, rows: &[BucketRow], ttl: Duration) -> Result<()>;
}

/// A cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl BucketCache for NoopCache {
    fn get(&self, _key: &str) -> Result<Option<Vec<BucketRow>>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _rows: &[BucketRow], _ttl: Duration) -> Result<()> {
        Ok(())
    }
}

//! Grouped-count fetching with a read-through cache.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, NaiveDate};
use tracing::{debug, warn};

use crate::domain::bucket::total_count;
use crate::domain::{BucketRow, DateWindow, Granularity};
use crate::error::Result;
use crate::port::outbound::cache::BucketCache;
use crate::port::outbound::store::RecordStore;

/// Default lifetime of cached rows.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

const CACHE_PREFIX: &str = "talika_stats";

/// Fetches sparse bucket rows for a window from the record store.
///
/// Rows for cacheable ranges are memoized for the configured TTL. Cache
/// failures never fail a fetch.
#[derive(Clone)]
pub struct AggregateFetcher {
    store: Arc<dyn RecordStore>,
    cache: Arc<dyn BucketCache>,
    ttl: Duration,
    entity_type: String,
    date_field: String,
}

impl AggregateFetcher {
    #[must_use]
    pub fn new(
        store: Arc<dyn RecordStore>,
        cache: Arc<dyn BucketCache>,
        entity_type: impl Into<String>,
        date_field: impl Into<String>,
    ) -> Self {
        Self {
            store,
            cache,
            ttl: DEFAULT_CACHE_TTL,
            entity_type: entity_type.into(),
            date_field: date_field.into(),
        }
    }

    /// Override the cache lifetime.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Grouped counts for `window`, ascending.
    ///
    /// # Errors
    /// Returns an error if the record store query fails.
    pub fn fetch(&self, window: &DateWindow, granularity: Granularity) -> Result<Vec<BucketRow>> {
        let start = window.start_date();
        let end_exclusive = exclusive_end(window.end_date());

        if !window.range.is_cacheable() {
            return self.query(start, end_exclusive, granularity);
        }

        let key = cache_key(window, granularity, start, end_exclusive);
        match self.cache.get(&key) {
            Ok(Some(rows)) => {
                debug!(key = %key, rows = rows.len(), "Bucket cache hit");
                return Ok(rows);
            }
            Ok(None) => debug!(key = %key, "Bucket cache miss"),
            Err(e) => warn!(key = %key, error = %e, "Bucket cache read failed, querying store"),
        }

        let rows = self.query(start, end_exclusive, granularity)?;
        if let Err(e) = self.cache.set(&key, &rows, self.ttl) {
            warn!(key = %key, error = %e, "Failed to cache bucket rows");
        }
        Ok(rows)
    }

    /// Total count for `window`, without building a series.
    ///
    /// # Errors
    /// Returns an error if the record store query fails.
    pub fn total(&self, window: &DateWindow) -> Result<u64> {
        let rows = self.fetch(window, Granularity::Day)?;
        Ok(total_count(&rows))
    }

    fn query(
        &self,
        start: NaiveDate,
        end_exclusive: NaiveDate,
        granularity: Granularity,
    ) -> Result<Vec<BucketRow>> {
        self.store.count_grouped(
            &self.entity_type,
            &self.date_field,
            start,
            end_exclusive,
            granularity,
        )
    }
}

fn exclusive_end(end: NaiveDate) -> NaiveDate {
    end.checked_add_signed(ChronoDuration::days(1)).unwrap_or(end)
}

/// Cache key for a window's rows at one granularity.
#[must_use]
pub fn cache_key(
    window: &DateWindow,
    granularity: Granularity,
    start: NaiveDate,
    end_exclusive: NaiveDate,
) -> String {
    format!(
        "{CACHE_PREFIX}:{}:{granularity}:{start}:{end_exclusive}",
        window.range
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryBucketCache;
    use crate::domain::RangeName;
    use crate::error::Error;
    use crate::testkit::store::InMemoryRecordStore;
    use crate::testkit::domain::appointment_on;

    struct FailingCache;

    impl BucketCache for FailingCache {
        fn get(&self, _key: &str) -> Result<Option<Vec<BucketRow>>> {
            Err(Error::Cache("unavailable".into()))
        }

        fn set(&self, _key: &str, _rows: &[BucketRow], _ttl: Duration) -> Result<()> {
            Err(Error::Cache("unavailable".into()))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_with_march() -> Arc<InMemoryRecordStore> {
        let store = InMemoryRecordStore::new();
        store.insert(appointment_on(1, "2024-03-04 09:00:00"));
        store.insert(appointment_on(2, "2024-03-04 10:30:00"));
        store.insert(appointment_on(3, "2024-03-06 14:00:00"));
        Arc::new(store)
    }

    fn fetcher(store: Arc<InMemoryRecordStore>, cache: Arc<dyn BucketCache>) -> AggregateFetcher {
        AggregateFetcher::new(store, cache, "appointment", "appointmentDate")
    }

    #[test]
    fn cacheable_range_is_served_from_cache() {
        let store = store_with_march();
        let fetcher = fetcher(store.clone(), Arc::new(MemoryBucketCache::new()));
        let window = DateWindow::from_dates(RangeName::ThisWeek, date(2024, 3, 4), date(2024, 3, 10));

        let first = fetcher.fetch(&window, Granularity::Day).unwrap();
        store.insert(appointment_on(4, "2024-03-07 11:00:00"));
        let second = fetcher.fetch(&window, Granularity::Day).unwrap();

        assert_eq!(first, second);
        assert_eq!(total_count(&second), 3);
        assert_eq!(store.grouped_queries(), 1);
    }

    #[test]
    fn non_cacheable_range_always_queries_store() {
        let store = store_with_march();
        let fetcher = fetcher(store.clone(), Arc::new(MemoryBucketCache::new()));
        let window = DateWindow::from_dates(RangeName::Custom, date(2024, 3, 1), date(2024, 3, 31));

        fetcher.fetch(&window, Granularity::Day).unwrap();
        store.insert(appointment_on(4, "2024-03-07 11:00:00"));
        let rows = fetcher.fetch(&window, Granularity::Day).unwrap();

        assert_eq!(total_count(&rows), 4);
        assert_eq!(store.grouped_queries(), 2);
    }

    #[test]
    fn cache_failures_fall_through_to_store() {
        let store = store_with_march();
        let fetcher = fetcher(store.clone(), Arc::new(FailingCache));
        let window = DateWindow::from_dates(RangeName::ThisMonth, date(2024, 3, 1), date(2024, 3, 31));

        let rows = fetcher.fetch(&window, Granularity::Day).unwrap();
        assert_eq!(rows, vec![BucketRow::day(2024, 3, 4, 2), BucketRow::day(2024, 3, 6, 1)]);
    }

    #[test]
    fn granularities_do_not_share_cache_entries() {
        let store = store_with_march();
        let fetcher = fetcher(store, Arc::new(MemoryBucketCache::new()));
        let window = DateWindow::from_dates(RangeName::ThisMonth, date(2024, 3, 1), date(2024, 3, 31));

        let days = fetcher.fetch(&window, Granularity::Day).unwrap();
        let months = fetcher.fetch(&window, Granularity::Month).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(months, vec![BucketRow::month(2024, 3, 3)]);
    }

    #[test]
    fn window_end_is_inclusive() {
        let store = store_with_march();
        let fetcher = fetcher(store, Arc::new(MemoryBucketCache::new()));
        let window = DateWindow::from_dates(RangeName::Custom, date(2024, 3, 1), date(2024, 3, 6));
        assert_eq!(fetcher.total(&window).unwrap(), 3);

        let window = DateWindow::from_dates(RangeName::Custom, date(2024, 3, 5), date(2024, 3, 5));
        assert_eq!(fetcher.total(&window).unwrap(), 0);
    }

    #[test]
    fn cache_key_includes_range_unit_and_bounds() {
        let window = DateWindow::from_dates(RangeName::Today, date(2024, 3, 4), date(2024, 3, 4));
        let key = cache_key(&window, Granularity::Hour, date(2024, 3, 4), date(2024, 3, 5));
        assert_eq!(key, "talika_stats:today:hour:2024-03-04:2024-03-05");
    }
}

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use talika_analytics::adapter::outbound::memory::MemoryBucketCache;
use talika_analytics::application::analytics::{AnalyticsConfig, AnalyticsService};
use talika_analytics::testkit::clock::FixedClock;
use talika_analytics::testkit::store::InMemoryRecordStore;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A service over `store` with a memory cache and the clock pinned to noon
/// on `today`.
pub fn service_at(
    store: Arc<InMemoryRecordStore>,
    today: NaiveDate,
    config: AnalyticsConfig,
) -> AnalyticsService {
    AnalyticsService::new(
        store.clone(),
        store,
        Arc::new(MemoryBucketCache::new()),
        Arc::new(FixedClock::on_date(today)),
        config,
    )
}

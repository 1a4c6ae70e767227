//! Analytics service composing range resolution, fetching, series
//! construction, and entity aggregation into reports.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Offset, Utc};
use tracing::{debug, info};

use crate::domain::series::series_total;
use crate::domain::{DateWindow, Dimension, EntityAggregate, GrowthMetric};
use crate::error::Result;
use crate::port::outbound::cache::BucketCache;
use crate::port::outbound::clock::Clock;
use crate::port::outbound::store::{EntityDirectory, RecordStore};

use super::config::AnalyticsConfig;
use super::entity::EntityAggregator;
use super::fetcher::AggregateFetcher;
use super::report::{ComparisonReport, CustomerReport, EntityReport, OverviewReport, ReportRequest};
use super::resolver::RangeResolver;
use super::selector::select_granularity;
use super::series::SeriesBuilder;

/// Produces appointment reports from injected storage, cache, and clock.
#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn RecordStore>,
    resolver: RangeResolver,
    fetcher: AggregateFetcher,
    builder: SeriesBuilder,
    entities: EntityAggregator,
    config: AnalyticsConfig,
}

impl AnalyticsService {
    #[must_use]
    pub fn new(
        store: Arc<dyn RecordStore>,
        directory: Arc<dyn EntityDirectory>,
        cache: Arc<dyn BucketCache>,
        clock: Arc<dyn Clock>,
        config: AnalyticsConfig,
    ) -> Self {
        let offset = config.utc_offset().unwrap_or_else(|| Utc.fix());
        Self {
            resolver: RangeResolver::new(clock, config.week_start),
            fetcher: AggregateFetcher::new(
                store.clone(),
                cache,
                config.entity_type.clone(),
                config.date_field.clone(),
            ),
            builder: SeriesBuilder::new(offset),
            entities: EntityAggregator::new(store.clone(), directory, &config),
            store,
            config,
        }
    }

    /// Override how long grouped rows stay cached.
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.fetcher = self.fetcher.with_ttl(ttl);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Resolve the window a request covers.
    ///
    /// # Errors
    /// Returns [`crate::error::Error::InvalidDate`] on malformed explicit
    /// dates.
    pub fn window(&self, request: &ReportRequest) -> Result<DateWindow> {
        self.resolver
            .resolve(request.range, request.start.as_deref(), request.end.as_deref())
    }

    /// Dense appointment series for a request, compared against the
    /// previous period.
    ///
    /// Requests with both explicit dates are not compared.
    ///
    /// # Errors
    /// Returns an error on malformed dates or store failure.
    pub fn compare(&self, request: &ReportRequest) -> Result<ComparisonReport> {
        let window = self.window(request)?;
        let granularity = select_granularity(request.range, &window, request.day_by_day());
        let rows = self.fetcher.fetch(&window, granularity)?;
        let series = self.builder.build(&window, granularity, &rows);
        let current_total = series_total(&series);

        let growth = match self.previous_window(request) {
            Some(previous) => GrowthMetric::between(current_total, self.fetcher.total(&previous)?),
            None => GrowthMetric::uncompared(current_total),
        };

        info!(
            range = %request.range,
            granularity = %granularity,
            points = series.len(),
            current = current_total,
            previous = growth.previous,
            "Built appointment series"
        );

        Ok(ComparisonReport {
            range: request.range,
            window,
            granularity,
            series,
            current_total,
            previous_total: growth.previous,
            growth,
        })
    }

    /// Appointment counts per entity within `[window.start, window.end]`.
    ///
    /// # Errors
    /// Returns an error if the store or directory fails.
    pub fn aggregate_by_entity(
        &self,
        dimension: Dimension,
        window: &DateWindow,
    ) -> Result<Vec<EntityAggregate>> {
        self.entities
            .aggregate(dimension, window.start_date(), window.end_date())
    }

    /// Distinct customers for a request, split into new and returning.
    ///
    /// A customer is returning when they also booked in the previous
    /// period.
    ///
    /// # Errors
    /// Returns an error on malformed dates or store failure.
    pub fn customer_report(&self, request: &ReportRequest) -> Result<CustomerReport> {
        let window = self.window(request)?;
        let customers = self.aggregate_by_entity(Dimension::Customer, &window)?;
        let total = customers.len() as u64;

        let (growth, returning) = match self.previous_window(request) {
            Some(previous) => {
                let previous_ids = self.distinct_ids(Dimension::Customer, &previous)?;
                let returning = if customers.is_empty() || previous_ids.is_empty() {
                    0
                } else {
                    customers
                        .iter()
                        .filter(|customer| previous_ids.contains(&customer.id))
                        .count() as u64
                };
                (GrowthMetric::between(total, previous_ids.len() as u64), returning)
            }
            None => (GrowthMetric::uncompared(total), 0),
        };

        debug!(range = %request.range, total, returning, "Built customer report");

        Ok(CustomerReport {
            range: request.range,
            window,
            total,
            new: total - returning,
            returning,
            growth,
            customers,
        })
    }

    /// Appointment counts per staff member or service for a request, with
    /// growth in distinct entities against the previous period.
    ///
    /// # Errors
    /// Returns an error on malformed dates or store failure.
    pub fn entity_report(&self, dimension: Dimension, request: &ReportRequest) -> Result<EntityReport> {
        let window = self.window(request)?;
        let entities = self.aggregate_by_entity(dimension, &window)?;
        let total = entities.len() as u64;

        let growth = match self.previous_window(request) {
            Some(previous) => {
                let previous_total = self.distinct_ids(dimension, &previous)?.len() as u64;
                GrowthMetric::between(total, previous_total)
            }
            None => GrowthMetric::uncompared(total),
        };

        debug!(dimension = %dimension, range = %request.range, total, "Built entity report");

        Ok(EntityReport {
            dimension,
            range: request.range,
            window,
            total,
            growth,
            entities,
        })
    }

    /// Approved and pending appointments dated today.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub fn overview(&self) -> Result<OverviewReport> {
        let date = self.resolver.today();
        let count = |status: &str| {
            self.store.count_where(
                &self.config.entity_type,
                &self.config.date_field,
                status,
                date,
                date,
            )
        };
        Ok(OverviewReport {
            date,
            approved: count(&self.config.approved_status)?,
            pending: count(&self.config.pending_status)?,
        })
    }

    /// Window of the period a request is compared against, if any.
    fn previous_window(&self, request: &ReportRequest) -> Option<DateWindow> {
        if request.is_explicit() {
            return None;
        }
        let previous = request.range.previous()?;
        Some(self.resolver.resolve_dates(previous, None, None))
    }

    fn distinct_ids(&self, dimension: Dimension, window: &DateWindow) -> Result<BTreeSet<String>> {
        self.entities
            .distinct_ids(dimension, window.start_date(), window.end_date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryBucketCache;
    use crate::domain::{Granularity, GrowthPercent, RangeName};
    use crate::error::Error;
    use crate::testkit::clock::FixedClock;
    use crate::testkit::domain::{appointment, appointment_on, with_status};
    use crate::testkit::store::InMemoryRecordStore;
    use chrono::NaiveDate;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service_at(store: Arc<InMemoryRecordStore>, today: NaiveDate) -> AnalyticsService {
        AnalyticsService::new(
            store.clone(),
            store,
            Arc::new(MemoryBucketCache::new()),
            Arc::new(FixedClock::on_date(today)),
            AnalyticsConfig::default(),
        )
    }

    #[test]
    fn today_compares_against_yesterday() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.insert(appointment_on(1, "2024-03-15 09:15:00"));
        store.insert(appointment_on(2, "2024-03-15 09:45:00"));
        store.insert(appointment_on(3, "2024-03-15 16:00:00"));
        store.insert(appointment_on(4, "2024-03-14 11:00:00"));

        let report = service_at(store, date(2024, 3, 15))
            .compare(&ReportRequest::named(RangeName::Today))
            .unwrap();

        assert_eq!(report.granularity, Granularity::Hour);
        assert_eq!(report.series.len(), 24);
        assert_eq!(report.series[9].count, 2);
        assert_eq!(report.current_total, 3);
        assert_eq!(report.previous_total, 1);
        assert_eq!(report.growth.percent.to_string(), "200");
    }

    #[test]
    fn explicit_dates_skip_comparison() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.insert(appointment_on(1, "2024-02-10 10:00:00"));
        store.insert(appointment_on(2, "2024-01-10 10:00:00"));

        let report = service_at(store, date(2024, 3, 15))
            .compare(&ReportRequest::between("2024-02-01", "2024-02-29"))
            .unwrap();

        assert_eq!(report.granularity, Granularity::Day);
        assert_eq!(report.series.len(), 29);
        assert_eq!(report.current_total, 1);
        assert_eq!(report.previous_total, 0);
        assert_eq!(report.growth.percent, GrowthPercent::ZERO);
    }

    #[test]
    fn empty_previous_period_is_positive_infinity() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.insert(appointment_on(1, "2024-03-12 10:00:00"));

        let report = service_at(store, date(2024, 3, 15))
            .compare(&ReportRequest::named(RangeName::ThisWeek))
            .unwrap();

        assert_eq!(report.series.len(), 7);
        assert_eq!(report.growth.percent, GrowthPercent::PositiveInfinity);
        assert_eq!(report.growth.percent.suffix(), "");
    }

    #[test]
    fn month_range_honours_day_by_day_hint() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.insert(appointment_on(1, "2024-03-02 10:00:00"));
        let service = service_at(store, date(2024, 3, 15));

        let daily = service.compare(&ReportRequest::named(RangeName::ThisMonth)).unwrap();
        assert_eq!(daily.series.len(), 31);

        let monthly = service
            .compare(&ReportRequest::named(RangeName::ThisMonth).with_day_by_day(false))
            .unwrap();
        assert_eq!(monthly.granularity, Granularity::Month);
        assert_eq!(monthly.series.len(), 1);
        assert_eq!(monthly.current_total, 1);
    }

    #[test]
    fn malformed_dates_fail_before_store_access() {
        let store = Arc::new(InMemoryRecordStore::new());
        let service = service_at(store.clone(), date(2024, 3, 15));

        let result = service.compare(&ReportRequest::between("2024-02-30", "2024-03-01"));
        assert!(matches!(result, Err(Error::InvalidDate { .. })));
        assert_eq!(store.grouped_queries(), 0);
    }

    #[test]
    fn customer_report_splits_new_and_returning() {
        let store = Arc::new(InMemoryRecordStore::new());
        let customer = |id: i64, name: &str| json!({ "customers": [{ "value": id, "label": name }] });
        // February
        store.insert(appointment(1, "2024-02-05", customer(7, "Ram")));
        store.insert(appointment(2, "2024-02-06", customer(8, "Sita")));
        // March
        store.insert(appointment(3, "2024-03-01", customer(7, "Ram")));
        store.insert(appointment(4, "2024-03-02", customer(9, "Hari")));
        store.insert(appointment(5, "2024-03-03", customer(10, "Gita")));
        store.insert(appointment(6, "2024-03-04", customer(9, "Hari")));

        let report = service_at(store, date(2024, 3, 15))
            .customer_report(&ReportRequest::named(RangeName::ThisMonth))
            .unwrap();

        assert_eq!(report.total, 3);
        assert_eq!(report.returning, 1);
        assert_eq!(report.new, 2);
        assert_eq!(report.growth.previous, 2);
        assert_eq!(report.customers[1].count, 2);
    }

    #[test]
    fn entity_report_compares_distinct_entities() {
        let store = Arc::new(InMemoryRecordStore::new());
        let staff = |id: i64| json!({ "staff": { "value": id, "label": format!("Staff {id}") } });
        store.insert(appointment(1, "2023-06-01", staff(1)));
        store.insert(appointment(2, "2024-01-10", staff(1)));
        store.insert(appointment(3, "2024-02-10", staff(2)));

        let report = service_at(store, date(2024, 3, 15))
            .entity_report(Dimension::Staff, &ReportRequest::named(RangeName::ThisYear))
            .unwrap();

        assert_eq!(report.total, 2);
        assert_eq!(report.growth.previous, 1);
        assert_eq!(report.growth.percent.to_string(), "100");
        assert_eq!(report.entities[0].display_name, "Staff 1");
    }

    #[test]
    fn overview_counts_today_by_status() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.insert(with_status(appointment_on(1, "2024-03-15 09:00:00"), "approved"));
        store.insert(with_status(appointment_on(2, "2024-03-15 10:00:00"), "approved"));
        store.insert(with_status(appointment_on(3, "2024-03-15 11:00:00"), "pending"));
        store.insert(with_status(appointment_on(4, "2024-03-14 11:00:00"), "pending"));

        let overview = service_at(store, date(2024, 3, 15)).overview().unwrap();
        assert_eq!(overview.date, date(2024, 3, 15));
        assert_eq!(overview.approved, 2);
        assert_eq!(overview.pending, 1);
    }
}

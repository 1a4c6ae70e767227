//! Reports over a file-backed SQLite database.

mod support;

use std::sync::Arc;

use serde_json::json;
use talika_analytics::adapter::outbound::sqlite::database::connection::{open, DbPool};
use talika_analytics::adapter::outbound::sqlite::{SqliteBucketCache, SqliteRecordStore};
use talika_analytics::application::analytics::{AnalyticsConfig, AnalyticsService, ReportRequest};
use talika_analytics::domain::{Dimension, Granularity, RangeName};
use talika_analytics::port::outbound::cache::BucketCache;
use talika_analytics::port::outbound::store::{EntityDirectory, RecordStore};
use talika_analytics::testkit::clock::FixedClock;
use talika_analytics::testkit::domain::{appointment, appointment_on, service, staff, with_status};
use tempfile::TempDir;

use support::date;

/// Temporary SQLite database for integration tests.
struct TempDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TempDb {
    fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("talika.db");
        let pool = open(path.to_str().expect("utf-8 path")).expect("open sqlite database");
        Self { _dir: dir, pool }
    }

    fn store(&self) -> SqliteRecordStore {
        SqliteRecordStore::new(self.pool.clone())
    }

    fn service_at(&self, today: chrono::NaiveDate) -> AnalyticsService {
        let store = Arc::new(self.store());
        AnalyticsService::new(
            store.clone(),
            store,
            Arc::new(SqliteBucketCache::new(self.pool.clone())),
            Arc::new(FixedClock::on_date(today)),
            AnalyticsConfig::default(),
        )
    }
}

#[test]
fn hourly_series_from_stored_appointments() {
    let db = TempDb::create();
    db.store()
        .upsert(&[
            appointment_on(1, "2024-03-15 09:15:00"),
            appointment_on(2, "2024-03-15 09:50:00"),
            appointment_on(3, "2024-03-15T17:05:00"),
            appointment_on(4, "2024-03-14 08:00:00"),
        ])
        .unwrap();

    let report = db
        .service_at(date(2024, 3, 15))
        .compare(&ReportRequest::named(RangeName::Today))
        .unwrap();

    assert_eq!(report.granularity, Granularity::Hour);
    assert_eq!(report.series.len(), 24);
    assert_eq!(report.series[9].count, 2);
    assert_eq!(report.series[17].count, 1);
    assert_eq!(report.current_total, 3);
    assert_eq!(report.previous_total, 1);
}

#[test]
fn grouped_rows_are_cached_in_the_database() {
    let db = TempDb::create();
    db.store().upsert(&[appointment_on(1, "2024-03-12 10:00:00")]).unwrap();
    let service = db.service_at(date(2024, 3, 15));
    let request = ReportRequest::named(RangeName::ThisMonth);

    let first = service.compare(&request).unwrap();
    db.store().upsert(&[appointment_on(2, "2024-03-13 10:00:00")]).unwrap();
    let second = service.compare(&request).unwrap();

    assert_eq!(first.current_total, 1);
    assert_eq!(second.current_total, 1);

    let cache = SqliteBucketCache::new(db.pool.clone());
    assert_eq!(cache.purge_expired().unwrap(), 0);
    assert!(cache
        .get("talika_stats:this_month:day:2024-03-01:2024-04-01")
        .unwrap()
        .is_some());
}

#[test]
fn custom_range_reads_through_to_the_store() {
    let db = TempDb::create();
    db.store().upsert(&[appointment_on(1, "2024-02-10 10:00:00")]).unwrap();
    let service = db.service_at(date(2024, 3, 15));
    let request = ReportRequest::between("2024-02-01", "2024-02-29");

    assert_eq!(service.compare(&request).unwrap().current_total, 1);
    db.store().upsert(&[appointment_on(2, "2024-02-11 10:00:00")]).unwrap();
    assert_eq!(service.compare(&request).unwrap().current_total, 2);
}

#[test]
fn upsert_replaces_records_by_id() {
    let db = TempDb::create();
    let store = db.store();
    store.upsert(&[appointment_on(1, "2024-03-01 10:00:00")]).unwrap();
    store.upsert(&[appointment_on(1, "2024-03-20 10:00:00")]).unwrap();

    let march = store
        .query_records("appointment", "appointmentDate", date(2024, 3, 1), date(2024, 3, 31))
        .unwrap();
    assert_eq!(march.len(), 1);
    assert_eq!(
        march[0].meta("appointmentDate"),
        Some(&json!("2024-03-20 10:00:00"))
    );
}

#[test]
fn directory_lookups_resolve_staff_and_services() {
    let db = TempDb::create();
    let store = db.store();
    store
        .upsert(&[
            staff(10, "Asha", json!([{ "serviceID": 1 }])),
            service(1, "Haircut", json!([{ "staffId": 10 }])),
        ])
        .unwrap();

    assert_eq!(store.find("staff", "10").unwrap().unwrap().title, "Asha");
    assert_eq!(store.find("service", "1").unwrap().unwrap().title, "Haircut");
    assert!(store.find("service", "10").unwrap().is_none());
    assert!(store.find("staff", "not-a-number").unwrap().is_none());
}

#[test]
fn staff_report_over_sqlite() {
    let db = TempDb::create();
    let booked = |id: i64, day: &str| {
        appointment(id, day, json!({ "staff": { "value": 10, "label": "Asha K." } }))
    };
    db.store()
        .upsert(&[
            staff(10, "Asha", json!([{ "serviceID": 1 }, { "serviceID": 2 }])),
            service(1, "Haircut", json!([])),
            service(2, "Shave", json!([])),
            booked(100, "2024-03-02"),
            booked(101, "2024-03-09"),
        ])
        .unwrap();

    let report = db
        .service_at(date(2024, 3, 15))
        .entity_report(Dimension::Staff, &ReportRequest::named(RangeName::ThisMonth))
        .unwrap();

    assert_eq!(report.entities.len(), 1);
    assert_eq!(report.entities[0].display_name, "Asha K.");
    assert_eq!(report.entities[0].count, 2);
    assert_eq!(report.entities[0].associated_label, "Shave and 1 Other");
}

#[test]
fn overview_counts_statuses_for_today() {
    let db = TempDb::create();
    db.store()
        .upsert(&[
            with_status(appointment_on(1, "2024-03-15 09:00:00"), "approved"),
            with_status(appointment_on(2, "2024-03-15 11:00:00"), "approved"),
            with_status(appointment_on(3, "2024-03-15 12:00:00"), "pending"),
            with_status(appointment_on(4, "2024-03-14 12:00:00"), "approved"),
        ])
        .unwrap();

    let overview = db.service_at(date(2024, 3, 15)).overview().unwrap();

    assert_eq!(overview.date, date(2024, 3, 15));
    assert_eq!(overview.approved, 2);
    assert_eq!(overview.pending, 1);
}

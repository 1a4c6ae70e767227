//! In-memory record store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use parking_lot::RwLock;
use serde_json::Value;

use crate::domain::{BucketKey, BucketRow, Granularity, Record};
use crate::error::Result;
use crate::port::outbound::store::{EntityDirectory, RecordStore};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// A [`RecordStore`] and [`EntityDirectory`] over a vector of records.
///
/// Counts grouped queries so tests can observe cache behavior.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<Record>>,
    grouped_queries: AtomicUsize,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: Record) {
        self.records.write().push(record);
    }

    /// Number of `count_grouped` calls served.
    pub fn grouped_queries(&self) -> usize {
        self.grouped_queries.load(Ordering::SeqCst)
    }

    /// Records of `entity_type` dated within `[start, end)`, ascending.
    fn dated(
        &self,
        entity_type: &str,
        date_field: &str,
        start: NaiveDate,
        end_exclusive: NaiveDate,
    ) -> Vec<(NaiveDateTime, Record)> {
        let mut dated: Vec<(NaiveDateTime, Record)> = self
            .records
            .read()
            .iter()
            .filter(|record| record.entity_type == entity_type)
            .filter_map(|record| Some((occurred_at(record, date_field)?, record.clone())))
            .filter(|(at, _)| at.date() >= start && at.date() < end_exclusive)
            .collect();
        dated.sort_by_key(|(at, record)| (*at, record.id));
        dated
    }
}

fn occurred_at(record: &Record, date_field: &str) -> Option<NaiveDateTime> {
    let raw = record.meta(date_field).and_then(Value::as_str)?.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

fn bucket_key(at: NaiveDateTime, granularity: Granularity) -> BucketKey {
    let (year, month, day) = (at.year(), at.month(), at.day());
    match granularity {
        Granularity::Hour => BucketKey::Hour {
            year,
            month,
            day,
            hour: at.hour(),
        },
        Granularity::Day => BucketKey::Day { year, month, day },
        Granularity::Month => BucketKey::Month { year, month },
    }
}

fn day_after(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

impl RecordStore for InMemoryRecordStore {
    fn count_grouped(
        &self,
        entity_type: &str,
        date_field: &str,
        start: NaiveDate,
        end_exclusive: NaiveDate,
        granularity: Granularity,
    ) -> Result<Vec<BucketRow>> {
        self.grouped_queries.fetch_add(1, Ordering::SeqCst);

        let mut groups: BTreeMap<BucketKey, u64> = BTreeMap::new();
        for (at, _) in self.dated(entity_type, date_field, start, end_exclusive) {
            *groups.entry(bucket_key(at, granularity)).or_default() += 1;
        }
        Ok(groups
            .into_iter()
            .map(|(key, count)| BucketRow { key, count })
            .collect())
    }

    fn query_records(
        &self,
        entity_type: &str,
        date_field: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Record>> {
        Ok(self
            .dated(entity_type, date_field, start, day_after(end))
            .into_iter()
            .map(|(_, record)| record)
            .collect())
    }

    fn count_where(
        &self,
        entity_type: &str,
        date_field: &str,
        status: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u64> {
        Ok(self
            .dated(entity_type, date_field, start, day_after(end))
            .iter()
            .filter(|(_, record)| record.status == status)
            .count() as u64)
    }
}

impl EntityDirectory for InMemoryRecordStore {
    fn find(&self, entity_type: &str, id: &str) -> Result<Option<Record>> {
        let Ok(id) = id.parse::<i64>() else {
            return Ok(None);
        };
        Ok(self
            .records
            .read()
            .iter()
            .find(|record| record.entity_type == entity_type && record.id == id)
            .cloned())
    }
}

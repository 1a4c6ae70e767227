//! Record storage ports.

use chrono::NaiveDate;

use crate::domain::{BucketRow, Granularity, Record};
use crate::error::Result;

/// Read-side record queries used by the analytics engine.
///
/// Dates are compared on the calendar date stored under `date_field` in
/// each record's metadata.
pub trait RecordStore: Send + Sync {
    /// Count records per bucket for `start <= date < end_exclusive`.
    ///
    /// Returns one row per non-empty bucket, keyed at `granularity`, in
    /// ascending date order.
    fn count_grouped(
        &self,
        entity_type: &str,
        date_field: &str,
        start: NaiveDate,
        end_exclusive: NaiveDate,
        granularity: Granularity,
    ) -> Result<Vec<BucketRow>>;

    /// Fetch full records with `start <= date <= end`, ascending by date.
    fn query_records(
        &self,
        entity_type: &str,
        date_field: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Record>>;

    /// Count records whose status matches `status` with `start <= date <= end`.
    fn count_where(
        &self,
        entity_type: &str,
        date_field: &str,
        status: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u64>;
}

/// Lookup of individual records by type and identifier.
///
/// Used to resolve staff members and services referenced from appointments.
pub trait EntityDirectory: Send + Sync {
    /// Find a record by entity type and identifier.
    fn find(&self, entity_type: &str, id: &str) -> Result<Option<Record>>;
}

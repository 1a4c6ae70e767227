//! SQLite record store implementation.
//!
//! Records keep their metadata as a JSON object; date filters and
//! grouping read the configured date field with `json_extract`.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sql_types::Text;
use serde_json::{Map, Value};
use tracing::debug;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{CountRow, GroupedCountRow, RecordRow};
use crate::adapter::outbound::sqlite::database::schema::records;
use crate::domain::{BucketRow, Granularity, Record};
use crate::error::{Error, Result};
use crate::port::outbound::store::{EntityDirectory, RecordStore};

/// SQLite-backed record store.
///
/// Implements both [`RecordStore`] and [`EntityDirectory`] over the
/// `records` table.
pub struct SqliteRecordStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteRecordStore {
    /// Create a new SQLite record store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert records, replacing any with the same id.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn upsert(&self, records: &[Record]) -> Result<usize> {
        let rows = records
            .iter()
            .map(Self::to_row)
            .collect::<Result<Vec<_>>>()?;
        let mut conn = self.connection()?;

        conn.transaction(|conn| {
            rows.iter().try_fold(0, |written, row| {
                diesel::replace_into(records::table)
                    .values(row)
                    .execute(conn)
                    .map(|count| written + count)
            })
        })
        .map_err(|e| Error::Database(e.to_string()))
    }

    fn connection(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }

    fn to_row(record: &Record) -> Result<RecordRow> {
        Ok(RecordRow {
            id: record.id,
            entity_type: record.entity_type.clone(),
            title: record.title.clone(),
            status: record.status.clone(),
            meta: serde_json::to_string(&record.meta)?,
        })
    }

    fn from_row(row: RecordRow) -> Result<Record> {
        let meta: Map<String, Value> = if row.meta.trim().is_empty() {
            Map::new()
        } else {
            serde_json::from_str(&row.meta)?
        };
        Ok(Record {
            id: row.id,
            entity_type: row.entity_type,
            title: row.title,
            status: row.status,
            meta,
        })
    }
}

/// JSON path selecting a top-level metadata field.
fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', "\\\""))
}

/// Expressions selecting each grouping column, `NULL` when it is not part
/// of `granularity`.
fn grouping_columns(granularity: Granularity) -> (&'static str, &'static str) {
    const DAY: &str = "CAST(strftime('%d', occurred) AS INTEGER)";
    const HOUR: &str = "CAST(strftime('%H', occurred) AS INTEGER)";
    match granularity {
        Granularity::Hour => (DAY, HOUR),
        Granularity::Day => (DAY, "NULL"),
        Granularity::Month => ("NULL", "NULL"),
    }
}

fn to_bucket(row: GroupedCountRow, granularity: Granularity) -> Option<BucketRow> {
    let year = row.year?;
    let month = u32::try_from(row.month?).ok()?;
    let count = u64::try_from(row.count).ok()?;
    match granularity {
        Granularity::Month => Some(BucketRow::month(year, month, count)),
        Granularity::Day => Some(BucketRow::day(year, month, u32::try_from(row.day?).ok()?, count)),
        Granularity::Hour => Some(BucketRow::hour(
            year,
            month,
            u32::try_from(row.day?).ok()?,
            u32::try_from(row.hour?).ok()?,
            count,
        )),
    }
}

impl RecordStore for SqliteRecordStore {
    fn count_grouped(
        &self,
        entity_type: &str,
        date_field: &str,
        start: NaiveDate,
        end_exclusive: NaiveDate,
        granularity: Granularity,
    ) -> Result<Vec<BucketRow>> {
        let (day, hour) = grouping_columns(granularity);
        let query = format!(
            "SELECT CAST(strftime('%Y', occurred) AS INTEGER) AS year, \
                    CAST(strftime('%m', occurred) AS INTEGER) AS month, \
                    {day} AS day, {hour} AS hour, COUNT(*) AS count \
             FROM (SELECT json_extract(meta, ?) AS occurred FROM records WHERE entity_type = ?) \
             WHERE occurred >= ? AND occurred < ? \
             GROUP BY year, month, day, hour \
             ORDER BY year, month, day, hour"
        );

        let mut conn = self.connection()?;
        let rows: Vec<GroupedCountRow> = diesel::sql_query(query)
            .bind::<Text, _>(json_path(date_field))
            .bind::<Text, _>(entity_type)
            .bind::<Text, _>(start.to_string())
            .bind::<Text, _>(end_exclusive.to_string())
            .load(&mut conn)?;

        let buckets: Vec<BucketRow> = rows
            .into_iter()
            .filter_map(|row| to_bucket(row, granularity))
            .collect();
        debug!(
            entity_type,
            granularity = %granularity,
            %start,
            %end_exclusive,
            buckets = buckets.len(),
            "Loaded grouped counts"
        );
        Ok(buckets)
    }

    fn query_records(
        &self,
        entity_type: &str,
        date_field: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Record>> {
        let mut conn = self.connection()?;
        let rows: Vec<RecordRow> = diesel::sql_query(
            "SELECT id, entity_type, title, status, meta FROM records \
             WHERE entity_type = ? AND substr(json_extract(meta, ?), 1, 10) BETWEEN ? AND ? \
             ORDER BY json_extract(meta, ?), id",
        )
        .bind::<Text, _>(entity_type)
        .bind::<Text, _>(json_path(date_field))
        .bind::<Text, _>(start.to_string())
        .bind::<Text, _>(end.to_string())
        .bind::<Text, _>(json_path(date_field))
        .load(&mut conn)?;

        rows.into_iter().map(Self::from_row).collect()
    }

    fn count_where(
        &self,
        entity_type: &str,
        date_field: &str,
        status: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u64> {
        let mut conn = self.connection()?;
        let row: CountRow = diesel::sql_query(
            "SELECT COUNT(*) AS count FROM records \
             WHERE entity_type = ? AND status = ? \
             AND substr(json_extract(meta, ?), 1, 10) BETWEEN ? AND ?",
        )
        .bind::<Text, _>(entity_type)
        .bind::<Text, _>(status)
        .bind::<Text, _>(json_path(date_field))
        .bind::<Text, _>(start.to_string())
        .bind::<Text, _>(end.to_string())
        .get_result(&mut conn)?;

        Ok(u64::try_from(row.count).unwrap_or_default())
    }
}

impl EntityDirectory for SqliteRecordStore {
    fn find(&self, entity_type: &str, id: &str) -> Result<Option<Record>> {
        let Ok(id) = id.parse::<i64>() else {
            return Ok(None);
        };
        let mut conn = self.connection()?;
        let row: Option<RecordRow> = records::table
            .filter(records::entity_type.eq(entity_type))
            .filter(records::id.eq(id))
            .select(RecordRow::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(Self::from_row).transpose()
    }
}

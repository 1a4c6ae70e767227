//! Database model types for Diesel ORM.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Nullable};

use super::schema::{cache_entries, records};

/// Database row for a stored record.
#[derive(Queryable, QueryableByName, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecordRow {
    pub id: i64,
    pub entity_type: String,
    pub title: String,
    pub status: String,
    /// Metadata as a JSON object.
    pub meta: String,
}

/// Database row for a cached bucket payload.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = cache_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CacheEntryRow {
    pub key: String,
    pub payload: String,
    /// Expiry as unix seconds.
    pub expires_at: i64,
}

/// One group of a grouped count query.
///
/// Columns outside the queried granularity are `NULL`.
#[derive(QueryableByName, Debug, Clone, Copy)]
pub struct GroupedCountRow {
    #[diesel(sql_type = Nullable<Integer>)]
    pub year: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub month: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub day: Option<i32>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub hour: Option<i32>,
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

/// Result of a plain `COUNT(*)` query.
#[derive(QueryableByName, Debug, Clone, Copy)]
pub struct CountRow {
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

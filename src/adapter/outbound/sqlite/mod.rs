//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed record store and bucket cache using
//! Diesel ORM.

pub mod cache;
pub mod database;
pub mod store;

pub use cache::SqliteBucketCache;
pub use store::SqliteRecordStore;

//! Storage-agnostic analytics types.
//!
//! Everything here is a plain value created per report request:
//! - [`range`] - Symbolic report ranges and their comparison counterparts
//! - [`window`] - Inclusive calendar windows and month arithmetic
//! - [`granularity`] - Hour/day/month bucketing
//! - [`bucket`] - Sparse grouped-count rows
//! - [`series`] - Dense chart points
//! - [`growth`] - Growth percentages with infinity sentinels
//! - [`record`] - Stored records and their metadata
//! - [`entity`] - Per-customer/staff/service aggregates

pub mod bucket;
pub mod entity;
pub mod granularity;
pub mod growth;
pub mod range;
pub mod record;
pub mod series;
pub mod window;

pub use bucket::{BucketKey, BucketRow};
pub use entity::{Dimension, EntityAggregate, LabelSource};
pub use granularity::Granularity;
pub use growth::{GrowthMetric, GrowthPercent};
pub use range::RangeName;
pub use record::Record;
pub use series::SeriesPoint;
pub use window::DateWindow;

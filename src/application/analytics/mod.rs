//! Appointment analytics use cases.
//!
//! A report runs as one synchronous pipeline per request:
//!
//! - [`resolver::RangeResolver`]: range name and explicit dates to a window
//! - [`selector::select_granularity`]: bucketing unit for the window
//! - [`fetcher::AggregateFetcher`]: grouped counts, cached for short ranges
//! - [`series::SeriesBuilder`]: gap-free series from sparse rows
//! - [`entity::EntityAggregator`]: counts per customer, staff, or service
//!
//! [`service::AnalyticsService`] wires these together behind the outbound
//! ports.

pub mod config;
pub mod entity;
pub mod fetcher;
pub mod report;
pub mod resolver;
pub mod selector;
pub mod series;
pub mod service;

pub use config::AnalyticsConfig;
pub use report::{ComparisonReport, CustomerReport, EntityReport, OverviewReport, ReportRequest};
pub use service::AnalyticsService;

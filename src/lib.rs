//! Talika analytics - appointment reporting over a record store.
//!
//! Turns a symbolic report range into a calendar window, picks a bucket
//! granularity, fetches grouped counts through a cache, and expands them
//! into dense chart series with growth against the previous period.
//!
//! # Architecture
//!
//! - **`domain`** - Plain values: ranges, windows, buckets, series, growth
//! - **`port`** - Outbound traits for the record store, cache, and clock
//! - **`application::analytics`** - Range resolution, granularity
//!   selection, fetching, series building, entity aggregation, and the
//!   [`application::analytics::AnalyticsService`] that composes them
//! - **`adapter`** - SQLite (diesel) and in-memory implementations, plus
//!   the CLI
//! - **`infrastructure`** - TOML configuration and runtime wiring
//!
//! # Features
//!
//! - `testkit` - In-memory store, fixed clock, and record builders for tests
//!
//! # Example
//!
//! ```no_run
//! use talika_analytics::application::analytics::ReportRequest;
//! use talika_analytics::domain::RangeName;
//! use talika_analytics::infrastructure::bootstrap::build_service;
//! use talika_analytics::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = build_service(&Config::from_env())?;
//!     let report = service.compare(&ReportRequest::named(RangeName::ThisMonth))?;
//!     println!("{} appointments, growth {}", report.current_total, report.growth.percent);
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

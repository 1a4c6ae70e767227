//! Report values handed to presentation layers.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{DateWindow, Dimension, EntityAggregate, Granularity, GrowthMetric, RangeName, SeriesPoint};

/// Parameters of one report request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub range: RangeName,
    pub start: Option<String>,
    pub end: Option<String>,
    /// Chart month ranges day by day; defaults per range when unset.
    pub day_by_day: Option<bool>,
}

impl ReportRequest {
    /// A request for a named range with no explicit dates.
    #[must_use]
    pub const fn named(range: RangeName) -> Self {
        Self {
            range,
            start: None,
            end: None,
            day_by_day: None,
        }
    }

    /// A custom range between two explicit dates.
    #[must_use]
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            range: RangeName::Custom,
            start: Some(start.into()),
            end: Some(end.into()),
            day_by_day: None,
        }
    }

    #[must_use]
    pub fn with_day_by_day(mut self, day_by_day: bool) -> Self {
        self.day_by_day = Some(day_by_day);
        self
    }

    /// Whether both explicit dates were supplied.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    #[must_use]
    pub fn day_by_day(&self) -> bool {
        self.day_by_day
            .unwrap_or_else(|| self.range.default_day_by_day())
    }
}

/// A dense appointment series with its comparison against the previous
/// period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    pub range: RangeName,
    pub window: DateWindow,
    pub granularity: Granularity,
    pub series: Vec<SeriesPoint>,
    pub current_total: u64,
    pub previous_total: u64,
    pub growth: GrowthMetric,
}

/// Distinct customers with new/returning split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerReport {
    pub range: RangeName,
    pub window: DateWindow,
    pub total: u64,
    pub new: u64,
    pub returning: u64,
    pub growth: GrowthMetric,
    pub customers: Vec<EntityAggregate>,
}

/// Appointment counts per staff member or service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityReport {
    pub dimension: Dimension,
    pub range: RangeName,
    pub window: DateWindow,
    pub total: u64,
    pub growth: GrowthMetric,
    pub entities: Vec<EntityAggregate>,
}

/// Today's approved and pending appointment counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverviewReport {
    pub date: NaiveDate,
    pub approved: u64,
    pub pending: u64,
}

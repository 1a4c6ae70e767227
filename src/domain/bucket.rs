//! Sparse grouped-count rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::granularity::Granularity;

/// Identity of one grouping unit, shaped by the granularity it was
/// grouped at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "lowercase")]
pub enum BucketKey {
    Hour {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
    },
    Day {
        year: i32,
        month: u32,
        day: u32,
    },
    Month {
        year: i32,
        month: u32,
    },
}

impl BucketKey {
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        match self {
            Self::Hour { .. } => Granularity::Hour,
            Self::Day { .. } => Granularity::Day,
            Self::Month { .. } => Granularity::Month,
        }
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        match *self {
            Self::Hour { year, .. } | Self::Day { year, .. } | Self::Month { year, .. } => year,
        }
    }

    #[must_use]
    pub const fn month(&self) -> u32 {
        match *self {
            Self::Hour { month, .. } | Self::Day { month, .. } | Self::Month { month, .. } => {
                month
            }
        }
    }

    /// Day of month, absent for month buckets.
    #[must_use]
    pub const fn day(&self) -> Option<u32> {
        match *self {
            Self::Hour { day, .. } | Self::Day { day, .. } => Some(day),
            Self::Month { .. } => None,
        }
    }

    /// Hour of day, present only for hour buckets.
    #[must_use]
    pub const fn hour(&self) -> Option<u32> {
        match *self {
            Self::Hour { hour, .. } => Some(hour),
            _ => None,
        }
    }

    /// Calendar date of the bucket, if it resolves to a single day.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year(), self.month(), self.day()?)
    }
}

/// One non-empty bucket returned by a grouped count query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRow {
    pub key: BucketKey,
    pub count: u64,
}

impl BucketRow {
    #[must_use]
    pub const fn hour(year: i32, month: u32, day: u32, hour: u32, count: u64) -> Self {
        Self {
            key: BucketKey::Hour {
                year,
                month,
                day,
                hour,
            },
            count,
        }
    }

    #[must_use]
    pub const fn day(year: i32, month: u32, day: u32, count: u64) -> Self {
        Self {
            key: BucketKey::Day { year, month, day },
            count,
        }
    }

    #[must_use]
    pub const fn month(year: i32, month: u32, count: u64) -> Self {
        Self {
            key: BucketKey::Month { year, month },
            count,
        }
    }
}

/// Sum of counts across rows.
#[must_use]
pub fn total_count(rows: &[BucketRow]) -> u64 {
    rows.iter().map(|row| row.count).sum()
}

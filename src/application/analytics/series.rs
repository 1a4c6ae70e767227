//! Dense series construction.
//!
//! Sparse bucket rows become a gap-free series with one point per calendar
//! unit of the window. Three strategies are used:
//!
//! - hour: the 24 hours of the window's start day
//! - week: the 7 consecutive dates starting at the window start
//! - general: every day or month between the window bounds
//!
//! Zero points fill every unit with no matching row. Output is sorted by
//! timestamp, so building twice from the same input gives the same series.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};

use crate::domain::window::{days_in_month, first_of_next_month};
use crate::domain::{BucketKey, BucketRow, DateWindow, Granularity, RangeName, SeriesPoint};

const WEEK_DAYS: i64 = 7;

/// Per-month counts gathered from sparse rows.
#[derive(Debug, Default, Clone, Copy)]
struct MonthTally {
    day_sum: Option<u64>,
    month_count: u64,
}

impl MonthTally {
    fn total(self) -> u64 {
        self.day_sum.unwrap_or(self.month_count)
    }
}

/// Builds dense series with timestamps in a fixed local offset.
#[derive(Debug, Clone, Copy)]
pub struct SeriesBuilder {
    offset: FixedOffset,
}

impl Default for SeriesBuilder {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

impl SeriesBuilder {
    #[must_use]
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Build the dense series for `window` from its sparse `rows`.
    #[must_use]
    pub fn build(
        &self,
        window: &DateWindow,
        granularity: Granularity,
        rows: &[BucketRow],
    ) -> Vec<SeriesPoint> {
        let mut sorted = rows.to_vec();
        sorted.sort_by_key(|row| row.key);

        let mut points = match granularity {
            Granularity::Hour => self.hourly(window.start_date(), &sorted),
            Granularity::Day if is_week(window.range) => self.weekly(window.start_date(), &sorted),
            Granularity::Day => self.daily(window, &sorted),
            Granularity::Month => self.monthly(window, &sorted),
        };
        points.sort_by_key(|point| point.timestamp_millis);
        points
    }

    fn hourly(&self, day: NaiveDate, rows: &[BucketRow]) -> Vec<SeriesPoint> {
        let mut walk = MergeWalk::new(rows);
        (0..24)
            .map(|hour| {
                let key = BucketKey::Hour {
                    year: day.year(),
                    month: day.month(),
                    day: day.day(),
                    hour,
                };
                let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
                SeriesPoint::new(self.millis(day.and_time(time)), walk.take(key))
            })
            .collect()
    }

    fn weekly(&self, start: NaiveDate, rows: &[BucketRow]) -> Vec<SeriesPoint> {
        let mut walk = MergeWalk::new(rows);
        (0..WEEK_DAYS)
            .filter_map(|offset| start.checked_add_signed(Duration::days(offset)))
            .map(|date| SeriesPoint::new(self.midnight(date), walk.take(day_key(date))))
            .collect()
    }

    fn daily(&self, window: &DateWindow, rows: &[BucketRow]) -> Vec<SeriesPoint> {
        let start = window.start_date();
        let end = window.end_date();

        let mut sparse: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for row in rows {
            if let Some(date) = row.key.date() {
                *sparse.entry(date).or_default() += row.count;
            }
        }

        let mut dense = BTreeMap::new();
        let mut date = start;
        while date <= end {
            dense.insert(date, sparse.get(&date).copied().unwrap_or(0));
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }

        dense
            .into_iter()
            .map(|(date, count)| SeriesPoint::new(self.midnight(date), count))
            .collect()
    }

    fn monthly(&self, window: &DateWindow, rows: &[BucketRow]) -> Vec<SeriesPoint> {
        let start = window.start_date();
        let end = window.end_date();

        let mut sparse: BTreeMap<i32, BTreeMap<u32, MonthTally>> = BTreeMap::new();
        for row in rows {
            let tally = sparse
                .entry(row.key.year())
                .or_default()
                .entry(row.key.month())
                .or_default();
            match row.key {
                BucketKey::Month { .. } => tally.month_count += row.count,
                BucketKey::Day { .. } | BucketKey::Hour { .. } => {
                    *tally.day_sum.get_or_insert(0) += row.count;
                }
            }
        }

        let final_month = (end.year(), end.month());
        let mut points = Vec::new();
        let mut cursor = NaiveDate::from_ymd_opt(start.year(), start.month(), 1).unwrap_or(start);
        while (cursor.year(), cursor.month()) <= final_month {
            let count = sparse
                .get(&cursor.year())
                .and_then(|months| months.get(&cursor.month()))
                .map_or(0, |tally| tally.total());
            let anchor = if (cursor.year(), cursor.month()) == final_month {
                last_day_of_month(cursor)
            } else {
                cursor
            };
            points.push(SeriesPoint::new(self.midnight(anchor), count));
            cursor = first_of_next_month(cursor.year(), cursor.month());
        }
        points
    }

    fn midnight(&self, date: NaiveDate) -> i64 {
        self.millis(date.and_time(NaiveTime::MIN))
    }

    fn millis(&self, local: NaiveDateTime) -> i64 {
        local.and_utc().timestamp_millis() - i64::from(self.offset.local_minus_utc()) * 1000
    }
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let last = days_in_month(date.year(), date.month());
    NaiveDate::from_ymd_opt(date.year(), date.month(), last).unwrap_or(date)
}

fn is_week(range: RangeName) -> bool {
    matches!(range, RangeName::ThisWeek | RangeName::LastWeek)
}

fn day_key(date: NaiveDate) -> BucketKey {
    BucketKey::Day {
        year: date.year(),
        month: date.month(),
        day: date.day(),
    }
}

/// Two-pointer walk over rows sorted by key.
struct MergeWalk<'a> {
    rows: &'a [BucketRow],
    next: usize,
}

impl<'a> MergeWalk<'a> {
    const fn new(rows: &'a [BucketRow]) -> Self {
        Self { rows, next: 0 }
    }

    /// Count for `key`, consuming every row up to and including it.
    fn take(&mut self, key: BucketKey) -> u64 {
        while self.rows.get(self.next).is_some_and(|row| row.key < key) {
            self.next += 1;
        }
        let mut count = 0;
        while let Some(row) = self.rows.get(self.next).filter(|row| row.key == key) {
            count += row.count;
            self.next += 1;
        }
        count
    }
}

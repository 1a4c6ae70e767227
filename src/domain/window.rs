//! Calendar windows covered by a report.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::range::RangeName;

/// Number of days in `month` of `year`, leap-year aware.
///
/// Months outside `1..=12` are clamped into range.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let month = month.clamp(1, 12);
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

/// First day of the month following `(year, month)`.
#[must_use]
pub fn first_of_next_month(year: i32, month: u32) -> NaiveDate {
    let month = month.clamp(1, 12);
    let (year, month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

/// The inclusive calendar span a report covers.
///
/// Built fresh per resolution and never mutated. The raw day fields may
/// exceed the month length; [`DateWindow::start_date`] and
/// [`DateWindow::end_date`] return the calendar-valid bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub range: RangeName,
    pub year_start: i32,
    pub year_end: i32,
    pub month_start: u32,
    pub month_end: u32,
    pub day_start: u32,
    pub day_end: u32,
}

impl DateWindow {
    /// Build a window from two calendar dates, ordering them if needed.
    #[must_use]
    pub fn from_dates(range: RangeName, start: NaiveDate, end: NaiveDate) -> Self {
        let (start, end) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        Self {
            range,
            year_start: start.year(),
            year_end: end.year(),
            month_start: start.month(),
            month_end: end.month(),
            day_start: start.day(),
            day_end: end.day(),
        }
    }

    /// Build a single-day window.
    #[must_use]
    pub fn single_day(range: RangeName, date: NaiveDate) -> Self {
        Self::from_dates(range, date, date)
    }

    /// The whole calendar year `year`.
    #[must_use]
    pub fn whole_year(range: RangeName, year: i32) -> Self {
        Self {
            range,
            year_start: year,
            year_end: year,
            month_start: 1,
            month_end: 12,
            day_start: 1,
            day_end: 31,
        }
    }

    /// First valid day of the window.
    ///
    /// A start day past the end of its month rolls to the first day of the
    /// following month.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        let month = self.month_start.clamp(1, 12);
        if self.day_start > days_in_month(self.year_start, month) {
            return first_of_next_month(self.year_start, month);
        }
        NaiveDate::from_ymd_opt(self.year_start, month, self.day_start.max(1))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Last valid day of the window.
    ///
    /// An end day past the end of its month clamps to the month's last day.
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        let month = self.month_end.clamp(1, 12);
        let day = self
            .day_end
            .clamp(1, days_in_month(self.year_end, month));
        NaiveDate::from_ymd_opt(self.year_end, month, day).unwrap_or(NaiveDate::MAX)
    }

    /// Number of calendar days covered, inclusive.
    #[must_use]
    pub fn span_days(&self) -> i64 {
        (self.end_date() - self.start_date()).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn from_dates_orders_bounds() {
        let window = DateWindow::from_dates(RangeName::Custom, date(2024, 3, 10), date(2024, 1, 5));
        assert_eq!(window.start_date(), date(2024, 1, 5));
        assert_eq!(window.end_date(), date(2024, 3, 10));
    }

    #[test]
    fn start_day_past_month_end_rolls_forward() {
        let window = DateWindow {
            range: RangeName::Custom,
            year_start: 2023,
            year_end: 2023,
            month_start: 2,
            month_end: 3,
            day_start: 30,
            day_end: 15,
        };
        assert_eq!(window.start_date(), date(2023, 3, 1));
    }

    #[test]
    fn start_day_past_december_rolls_into_next_year() {
        let window = DateWindow {
            range: RangeName::Custom,
            year_start: 2023,
            year_end: 2024,
            month_start: 12,
            month_end: 1,
            day_start: 32,
            day_end: 10,
        };
        assert_eq!(window.start_date(), date(2024, 1, 1));
    }

    #[test]
    fn end_day_past_month_end_clamps() {
        let window = DateWindow::whole_year(RangeName::ThisYear, 2024);
        assert_eq!(window.end_date(), date(2024, 12, 31));

        let window = DateWindow {
            day_end: 31,
            month_end: 4,
            ..window
        };
        assert_eq!(window.end_date(), date(2024, 4, 30));
    }

    #[test]
    fn span_days_is_inclusive() {
        let window = DateWindow::single_day(RangeName::Today, date(2024, 5, 5));
        assert_eq!(window.span_days(), 1);
        assert_eq!(DateWindow::whole_year(RangeName::ThisYear, 2024).span_days(), 366);
    }
}

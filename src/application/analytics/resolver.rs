//! Range resolution: symbolic range names to concrete calendar windows.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use crate::domain::window::days_in_month;
use crate::domain::{DateWindow, RangeName};
use crate::error::{Error, Result};
use crate::port::outbound::clock::Clock;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse an explicit report date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, and date-times whose date part is
/// used.
///
/// # Errors
/// Returns [`Error::InvalidDate`] if the value matches no format.
pub fn parse_report_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                .map(|datetime| datetime.date())
        })
        .ok_or_else(|| Error::InvalidDate {
            value: value.to_string(),
        })
}

/// First and last day of the week containing `date`.
#[must_use]
pub fn week_bounds(date: NaiveDate, week_start: Weekday) -> (NaiveDate, NaiveDate) {
    let offset = (7 + date.weekday().num_days_from_sunday() - week_start.num_days_from_sunday()) % 7;
    let start = date - Duration::days(i64::from(offset));
    (start, start + Duration::days(6))
}

/// Maps range names plus optional explicit dates to [`DateWindow`]s,
/// anchored on the injected clock.
#[derive(Clone)]
pub struct RangeResolver {
    clock: Arc<dyn Clock>,
    week_start: Weekday,
}

impl RangeResolver {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, week_start: Weekday) -> Self {
        Self { clock, week_start }
    }

    /// Today's date in server local time.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date()
    }

    /// Resolve a range with optional explicit date strings.
    ///
    /// Both strings are validated before anything else happens.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDate`] if either explicit date is malformed.
    pub fn resolve(
        &self,
        range: RangeName,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<DateWindow> {
        let start = start.map(parse_report_date).transpose()?;
        let end = end.map(parse_report_date).transpose()?;
        Ok(self.resolve_dates(range, start, end))
    }

    /// Resolve a range with optional explicit dates.
    ///
    /// Explicit dates seed the window only when both are present; otherwise
    /// the seed is the whole current year. Named ranges then override the
    /// seed; `custom` keeps it.
    #[must_use]
    pub fn resolve_dates(
        &self,
        range: RangeName,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> DateWindow {
        let today = self.today();
        let seed = match (start, end) {
            (Some(start), Some(end)) => DateWindow::from_dates(range, start, end),
            _ => DateWindow::whole_year(range, today.year()),
        };

        match range {
            RangeName::Custom => seed,
            RangeName::Today => DateWindow::single_day(range, today),
            RangeName::Yesterday => {
                let yesterday = today.pred_opt().unwrap_or(today);
                DateWindow::single_day(range, yesterday)
            }
            RangeName::ThisWeek => {
                let (first, last) = week_bounds(today, self.week_start);
                DateWindow::from_dates(range, first, last)
            }
            RangeName::LastWeek => {
                let (first, last) = week_bounds(today - Duration::days(7), self.week_start);
                DateWindow::from_dates(range, first, last)
            }
            RangeName::ThisMonth => month_window(range, today.year(), today.month()),
            RangeName::LastMonth => {
                if today.month() == 1 {
                    month_window(range, today.year() - 1, 12)
                } else {
                    month_window(range, today.year(), today.month() - 1)
                }
            }
            RangeName::ThisYear => DateWindow::whole_year(range, today.year()),
            RangeName::LastYear => DateWindow::whole_year(range, today.year() - 1),
        }
    }
}

fn month_window(range: RangeName, year: i32, month: u32) -> DateWindow {
    DateWindow {
        range,
        year_start: year,
        year_end: year,
        month_start: month,
        month_end: month,
        day_start: 1,
        day_end: days_in_month(year, month),
    }
}

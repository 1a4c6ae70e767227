//! Granularity selection.
//!
//! The grouping query and the dense series must use the same selection, so
//! the service computes it once per window and passes it to both.

use crate::domain::{DateWindow, Granularity, RangeName};

/// Choose the bucketing unit for a resolved window.
#[must_use]
pub fn select_granularity(range: RangeName, window: &DateWindow, day_by_day: bool) -> Granularity {
    match range {
        RangeName::Today | RangeName::Yesterday => Granularity::Hour,
        RangeName::ThisWeek | RangeName::LastWeek => Granularity::Day,
        RangeName::ThisYear | RangeName::LastYear => Granularity::Month,
        RangeName::ThisMonth | RangeName::LastMonth => {
            if day_by_day {
                Granularity::Day
            } else {
                Granularity::Month
            }
        }
        RangeName::Custom => custom_granularity(window),
    }
}

fn custom_granularity(window: &DateWindow) -> Granularity {
    let month_start = i64::from(window.month_start);
    let month_end = i64::from(window.month_end);

    // December to January wrap stays daily.
    if month_start == 12 && month_end == 1 {
        return Granularity::Day;
    }
    let wide_span = month_end - month_start >= 3;
    let crosses_year = window.year_end > window.year_start && month_start - month_end != 10;
    if wide_span || crosses_year {
        Granularity::Month
    } else {
        Granularity::Day
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn custom(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateWindow {
        DateWindow::from_dates(
            RangeName::Custom,
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
    }

    #[test]
    fn named_ranges_have_fixed_units() {
        let window = custom((2024, 1, 1), (2024, 1, 1));
        assert_eq!(select_granularity(RangeName::Today, &window, true), Granularity::Hour);
        assert_eq!(select_granularity(RangeName::Yesterday, &window, false), Granularity::Hour);
        assert_eq!(select_granularity(RangeName::ThisWeek, &window, false), Granularity::Day);
        assert_eq!(select_granularity(RangeName::LastWeek, &window, true), Granularity::Day);
        assert_eq!(select_granularity(RangeName::ThisYear, &window, true), Granularity::Month);
        assert_eq!(select_granularity(RangeName::LastYear, &window, false), Granularity::Month);
    }

    #[test]
    fn month_ranges_follow_day_by_day_hint() {
        let window = custom((2024, 3, 1), (2024, 3, 31));
        assert_eq!(select_granularity(RangeName::ThisMonth, &window, true), Granularity::Day);
        assert_eq!(select_granularity(RangeName::LastMonth, &window, false), Granularity::Month);
    }

    #[test]
    fn short_custom_span_is_daily() {
        let window = custom((2024, 1, 20), (2024, 2, 25));
        assert_eq!(select_granularity(RangeName::Custom, &window, false), Granularity::Day);
    }

    #[test]
    fn wide_custom_span_is_monthly() {
        let window = custom((2024, 1, 1), (2024, 6, 30));
        assert_eq!(select_granularity(RangeName::Custom, &window, true), Granularity::Month);
    }

    #[test]
    fn december_to_january_wrap_is_daily() {
        let window = custom((2023, 12, 15), (2024, 1, 10));
        assert_eq!(select_granularity(RangeName::Custom, &window, false), Granularity::Day);
    }

    #[test]
    fn year_crossing_spans() {
        // November to January is a near-wrap and stays daily.
        let window = custom((2023, 11, 20), (2024, 1, 5));
        assert_eq!(select_granularity(RangeName::Custom, &window, false), Granularity::Day);

        let window = custom((2023, 10, 1), (2024, 2, 1));
        assert_eq!(select_granularity(RangeName::Custom, &window, false), Granularity::Month);
    }
}

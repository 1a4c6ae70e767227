//! Fixed clocks for deterministic range resolution.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::port::outbound::clock::Clock;

/// A clock that always reports the same local time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub const fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Noon on `date`.
    pub fn on_date(date: NaiveDate) -> Self {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
        Self::new(date.and_time(noon))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

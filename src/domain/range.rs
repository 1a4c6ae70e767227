//! Named report ranges.

use std::fmt;

use serde::Serialize;
use tracing::debug;

/// A symbolic report range.
///
/// Every named range except [`RangeName::Custom`] is anchored on "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeName {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    ThisYear,
    LastYear,
    Custom,
}

impl RangeName {
    /// Parse a range name, accepting both canonical names and the short
    /// request aliases (`day`, `week`, `month`, `year`).
    ///
    /// Unrecognized names resolve to [`RangeName::ThisYear`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "today" | "day" => Self::Today,
            "yesterday" => Self::Yesterday,
            "this_week" | "week" => Self::ThisWeek,
            "last_week" => Self::LastWeek,
            "this_month" | "month" => Self::ThisMonth,
            "last_month" => Self::LastMonth,
            "this_year" | "year" => Self::ThisYear,
            "last_year" => Self::LastYear,
            "custom" => Self::Custom,
            other => {
                debug!(range = other, "Unknown range, falling back to this_year");
                Self::ThisYear
            }
        }
    }

    /// The comparison counterpart of this range, if it has one.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Today => Some(Self::Yesterday),
            Self::ThisWeek => Some(Self::LastWeek),
            Self::ThisMonth => Some(Self::LastMonth),
            Self::ThisYear => Some(Self::LastYear),
            _ => None,
        }
    }

    /// Whether grouped rows for this range may be memoized.
    #[must_use]
    pub const fn is_cacheable(self) -> bool {
        matches!(
            self,
            Self::Today | Self::ThisWeek | Self::LastWeek | Self::ThisMonth | Self::LastMonth
        )
    }

    /// Whether reports for this range are charted day by day by default.
    #[must_use]
    pub const fn default_day_by_day(self) -> bool {
        !matches!(self, Self::ThisYear | Self::LastYear)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::ThisWeek => "this_week",
            Self::LastWeek => "last_week",
            Self::ThisMonth => "this_month",
            Self::LastMonth => "last_month",
            Self::ThisYear => "this_year",
            Self::LastYear => "last_year",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for RangeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

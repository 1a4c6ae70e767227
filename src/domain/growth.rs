//! Growth percentage between two periods.
//!
//! Zero baselines produce infinity sentinels instead of numbers so that
//! presentation layers can render `+∞` / `-∞` without a `%` suffix.
//!
//! # Examples
//!
//! ```
//! use talika_analytics::domain::growth::{growth_percent, GrowthPercent};
//! use rust_decimal::Decimal;
//!
//! assert_eq!(growth_percent(10, 5), GrowthPercent::Value(Decimal::from(100)));
//! assert_eq!(growth_percent(5, 0), GrowthPercent::PositiveInfinity);
//! assert_eq!(growth_percent(5, 0).to_string(), "+∞");
//! assert_eq!(growth_percent(5, 0).suffix(), "");
//! ```

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// A growth percentage or one of the two infinity sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthPercent {
    /// Percentage rounded to one decimal place.
    Value(Decimal),
    /// Growth from a zero baseline.
    PositiveInfinity,
    /// Drop to zero from a non-zero baseline.
    NegativeInfinity,
}

impl GrowthPercent {
    pub const ZERO: Self = Self::Value(Decimal::ZERO);

    #[must_use]
    pub const fn is_infinite(&self) -> bool {
        matches!(self, Self::PositiveInfinity | Self::NegativeInfinity)
    }

    /// Unit suffix to render after the value: empty for sentinels.
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        if self.is_infinite() {
            ""
        } else {
            "%"
        }
    }
}

impl fmt::Display for GrowthPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{}", value.normalize()),
            Self::PositiveInfinity => f.write_str("+∞"),
            Self::NegativeInfinity => f.write_str("-∞"),
        }
    }
}

impl Serialize for GrowthPercent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => serializer.serialize_f64(value.to_f64().unwrap_or(0.0)),
            sentinel => serializer.serialize_str(&sentinel.to_string()),
        }
    }
}

/// Compute the growth of `current` over `previous`.
///
/// - both zero → `0`
/// - `current` zero → `-∞`
/// - `previous` zero → `+∞`
/// - equal → `0`
/// - otherwise `(current - previous) / previous * 100`, rounded half away
///   from zero to one decimal place
#[must_use]
pub fn growth_percent(current: u64, previous: u64) -> GrowthPercent {
    match (current, previous) {
        (0, 0) => GrowthPercent::ZERO,
        (0, _) => GrowthPercent::NegativeInfinity,
        (_, 0) => GrowthPercent::PositiveInfinity,
        (c, p) if c == p => GrowthPercent::ZERO,
        (c, p) => {
            let current = Decimal::from(c);
            let previous = Decimal::from(p);
            let percent = (current - previous) / previous * Decimal::ONE_HUNDRED;
            GrowthPercent::Value(
                percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            )
        }
    }
}

/// Current and previous totals with their growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrowthMetric {
    pub current: u64,
    pub previous: u64,
    pub percent: GrowthPercent,
}

impl GrowthMetric {
    #[must_use]
    pub fn between(current: u64, previous: u64) -> Self {
        Self {
            current,
            previous,
            percent: growth_percent(current, previous),
        }
    }

    /// A metric with no comparison period.
    #[must_use]
    pub const fn uncompared(current: u64) -> Self {
        Self {
            current,
            previous: 0,
            percent: GrowthPercent::ZERO,
        }
    }
}

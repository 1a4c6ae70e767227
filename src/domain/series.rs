//! Dense chart series.

use serde::Serialize;

/// One point of a dense series.
///
/// Serializes as a `[timestamp, count]` pair for direct charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesPoint {
    /// Bucket start as epoch milliseconds.
    pub timestamp_millis: i64,
    pub count: u64,
}

impl SeriesPoint {
    #[must_use]
    pub const fn new(timestamp_millis: i64, count: u64) -> Self {
        Self {
            timestamp_millis,
            count,
        }
    }
}

impl Serialize for SeriesPoint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.timestamp_millis, self.count).serialize(serializer)
    }
}

/// Sum of counts across a series.
#[must_use]
pub fn series_total(points: &[SeriesPoint]) -> u64 {
    points.iter().map(|point| point.count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_pair() {
        let json = serde_json::to_string(&SeriesPoint::new(1_700_000_000_000, 4)).unwrap();
        assert_eq!(json, "[1700000000000,4]");
    }

    #[test]
    fn total_sums_counts() {
        let points = [SeriesPoint::new(0, 2), SeriesPoint::new(1, 0), SeriesPoint::new(2, 5)];
        assert_eq!(series_total(&points), 7);
    }
}

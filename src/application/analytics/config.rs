//! Analytics engine configuration.

use chrono::{FixedOffset, Weekday};
use serde::Deserialize;

use crate::domain::LabelSource;

/// Configuration for the analytics engine.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Entity type of appointment records.
    #[serde(default = "default_entity_type")]
    pub entity_type: String,
    /// Metadata key holding each appointment's date.
    #[serde(default = "default_date_field")]
    pub date_field: String,
    /// Entity type of staff records in the directory.
    #[serde(default = "default_staff_type")]
    pub staff_type: String,
    /// Entity type of service records in the directory.
    #[serde(default = "default_service_type")]
    pub service_type: String,
    /// First day of the reporting week.
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
    /// Server local time as minutes east of UTC.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    /// Which associated list item names staff/service labels.
    #[serde(default)]
    pub label_source: LabelSource,
    /// Status counted as approved in the overview.
    #[serde(default = "default_approved_status")]
    pub approved_status: String,
    /// Status counted as pending in the overview.
    #[serde(default = "default_pending_status")]
    pub pending_status: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            entity_type: default_entity_type(),
            date_field: default_date_field(),
            staff_type: default_staff_type(),
            service_type: default_service_type(),
            week_start: default_week_start(),
            utc_offset_minutes: 0,
            label_source: LabelSource::default(),
            approved_status: default_approved_status(),
            pending_status: default_pending_status(),
        }
    }
}

impl AnalyticsConfig {
    /// The configured UTC offset, if it is a valid one.
    #[must_use]
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes.checked_mul(60)?)
    }
}

fn default_entity_type() -> String {
    "appointment".to_string()
}

fn default_date_field() -> String {
    "appointmentDate".to_string()
}

fn default_staff_type() -> String {
    "staff".to_string()
}

fn default_service_type() -> String {
    "service".to_string()
}

const fn default_week_start() -> Weekday {
    Weekday::Mon
}

fn default_approved_status() -> String {
    "approved".to_string()
}

fn default_pending_status() -> String {
    "pending".to_string()
}

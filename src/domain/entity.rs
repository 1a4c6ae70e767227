//! Per-entity appointment aggregates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The entity an appointment is aggregated by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Customer,
    Staff,
    Service,
}

impl Dimension {
    /// Appointment metadata key holding this dimension's association.
    #[must_use]
    pub const fn meta_key(self) -> &'static str {
        match self {
            Self::Customer => "customers",
            Self::Staff => "staff",
            Self::Service => "service",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Customer => "customer",
            Self::Staff => "staff",
            Self::Service => "service",
        })
    }
}

/// Which item of an associated list names the "X and N Others" label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSource {
    First,
    #[default]
    Last,
}

/// Appointment count for one customer, staff member, or service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityAggregate {
    pub id: String,
    pub display_name: String,
    pub count: u64,
    pub associated_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl EntityAggregate {
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            count: 1,
            associated_label: String::new(),
            image: None,
            category: None,
        }
    }
}

/// Render an associated-items label.
///
/// `title` names one item of a list of `total` items: more than one item
/// renders as `"<title> and <N-1> Other(s)"`, one item as the bare title,
/// none as an empty string.
#[must_use]
pub fn associated_label(title: &str, total: usize) -> String {
    match total {
        0 => String::new(),
        1 => title.to_string(),
        n => {
            let others = n - 1;
            let noun = if others == 1 { "Other" } else { "Others" };
            format!("{title} and {others} {noun}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_pluralizes_others() {
        assert_eq!(associated_label("Haircut", 3), "Haircut and 2 Others");
        assert_eq!(associated_label("Haircut", 2), "Haircut and 1 Other");
    }

    #[test]
    fn label_for_single_and_empty_lists() {
        assert_eq!(associated_label("Massage", 1), "Massage");
        assert_eq!(associated_label("Massage", 0), "");
    }

    #[test]
    fn dimension_meta_keys() {
        assert_eq!(Dimension::Customer.meta_key(), "customers");
        assert_eq!(Dimension::Staff.meta_key(), "staff");
        assert_eq!(Dimension::Service.meta_key(), "service");
    }

    #[test]
    fn new_aggregate_starts_at_one() {
        let aggregate = EntityAggregate::new("5", "Asha");
        assert_eq!(aggregate.count, 1);
        assert!(aggregate.associated_label.is_empty());
    }
}

//! JSON documents for report commands.

use serde_json::{json, Value};

use crate::application::analytics::{ComparisonReport, CustomerReport, EntityReport, OverviewReport};
use crate::domain::{DateWindow, EntityAggregate, GrowthMetric};

fn window_to_json(window: &DateWindow) -> Value {
    json!({
        "start": window.start_date().to_string(),
        "end": window.end_date().to_string(),
        "days": window.span_days(),
    })
}

fn growth_to_json(growth: &GrowthMetric) -> Value {
    json!({
        "current": growth.current,
        "previous": growth.previous,
        "percent": growth.percent,
        "display": format!("{}{}", growth.percent, growth.percent.suffix()),
    })
}

fn entities_to_json(entities: &[EntityAggregate]) -> Value {
    serde_json::to_value(entities).unwrap_or(Value::Null)
}

pub fn comparison_to_json(report: &ComparisonReport) -> Value {
    json!({
        "command": "appointments",
        "range": report.range.as_str(),
        "window": window_to_json(&report.window),
        "granularity": report.granularity.as_str(),
        "series": report.series,
        "current_total": report.current_total,
        "previous_total": report.previous_total,
        "growth": growth_to_json(&report.growth),
    })
}

pub fn customers_to_json(report: &CustomerReport) -> Value {
    json!({
        "command": "customers",
        "range": report.range.as_str(),
        "window": window_to_json(&report.window),
        "total": report.total,
        "new": report.new,
        "returning": report.returning,
        "growth": growth_to_json(&report.growth),
        "customers": entities_to_json(&report.customers),
    })
}

pub fn entities_report_to_json(command: &str, report: &EntityReport) -> Value {
    json!({
        "command": command,
        "dimension": report.dimension.to_string(),
        "range": report.range.as_str(),
        "window": window_to_json(&report.window),
        "total": report.total,
        "growth": growth_to_json(&report.growth),
        "entities": entities_to_json(&report.entities),
    })
}

pub fn overview_to_json(report: &OverviewReport) -> Value {
    json!({
        "command": "overview",
        "date": report.date.to_string(),
        "approved": report.approved,
        "pending": report.pending,
    })
}

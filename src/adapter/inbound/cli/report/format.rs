//! Human-readable report rendering.

use chrono::{DateTime, FixedOffset};
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::application::analytics::{ComparisonReport, CustomerReport, EntityReport, OverviewReport};
use crate::domain::{DateWindow, EntityAggregate, Granularity, GrowthMetric, GrowthPercent, SeriesPoint};

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Bucket")]
    bucket: String,
    #[tabled(rename = "Appointments")]
    count: u64,
}

#[derive(Tabled)]
struct EntityRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Appointments")]
    count: u64,
    #[tabled(rename = "Associated")]
    associated: String,
    #[tabled(rename = "Category")]
    category: String,
}

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "Customer")]
    name: String,
    #[tabled(rename = "Appointments")]
    count: u64,
}

fn window_label(window: &DateWindow) -> String {
    format!("{} → {}", window.start_date(), window.end_date())
}

fn growth_label(growth: &GrowthMetric) -> String {
    let text = format!("{}{}", growth.percent, growth.percent.suffix());
    match growth.percent {
        GrowthPercent::PositiveInfinity => output::positive(text),
        GrowthPercent::NegativeInfinity => output::negative(text),
        GrowthPercent::Value(value) if value.is_sign_negative() && !value.is_zero() => {
            output::negative(text)
        }
        GrowthPercent::Value(value) if !value.is_zero() => output::positive(text),
        GrowthPercent::Value(_) => output::muted(text),
    }
}

/// Render a series timestamp in server-local time at its bucket precision.
fn bucket_label(point: &SeriesPoint, granularity: Granularity, offset: FixedOffset) -> String {
    let Some(at) = DateTime::from_timestamp_millis(point.timestamp_millis) else {
        return point.timestamp_millis.to_string();
    };
    let local = at.with_timezone(&offset);
    let pattern = match granularity {
        Granularity::Hour => "%Y-%m-%d %H:00",
        Granularity::Day => "%Y-%m-%d",
        Granularity::Month => "%Y-%m",
    };
    local.format(pattern).to_string()
}

pub fn print_comparison(report: &ComparisonReport, offset: FixedOffset) {
    output::section(&format!("Appointments ({})", report.range));
    output::field("Window", window_label(&report.window));
    output::field("Granularity", report.granularity);
    output::field("Total", output::highlight(report.current_total));
    output::field("Previous", report.previous_total);
    output::field("Growth", growth_label(&report.growth));

    if report.series.is_empty() {
        return;
    }
    let rows: Vec<SeriesRow> = report
        .series
        .iter()
        .map(|point| SeriesRow {
            bucket: bucket_label(point, report.granularity, offset),
            count: point.count,
        })
        .collect();

    output::section("Series");
    output::lines(&Table::new(rows).to_string());
}

pub fn print_customers(report: &CustomerReport) {
    output::section(&format!("Customers ({})", report.range));
    output::field("Window", window_label(&report.window));
    output::field("Total", output::highlight(report.total));
    output::field("New", report.new);
    output::field("Returning", report.returning);
    output::field("Growth", growth_label(&report.growth));

    if report.customers.is_empty() {
        output::note("No customers booked in this window.");
        return;
    }
    let rows: Vec<CustomerRow> = report
        .customers
        .iter()
        .map(|customer| CustomerRow {
            name: customer.display_name.clone(),
            count: customer.count,
        })
        .collect();

    output::section("Bookings");
    output::lines(&Table::new(rows).to_string());
}

fn entity_row(entity: &EntityAggregate) -> EntityRow {
    EntityRow {
        name: entity.display_name.clone(),
        count: entity.count,
        associated: entity.associated_label.clone(),
        category: entity.category.clone().unwrap_or_default(),
    }
}

pub fn print_entities(title: &str, report: &EntityReport) {
    output::section(&format!("{title} ({})", report.range));
    output::field("Window", window_label(&report.window));
    output::field("Total", output::highlight(report.total));
    output::field("Growth", growth_label(&report.growth));

    if report.entities.is_empty() {
        output::note("No appointments in this window.");
        return;
    }
    let rows: Vec<EntityRow> = report.entities.iter().map(entity_row).collect();

    output::section("Breakdown");
    output::lines(&Table::new(rows).to_string());
}

pub fn print_overview(report: &OverviewReport) {
    output::section(&format!("Today ({})", report.date));
    output::field("Approved", output::positive(report.approved));
    output::field("Pending", report.pending);
}

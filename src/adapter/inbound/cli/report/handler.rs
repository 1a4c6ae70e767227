//! Handlers for the report commands.
//!
//! Each handler builds one report from the service and renders it either
//! as a single JSON document or as sections and tables.

use chrono::{FixedOffset, Offset, Utc};

use crate::adapter::inbound::cli::command::ReportArgs;
use crate::adapter::inbound::cli::output;
use crate::application::analytics::AnalyticsService;
use crate::domain::Dimension;
use crate::error::Result;

use super::format::{print_comparison, print_customers, print_entities, print_overview};
use super::json::{comparison_to_json, customers_to_json, entities_report_to_json, overview_to_json};

fn server_offset(service: &AnalyticsService) -> FixedOffset {
    service.config().utc_offset().unwrap_or_else(|| Utc.fix())
}

/// Execute `appointments`.
pub fn execute_appointments(service: &AnalyticsService, args: &ReportArgs) -> Result<()> {
    let report = service.compare(&args.to_request())?;

    if output::is_json() {
        output::json_output(comparison_to_json(&report));
        return Ok(());
    }
    if output::is_silenced() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    print_comparison(&report, server_offset(service));
    Ok(())
}

/// Execute `customers`.
pub fn execute_customers(service: &AnalyticsService, args: &ReportArgs) -> Result<()> {
    let report = service.customer_report(&args.to_request())?;

    if output::is_json() {
        output::json_output(customers_to_json(&report));
        return Ok(());
    }
    if output::is_silenced() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    print_customers(&report);
    Ok(())
}

/// Execute `staff` or `services`.
pub fn execute_entities(
    service: &AnalyticsService,
    dimension: Dimension,
    args: &ReportArgs,
) -> Result<()> {
    let report = service.entity_report(dimension, &args.to_request())?;
    let (command, title) = match dimension {
        Dimension::Service => ("services", "Services"),
        _ => ("staff", "Staff"),
    };

    if output::is_json() {
        output::json_output(entities_report_to_json(command, &report));
        return Ok(());
    }
    if output::is_silenced() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    print_entities(title, &report);
    Ok(())
}

/// Execute `overview`.
pub fn execute_overview(service: &AnalyticsService) -> Result<()> {
    let report = service.overview()?;

    if output::is_json() {
        output::json_output(overview_to_json(&report));
        return Ok(());
    }
    if output::is_silenced() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    print_overview(&report);
    Ok(())
}

//! Command-line interface definitions.
//!
//! Defines the `talika-analytics` CLI using `clap`: one subcommand per
//! report plus `import` for loading records into the report database.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::analytics::ReportRequest;
use crate::domain::RangeName;

/// Appointment analytics reports over a local record database
#[derive(Parser, Debug)]
#[command(name = "talika-analytics")]
#[command(version, about)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite database (overrides config and TALIKA_DATABASE)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Appointment series compared against the previous period
    Appointments(ReportArgs),

    /// Distinct customers with the new/returning split
    Customers(ReportArgs),

    /// Appointment counts per staff member
    Staff(ReportArgs),

    /// Appointment counts per service
    Services(ReportArgs),

    /// Today's approved and pending appointments
    Overview,

    /// Load appointments, staff, and services from a JSON document
    Import(ImportArgs),
}

/// Range selection shared by every report command.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Report range: today, yesterday, this_week, last_week, this_month,
    /// last_month, this_year, last_year, or custom
    #[arg(long, default_value = "this_year")]
    pub range: String,

    /// Explicit start date (YYYY-MM-DD)
    #[arg(long, requires = "end")]
    pub start: Option<String>,

    /// Explicit end date (YYYY-MM-DD)
    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Chart month ranges day by day (true/false); defaults per range
    #[arg(long)]
    pub day_by_day: Option<bool>,
}

impl ReportArgs {
    /// Convert parsed flags into a report request.
    #[must_use]
    pub fn to_request(&self) -> ReportRequest {
        ReportRequest {
            range: RangeName::parse(&self.range),
            start: self.start.clone(),
            end: self.end.clone(),
            day_by_day: self.day_by_day,
        }
    }
}

/// Arguments for `talika-analytics import`.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON document with `appointments`, `staff`, and `services` arrays
    pub file: PathBuf,
}

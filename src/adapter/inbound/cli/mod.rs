//! CLI module graph.

pub mod command;
pub mod import;
pub mod output;
pub mod paths;
pub mod report;

use crate::domain::Dimension;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_service;
use crate::infrastructure::config::settings::Config;

use command::Commands;

/// Run one parsed command against `config`.
///
/// # Errors
/// Returns any configuration, storage, or date error the command hits.
pub fn dispatch(command: &Commands, config: &Config) -> Result<()> {
    if let Commands::Import(args) = command {
        return import::execute(config, &args.file);
    }

    let service = build_service(config)?;
    match command {
        Commands::Appointments(args) => report::execute_appointments(&service, args),
        Commands::Customers(args) => report::execute_customers(&service, args),
        Commands::Staff(args) => report::execute_entities(&service, Dimension::Staff, args),
        Commands::Services(args) => report::execute_entities(&service, Dimension::Service, args),
        Commands::Overview => report::execute_overview(&service),
        Commands::Import(args) => import::execute(config, &args.file),
    }
}

use clap::Parser;
use tracing::{debug, info};

use talika_analytics::adapter::inbound::cli::command::Cli;
use talika_analytics::adapter::inbound::cli::output::{self, OutputConfig};
use talika_analytics::adapter::inbound::cli::{dispatch, paths};
use talika_analytics::error::Result;
use talika_analytics::infrastructure::config::settings::Config;

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => {
            let default = paths::default_config();
            if default.exists() {
                Config::load(default)?
            } else {
                Config::from_env()
            }
        }
    };
    if let Some(database) = &cli.database {
        config.database.path = database.display().to_string();
    }
    Ok(config)
}

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let output_config = OutputConfig::new(cli.json, cli.quiet, cli.verbose);
    output::configure(output_config);

    let mut config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            output::error(&format!("Failed to load config: {e}"));
            std::process::exit(1);
        }
    };
    if let Some(level) = output_config.log_level() {
        config.logging = config.logging.with_level(level);
    }

    config.init_logging();
    info!(database = %config.database.path, "talika-analytics starting");
    debug!(command = ?cli.command, "Dispatching");

    if let Err(e) = dispatch(&cli.command, &config) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

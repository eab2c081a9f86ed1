//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("serverless-openapi")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Derive API Gateway HTTP events for serverless functions from an OpenAPI v3 document")
            .subcommand_negates_reqs(true)
            .subcommand(commands::apply::command())
            .subcommand(commands::events::command())
            .subcommand(commands::validate::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("apply", sub_matches)) => commands::apply::run(sub_matches).await,
            Some(("events", sub_matches)) => commands::events::run(sub_matches).await,
            Some(("validate", sub_matches)) => commands::validate::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::{anyhow, Result};
    use std::path::PathBuf;

    /// Service file names looked up in the working directory
    pub const DEFAULT_SERVICE_FILES: [&str; 3] =
        ["serverless.yml", "serverless.yaml", "serverless.json"];

    /// The `--config` argument shared by service-file commands
    pub fn config_arg() -> clap::Arg {
        clap::Arg::new("config")
            .short('c')
            .long("config")
            .help("Service file path")
            .value_name("FILE")
    }

    /// Get service file path from arguments or use default
    pub fn get_config_path(matches: &clap::ArgMatches) -> Result<PathBuf> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            return Ok(PathBuf::from(config_path));
        }

        DEFAULT_SERVICE_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
            .ok_or_else(|| {
                anyhow!(
                    "No service file found. Use --config to specify one (looked for {})",
                    DEFAULT_SERVICE_FILES.join(", ")
                )
            })
    }

    /// Create the application for the selected service file
    pub fn create_app(matches: &clap::ArgMatches) -> Result<crate::ServerlessOpenApi> {
        let config_path = get_config_path(matches)?;
        crate::ServerlessOpenApi::from_service_file(&config_path)
    }
}

//! Events command implementation

use anyhow::{anyhow, Result};
use clap::{ArgMatches, Command};
use sls_openapi_events::{apply_request_validation, lambda_http_events_from};
use sls_openapi_spec::{api_spec_from, load_document, SpecNormalizer, EXT_PROP_LAMBDA};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("events")
        .about("Print the HTTP events derived from an OpenAPI document")
        .arg(
            clap::Arg::new("spec")
                .short('s')
                .long("spec")
                .help("OpenAPI v3 document")
                .value_name("FILE")
                .required(true),
        )
        .arg(
            clap::Arg::new("validate")
                .long("validate")
                .help("Include request validation metadata")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("extension")
                .long("extension")
                .help("Operation extension naming the bound function")
                .value_name("KEY")
                .default_value(EXT_PROP_LAMBDA),
        )
        .arg(
            clap::Arg::new("format")
                .long("format")
                .help("Output format")
                .value_parser(["yaml", "json"])
                .default_value("yaml"),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    let spec_path = matches
        .get_one::<String>("spec")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("--spec is required"))?;
    let extension = matches
        .get_one::<String>("extension")
        .map(String::as_str)
        .unwrap_or(EXT_PROP_LAMBDA);

    info!("Deriving HTTP events from {:?}", spec_path);

    let document = load_document(&spec_path).await?;
    let api_spec = api_spec_from(&document, &SpecNormalizer::new(extension))?;
    let events = apply_request_validation(
        lambda_http_events_from(&api_spec),
        matches.get_flag("validate"),
    );

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => println!("{}", serde_json::to_string_pretty(&events)?),
        _ => print!("{}", serde_yaml::to_string(&events)?),
    }

    Ok(())
}

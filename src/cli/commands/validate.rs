//! Validate command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};
use sls_openapi_events::lambda_http_events_from;
use sls_openapi_spec::{api_spec_from, load_document, SpecNormalizer};
use tracing::info;

pub fn command() -> Command {
    Command::new("validate")
        .about("Validate the service file and its OpenAPI document")
        .arg(utils::config_arg())
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    info!("Validating service file");

    let config_path = utils::get_config_path(matches)?;
    let service = crate::ServiceConfig::from_file(&config_path)?;

    println!("Service file is valid!");
    if let Some(name) = &service.service {
        println!("Service: {name}");
    }
    println!("Functions: {}", service.functions.len());

    let openapi = service.openapi();
    let Some(spec_path) = openapi.spec_path(&crate::utils::parent_dir(&config_path)) else {
        println!("Warning: No openapi spec specified.");
        return Ok(());
    };

    let document = load_document(&spec_path).await?;
    let api_spec = api_spec_from(&document, &SpecNormalizer::new(openapi.extension_key()))?;
    let events = lambda_http_events_from(&api_spec);

    println!("OpenAPI document: {}", spec_path.display());
    println!("Paths: {}", api_spec.len());
    println!("Bound operations: {}", api_spec.bound_operation_count());
    println!("Request validation: {}", if openapi.validate { "enabled" } else { "disabled" });

    for (function, events) in &events {
        let status = if service.functions.contains_key(function) {
            "ok"
        } else {
            "missing from service file"
        };
        println!("  - {} ({} routes, {})", function, events.len(), status);
    }

    Ok(())
}

//! Apply command implementation

use crate::cli::utils;
use anyhow::Result;
use clap::{ArgMatches, Command};
use std::path::PathBuf;
use tracing::info;

pub fn command() -> Command {
    Command::new("apply")
        .about("Attach OpenAPI-derived HTTP events to the service's functions")
        .arg(utils::config_arg())
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the updated service file here instead of stdout")
                .value_name("FILE"),
        )
        .arg(
            clap::Arg::new("hook")
                .long("hook")
                .help("Lifecycle hook to run")
                .value_name("HOOK")
                .value_parser(crate::Hook::ALL.map(|hook| hook.as_str())),
        )
        .arg(
            clap::Arg::new("dry-run")
                .long("dry-run")
                .help("Report routes without writing the service file")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn run(matches: &ArgMatches) -> Result<()> {
    info!("Applying OpenAPI document to service");

    let mut app = utils::create_app(matches)?;

    let report = match matches.get_one::<String>("hook") {
        Some(hook) => app.run_hook(hook).await?,
        None => app.apply_api_spec().await?,
    };

    let output = matches.get_one::<String>("output").map(PathBuf::from);
    let dry_run = matches.get_flag("dry-run");

    if dry_run || output.is_some() {
        if let Some(spec_path) = &report.spec_path {
            println!("OpenAPI document: {}", spec_path.display());
        }
        for function in &report.updated {
            println!("  {}: {}", function.function, function.routes.join(", "));
        }
        for warning in &report.warnings {
            println!("  Warning: {warning}");
        }
    }

    if dry_run {
        println!("Dry run mode - service file not written");
        return Ok(());
    }

    let service = app.into_service();
    match output {
        Some(path) => {
            crate::utils::ensure_parent_directory(&path)?;
            service.save_to_file(&path)?;
            println!("Service file written to {}", path.display());
        }
        None => print!("{}", service.to_yaml()?),
    }

    Ok(())
}

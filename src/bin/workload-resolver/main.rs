//! workload-resolver CLI - Resolve SDK references against installed workload packs

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use workload_resolver::util::diagnostic::{emit, MissingWorkloadPackError};
use workload_resolver::ResolveError;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        if let Some(err) = e.downcast_ref::<ResolveError>() {
            emit(&err.to_diagnostic(), color);
        } else if let Some(err) = e.downcast_ref::<MissingWorkloadPackError>() {
            emit(&err.to_diagnostic(), color);
        } else {
            eprintln!("error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("workload_resolver=debug")
    } else {
        EnvFilter::new("workload_resolver=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let color = !cli.no_color && std::io::stderr().is_terminal();
    let session = commands::Session::new(&cli.location, cli.config.as_deref(), color)?;

    // Execute command
    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args, &session),
        Commands::Packs(args) => commands::packs::execute(args, &session),
        Commands::Workloads(args) => commands::workloads::execute(args, &session),
        Commands::Locate => commands::locate::execute(&session),
    }
}

//! Tally CLI - business insights from a POS data snapshot
//!
//! Usage:
//!   tally --data snapshot.json dashboard        Every report at once
//!   tally --data snapshot.json daily            Today's sales summary
//!   tally --as-of 2024-06-30 income             Income statement
//!   tally config init                           Write default insights.toml

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout carries the JSON result
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .init();

    let output = match &cli.command {
        Commands::Config { action } => commands::cmd_config(cli.config.clone(), action)?,
        report => {
            let service = commands::load_service(cli.config.clone())?;
            let snapshot = commands::load_snapshot(&cli.data)?;
            let as_of = commands::resolve_as_of(cli.as_of);
            commands::cmd_report(&service, &snapshot, report, as_of)?
        }
    };

    commands::print_json(&output)
}

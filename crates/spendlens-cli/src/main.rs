//! Spendlens CLI - Personal finance dashboard
//!
//! Usage:
//!   spendlens periods                          List available months
//!   spendlens options --year Y --month M       Show filter choices for a month
//!   spendlens dashboard --year Y --month M     Filter, aggregate and print

mod cli;
mod commands;


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

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let session = commands::load_session(
        cli.config.as_deref(),
        cli.transactions.as_deref(),
        cli.categories.as_deref(),
    )?;

    match cli.command {
        Commands::Periods => commands::cmd_periods(&session),
        Commands::Options { year, month } => commands::cmd_options(&session, year, month),
        Commands::Dashboard {
            filters,
            json,
            limit,
        } => commands::cmd_dashboard(&session, &filters, json, limit),
    }
}

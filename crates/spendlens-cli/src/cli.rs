//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

/// Spendlens - Filter and chart your monthly spending
#[derive(Parser)]
#[command(name = "spendlens")]
#[command(about = "Personal finance dashboard over exported transaction tables", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Transactions CSV (overrides the config file)
    #[arg(long, global = true)]
    pub transactions: Option<PathBuf>,

    /// Categories CSV (overrides the config file)
    #[arg(long, global = true)]
    pub categories: Option<PathBuf>,

    /// Config file
    ///
    /// Without this flag, `<data dir>/spendlens/config.toml` is used when it
    /// exists, otherwise the built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the years and months present in the data
    Periods,

    /// Show the sidebar choices available for one month
    Options {
        /// Year
        #[arg(short, long)]
        year: i32,

        /// Month (1-12)
        #[arg(short, long)]
        month: u32,
    },

    /// Filter one month and print metrics, chart totals and rows
    Dashboard {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the whole view as JSON
        #[arg(long)]
        json: bool,

        /// Maximum rows to print in the transaction table
        #[arg(short, long, default_value = "25")]
        limit: usize,
    },
}

/// Sidebar filters and chart selections
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Year
    #[arg(short, long)]
    pub year: i32,

    /// Month (1-12)
    #[arg(short, long)]
    pub month: u32,

    /// Lowest amount to keep (defaults to the month's minimum)
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<Decimal>,

    /// Highest amount to keep (defaults to the month's maximum)
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<Decimal>,

    /// Case-insensitive text to look for in descriptions
    #[arg(short, long)]
    pub search: Option<OsString>,

    /// Keep only these providers (repeatable)
    #[arg(short, long)]
    pub provider: Vec<String>,

    /// Keep only these categories, by id or name (repeatable)
    #[arg(short, long)]
    pub category: Vec<String>,

    /// Drill into one category bar
    #[arg(long)]
    pub select_category: Option<String>,

    /// Drill into one provider bar
    #[arg(long)]
    pub select_provider: Option<String>,
}

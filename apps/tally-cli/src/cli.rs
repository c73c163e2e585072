//! CLI argument definitions using clap.
//!
//! The command implementations live in [`crate::commands`].

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Tally - business insights from back-office records
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Derived business metrics from a POS data snapshot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON snapshot with products, sales, customers, expenses, suppliers,
    /// purchase orders and returns
    #[arg(short, long, default_value = "snapshot.json", global = true)]
    pub data: PathBuf,

    /// Config file (defaults to insights.toml in the platform config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Evaluate reports at the end of this day (YYYY-MM-DD, UTC) instead of now
    #[arg(long, global = true)]
    pub as_of: Option<NaiveDate>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every report
    Dashboard,

    /// Products at or below their low-stock threshold
    LowStock,

    /// Suggested purchase quantities for low-stock products
    Reorder,

    /// Suggested markdowns for overstocked or stale products
    Discounts,

    /// Sales summary over the configured trailing window
    Daily,

    /// Customer tiers and tier distribution
    Customers,

    /// Expense categories and totals
    Expenses,

    /// Supplier scorecard
    Suppliers,

    /// Revenue by category against the previous period
    Categories {
        /// Length of the period in days
        #[arg(long, default_value = "30")]
        days: u32,
    },

    /// Revenue by product against the previous period
    Products {
        /// Length of the period in days
        #[arg(long, default_value = "30")]
        days: u32,
    },

    /// Income statement with VAT split and progressive tax
    Income {
        /// First day included (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,

        /// Last day included (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,

        /// Income outside of sales, in cents (overrides the snapshot)
        #[arg(long)]
        other_income_cents: Option<i64>,
    },

    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration (defaults, file, environment)
    Show,

    /// Print the config file path
    Path,

    /// Write the default configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

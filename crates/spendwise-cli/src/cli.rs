//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Spendwise - Forecasts and advice for your expenses
#[derive(Parser)]
#[command(name = "spendwise")]
#[command(about = "Expense forecasting and spending insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Insights config file (defaults to the data dir override, then built-in defaults)
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
    /// Suggest a category for an expense description
    Suggest {
        /// Free-text description (e.g. "Lunch at Starbucks")
        description: String,
    },

    /// List available categories
    Categories,

    /// Predict next month's spending
    Forecast {
        /// Expense file (.json or .csv)
        #[arg(short, long)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show spending recommendations
    Recommend {
        /// Expense file (.json or .csv)
        #[arg(short, long)]
        file: PathBuf,

        /// Monthly budget limit (0 means no budget)
        #[arg(short, long)]
        limit: Option<f64>,
    },

    /// Show the spending insights summary
    Insights {
        /// Expense file (.json or .csv)
        #[arg(short, long)]
        file: PathBuf,

        /// Monthly budget limit (0 means no budget)
        #[arg(short, long)]
        limit: Option<f64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a spending breakdown
    Breakdown {
        /// Expense file (.json or .csv)
        #[arg(short, long)]
        file: PathBuf,

        /// Breakdown dimension
        #[arg(long, value_enum, default_value = "category")]
        by: BreakdownKind,

        /// Month for the top-categories view (YYYY-MM, defaults to current month)
        #[arg(long)]
        month: Option<String>,
    },

    /// Show budget limit status
    Budget {
        /// Expense file (.json or .csv)
        #[arg(short, long)]
        file: PathBuf,

        /// Monthly budget limit (0 means no budget)
        #[arg(short, long)]
        limit: Option<f64>,
    },

    /// Print the next calendar month (YYYY-MM)
    NextMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BreakdownKind {
    /// Totals per weekday
    Weekday,
    /// Totals per day
    Daily,
    /// Totals and share per category
    Category,
    /// Trailing monthly window ending this month
    Months,
    /// Largest categories within one month
    Top,
}

//! Spendwise CLI - Expense forecasts and spending insights
//!
//! Usage:
//!   spendwise suggest "Lunch at Starbucks"
//!   spendwise forecast --file expenses.json
//!   spendwise recommend --file expenses.csv --limit 1000
//!   spendwise breakdown --file expenses.csv --by weekday

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
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

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Suggest { description } => commands::cmd_suggest(&config, &description),
        Commands::Categories => commands::cmd_categories(),
        Commands::Forecast { file, json } => commands::cmd_forecast(&config, &file, json),
        Commands::Recommend { file, limit } => commands::cmd_recommend(&config, &file, limit),
        Commands::Insights { file, limit, json } => {
            commands::cmd_insights(&config, &file, limit, json)
        }
        Commands::Breakdown { file, by, month } => {
            commands::cmd_breakdown(&config, &file, by, month.as_deref())
        }
        Commands::Budget { file, limit } => commands::cmd_budget(&config, &file, limit),
        Commands::NextMonth => commands::cmd_next_month(),
    }
}

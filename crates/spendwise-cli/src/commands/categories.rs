//! Category command implementations

use anyhow::Result;
use spendwise_core::{get_categories, next_month_string, Categorizer, InsightsConfig};

pub fn cmd_suggest(config: &InsightsConfig, description: &str) -> Result<()> {
    let categorizer = Categorizer::from_config(config);
    println!("{}", categorizer.suggest(description));
    Ok(())
}

pub fn cmd_categories() -> Result<()> {
    for category in get_categories() {
        println!("{}", category);
    }
    Ok(())
}

pub fn cmd_next_month() -> Result<()> {
    println!("{}", next_month_string());
    Ok(())
}

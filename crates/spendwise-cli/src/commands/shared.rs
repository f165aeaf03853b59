//! Shared command utilities

use std::path::Path;

use anyhow::{Context, Result};
use spendwise_core::import::load_file;
use spendwise_core::{Expense, InsightsConfig};
use tracing::debug;

/// Load insights config from an explicit path or the default locations
pub fn load_config(path: Option<&Path>) -> Result<InsightsConfig> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            InsightsConfig::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => InsightsConfig::load().context("Failed to load insights config")?,
    };
    debug!(?config, "Config loaded");
    Ok(config)
}

/// Load and validate expenses from a .json or .csv file
pub fn load_expenses(path: &Path) -> Result<Vec<Expense>> {
    if !path.exists() {
        anyhow::bail!("Expense file not found: {}", path.display());
    }
    load_file(path).with_context(|| format!("Failed to load expenses from {}", path.display()))
}

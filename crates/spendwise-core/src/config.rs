//! Insights configuration
//!
//! Thresholds for the forecaster, recommender and breakdowns, plus extra
//! categorizer keywords.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/spendwise/config/insights.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::categorize::Category;
use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/insights.toml");

/// Forecast confidence thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    pub high_confidence_min_months: usize,
    pub high_confidence_r_squared: f64,
    pub medium_confidence_r_squared: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            high_confidence_min_months: 3,
            high_confidence_r_squared: 0.7,
            medium_confidence_r_squared: 0.3,
        }
    }
}

/// Recommendation rule thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendConfig {
    /// Fraction of the limit that triggers the near-limit warning
    pub near_limit_ratio: f64,
    /// Category share (percent) above which spending is "dominated"
    pub dominance_percent: f64,
    /// Month-over-month change (percent) above which a trend is reported
    pub trend_percent: f64,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            near_limit_ratio: 0.8,
            dominance_percent: 50.0,
            trend_percent: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownConfig {
    pub trailing_months: usize,
    pub top_categories: usize,
}

impl Default for BreakdownConfig {
    fn default() -> Self {
        Self {
            trailing_months: 6,
            top_categories: 3,
        }
    }
}

/// Complete insights configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightsConfig {
    pub forecast: ForecastConfig,
    pub recommend: RecommendConfig,
    pub breakdown: BreakdownConfig,
    /// Extra keywords per category, in category table order
    pub extra_keywords: Vec<(Category, Vec<String>)>,
}

impl InsightsConfig {
    /// Load from the default override location, else embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit path (embedded defaults if it does not exist)
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse config from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("spendwise").join("config").join("insights.toml"))
}

fn load_config(override_path: Option<&Path>) -> Result<InsightsConfig> {
    let path = override_path
        .map(Path::to_path_buf)
        .or_else(default_config_path)
        .filter(|p| p.exists());

    let content = match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading insights config");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?
        }
        None => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    forecast: Option<RawForecast>,
    recommend: Option<RawRecommend>,
    breakdown: Option<RawBreakdown>,
    keywords: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    high_confidence_min_months: Option<usize>,
    high_confidence_r_squared: Option<f64>,
    medium_confidence_r_squared: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRecommend {
    near_limit_ratio: Option<f64>,
    dominance_percent: Option<f64>,
    trend_percent: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawBreakdown {
    trailing_months: Option<usize>,
    top_categories: Option<usize>,
}

fn parse_config(content: &str) -> Result<InsightsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = InsightsConfig::default();

    if let Some(forecast) = raw.forecast {
        if let Some(months) = forecast.high_confidence_min_months {
            config.forecast.high_confidence_min_months = months;
        }
        if let Some(r2) = forecast.high_confidence_r_squared {
            config.forecast.high_confidence_r_squared = finite("high_confidence_r_squared", r2)?;
        }
        if let Some(r2) = forecast.medium_confidence_r_squared {
            config.forecast.medium_confidence_r_squared =
                finite("medium_confidence_r_squared", r2)?;
        }
    }

    if let Some(recommend) = raw.recommend {
        if let Some(ratio) = recommend.near_limit_ratio {
            config.recommend.near_limit_ratio = non_negative("near_limit_ratio", ratio)?;
        }
        if let Some(pct) = recommend.dominance_percent {
            config.recommend.dominance_percent = non_negative("dominance_percent", pct)?;
        }
        if let Some(pct) = recommend.trend_percent {
            config.recommend.trend_percent = non_negative("trend_percent", pct)?;
        }
    }

    if let Some(breakdown) = raw.breakdown {
        if let Some(months) = breakdown.trailing_months {
            if months == 0 {
                return Err(Error::Config("trailing_months must be at least 1".into()));
            }
            config.breakdown.trailing_months = months;
        }
        if let Some(n) = breakdown.top_categories {
            config.breakdown.top_categories = n;
        }
    }

    if let Some(keywords) = raw.keywords {
        let mut extra: Vec<(Category, Vec<String>)> = Vec::new();
        for (name, words) in keywords {
            match name.parse::<Category>() {
                Ok(category) => extra.push((category, words)),
                Err(_) => warn!(category = %name, "Skipping keywords for unknown category"),
            }
        }
        extra.sort_by_key(|(category, _)| {
            Category::all()
                .iter()
                .position(|c| c == category)
                .unwrap_or(usize::MAX)
        });
        config.extra_keywords = extra;
    }

    Ok(config)
}

fn finite(key: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::Config(format!("{} must be a finite number", key)))
    }
}

fn non_negative(key: &str, value: f64) -> Result<f64> {
    let value = finite(key, value)?;
    if value < 0.0 {
        return Err(Error::Config(format!("{} must not be negative", key)));
    }
    Ok(value)
}

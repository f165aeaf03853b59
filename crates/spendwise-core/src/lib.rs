//! Spendwise Core Library
//!
//! Prediction & insights engine for the Spendwise expense tracker:
//! - Category suggestion from expense descriptions
//! - Next-month spending forecast (linear trend over monthly totals)
//! - Rule-based recommendations and spending insights
//! - Chart-ready breakdowns and budget status
//! - JSON/CSV expense import and TOML configuration
//!
//! All analysis is pure and synchronous over an in-memory expense list.

pub mod categorize;
pub mod clock;
pub mod config;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;

#[cfg(test)]
pub(crate) mod test_utils;

pub use categorize::{
    get_categories, suggest_category, suggest_category_value, Categorizer, Category, Description,
};
pub use clock::{next_month_string, next_month_string_with, Clock, FixedClock, SystemClock};
pub use config::InsightsConfig;
pub use error::{Error, Result};
pub use insights::{
    generate_recommendations, get_spending_insights, predict_next_month, Forecaster, Prediction,
    Recommender, SpendingInsights,
};
pub use models::{Expense, MonthKey, MonthlyAggregate};

//! Prediction & Insights Engine
//!
//! Pure, stateless analysis over an in-memory list of expenses. Every
//! function recomputes from its arguments; nothing is cached between calls.
//!
//! ## Components
//!
//! - **Forecaster** - Predicts next month's total with a linear trend
//! - **Recommender** - Rule-based advice and a structured insights summary
//! - **Breakdowns** - Weekday, daily, category and trailing-month views
//! - **Budget** - Limit status for progress displays
//!
//! ## Usage
//!
//! ```rust,ignore
//! use spendwise_core::insights::{generate_recommendations, predict_next_month};
//!
//! let prediction = predict_next_month(&expenses);
//! let advice = generate_recommendations(&expenses, Some(1000.0));
//! ```

pub mod aggregate;
pub mod breakdown;
pub mod budget;
pub mod forecaster;
pub mod recommender;
pub mod types;

pub use aggregate::{category_totals, group_by_month, month_over_month_change, total_spent};
pub use breakdown::{
    category_breakdown, daily_totals, top_categories_for_month, trailing_months,
    weekday_breakdown, CategoryShare, DailyTotal, WeekdaySpending,
};
pub use budget::{budget_status, budget_status_with, BudgetState, BudgetStatus};
pub use forecaster::{linear_regression, predict_next_month, Forecaster};
pub use recommender::{generate_recommendations, get_spending_insights, Recommender};
pub use types::{
    CategoryTotals, ChangeDirection, Confidence, MonthChange, Prediction, PredictionMethod,
    Regression, SpendingInsights,
};

//! Budget limit status

use serde::Serialize;

use crate::config::RecommendConfig;
use crate::models::Expense;

use super::aggregate::total_spent;
use super::recommender::active_limit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetState {
    NoLimit,
    OverLimit,
    NearLimit,
    OnTrack,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub status: BudgetState,
    pub total_spent: f64,
    /// 0 when no limit is set
    pub limit: f64,
    /// Negative when over the limit
    pub remaining: f64,
    pub percent_used: f64,
    /// `percent_used` capped at 100 for progress bars
    pub progress_percent: f64,
    pub message: String,
}

/// Budget status with the default near-limit threshold
pub fn budget_status(expenses: &[Expense], limit: Option<f64>) -> BudgetStatus {
    budget_status_with(expenses, limit, &RecommendConfig::default())
}

pub fn budget_status_with(
    expenses: &[Expense],
    limit: Option<f64>,
    config: &RecommendConfig,
) -> BudgetStatus {
    let spent = total_spent(expenses);

    let Some(limit) = active_limit(limit) else {
        return BudgetStatus {
            status: BudgetState::NoLimit,
            total_spent: spent,
            limit: 0.0,
            remaining: -spent,
            percent_used: 0.0,
            progress_percent: 0.0,
            message: "No limit set.".to_string(),
        };
    };

    let remaining = limit - spent;
    let percent_used = spent / limit * 100.0;

    let (status, message) = if remaining < 0.0 {
        (
            BudgetState::OverLimit,
            format!("Over limit by ${:.2}!", remaining.abs()),
        )
    } else if percent_used >= config.near_limit_ratio * 100.0 {
        (
            BudgetState::NearLimit,
            format!(
                "Warning: You are close to your limit. Remaining: ${:.2}",
                remaining
            ),
        )
    } else {
        (
            BudgetState::OnTrack,
            format!("You are on track. Remaining: ${:.2}", remaining),
        )
    };

    BudgetStatus {
        status,
        total_spent: spent,
        limit,
        remaining,
        percent_used,
        progress_percent: percent_used.min(100.0),
        message,
    }
}

//! Spending Recommender
//!
//! Rule-based guidance from budget usage, category distribution and the
//! latest month-over-month trend. Rules are evaluated in a fixed order and
//! every rule that matches contributes one message:
//!
//! 1. Budget status (over budget, or close to the limit)
//! 2. Category dominance
//! 3. Month-over-month trend
//! 4. Positive fallback when nothing else fired

use tracing::debug;

use crate::config::RecommendConfig;
use crate::models::Expense;

use super::aggregate::{category_totals, group_by_month, month_over_month_change, total_spent};
use super::types::{ChangeDirection, SpendingInsights};

pub const NOT_ENOUGH_DATA: &str = "Not enough data for recommendations.";
pub const WELL_UNDER_BUDGET: &str = "Great job! You are well under your budget.";
pub const ON_TRACK: &str = "You are on track with your spending.";

pub struct Recommender {
    config: RecommendConfig,
}

impl Recommender {
    pub fn new() -> Self {
        Self {
            config: RecommendConfig::default(),
        }
    }

    pub fn with_config(config: RecommendConfig) -> Self {
        Self { config }
    }

    /// Ordered advisory messages; never empty
    pub fn recommendations(&self, expenses: &[Expense], limit: Option<f64>) -> Vec<String> {
        if expenses.is_empty() {
            return vec![NOT_ENOUGH_DATA.to_string()];
        }

        let limit = active_limit(limit);
        let totals = category_totals(expenses);
        let months = group_by_month(expenses);
        let spent = total_spent(expenses);
        let top = totals.top();

        let mut recommendations = Vec::new();

        if let Some(limit) = limit {
            let budget_percentage = spent / limit * 100.0;

            if spent > limit {
                let over = spent - limit;
                recommendations.push(match top {
                    Some((category, _)) => format!(
                        "You are over budget by ${:.2}. Consider cutting back on {}.",
                        over, category
                    ),
                    None => format!(
                        "You are over budget by ${:.2}. Consider reducing your spending.",
                        over
                    ),
                });
            } else if budget_percentage >= self.config.near_limit_ratio * 100.0 {
                recommendations.push(match top {
                    Some((category, _)) => format!(
                        "You are close to your budget ({}%). Be careful with {}.",
                        whole_percent(budget_percentage),
                        category
                    ),
                    None => format!(
                        "You are close to your budget ({}%). Consider monitoring your spending.",
                        whole_percent(budget_percentage)
                    ),
                });
            }
        }

        if let Some((category, amount)) = top {
            let share = amount / spent * 100.0;
            if share > self.config.dominance_percent {
                recommendations.push(format!(
                    "Most of your spending is in {} ({}%). Consider balancing your budget.",
                    category,
                    whole_percent(share)
                ));
            }
        }

        let change = month_over_month_change(&months, self.config.trend_percent);
        if change.has_change {
            let verb = match change.direction {
                ChangeDirection::Decrease => "decreased",
                _ => "increased",
            };
            recommendations.push(format!(
                "Your spending {} by {}% compared to last month.",
                verb, change.percentage
            ));
        }

        if recommendations.is_empty() {
            let well_under = limit.is_some_and(|l| spent < l * self.config.near_limit_ratio);
            recommendations.push(if well_under {
                WELL_UNDER_BUDGET.to_string()
            } else {
                ON_TRACK.to_string()
            });
        }

        debug!(
            count = recommendations.len(),
            total_spent = spent,
            "Recommendations generated"
        );

        recommendations
    }

    /// Structured summary of the same aggregates the rules use
    pub fn insights(&self, expenses: &[Expense], limit: Option<f64>) -> SpendingInsights {
        if expenses.is_empty() {
            return SpendingInsights::empty();
        }

        let limit = active_limit(limit);
        let totals = category_totals(expenses);
        let months = group_by_month(expenses);
        let spent = total_spent(expenses);
        let top_category = totals.top().map(|(category, _)| category.to_string());

        SpendingInsights {
            total_spent: spent,
            top_category,
            budget_percentage: limit.map(|l| spent / l * 100.0).unwrap_or(0.0),
            is_over_budget: limit.is_some_and(|l| spent > l),
            month_over_month_change: month_over_month_change(&months, self.config.trend_percent),
            category_totals: totals,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}

/// Recommendations with default thresholds
pub fn generate_recommendations(expenses: &[Expense], limit: Option<f64>) -> Vec<String> {
    Recommender::new().recommendations(expenses, limit)
}

/// Insights summary with default thresholds
pub fn get_spending_insights(expenses: &[Expense], limit: Option<f64>) -> SpendingInsights {
    Recommender::new().insights(expenses, limit)
}

/// A limit of 0 (or below) means no budget is set
pub(crate) fn active_limit(limit: Option<f64>) -> Option<f64> {
    limit.filter(|l| *l > 0.0)
}

fn whole_percent(value: f64) -> String {
    format!("{:.0}", value.round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::types::MonthChange;
    use crate::test_utils::expense;

    #[test]
    fn test_empty_expenses() {
        assert_eq!(
            generate_recommendations(&[], Some(500.0)),
            vec![NOT_ENOUGH_DATA.to_string()]
        );
        assert_eq!(get_spending_insights(&[], Some(500.0)), SpendingInsights::empty());
    }

    #[test]
    fn test_over_budget_names_top_category() {
        let expenses = vec![
            expense(700.0, "Food", "2024-04-02"),
            expense(300.0, "Shopping", "2024-04-10"),
            expense(200.0, "Utilities", "2024-04-20"),
        ];
        let recs = generate_recommendations(&expenses, Some(1000.0));
        assert_eq!(
            recs[0],
            "You are over budget by $200.00. Consider cutting back on Food."
        );
        // Food is 58% of spend
        assert!(recs.contains(
            &"Most of your spending is in Food (58%). Consider balancing your budget.".to_string()
        ));
    }

    #[test]
    fn test_zero_spend_has_no_top_category() {
        let expenses = vec![expense(0.0, "Food", "2024-04-02")];
        let insights = get_spending_insights(&expenses, None);
        assert!(insights.top_category.is_none());
        assert_eq!(
            generate_recommendations(&expenses, None),
            vec![ON_TRACK.to_string()]
        );
    }

    #[test]
    fn test_near_limit_warning() {
        let expenses = vec![
            expense(300.0, "Food", "2024-04-02"),
            expense(300.0, "Shopping", "2024-04-03"),
            expense(250.0, "Grocery", "2024-04-04"),
        ];
        let recs = generate_recommendations(&expenses, Some(1000.0));
        assert_eq!(
            recs,
            vec!["You are close to your budget (85%). Be careful with Food.".to_string()]
        );
    }

    #[test]
    fn test_near_limit_at_exact_ratio() {
        let expenses = vec![
            expense(40.0, "Food", "2024-04-02"),
            expense(40.0, "Shopping", "2024-04-03"),
        ];
        let recs = generate_recommendations(&expenses, Some(100.0));
        assert_eq!(
            recs,
            vec!["You are close to your budget (80%). Be careful with Food.".to_string()]
        );
    }

    #[test]
    fn test_over_budget_takes_precedence_over_near_limit() {
        let expenses = vec![
            expense(60.0, "Food", "2024-04-02"),
            expense(60.0, "Shopping", "2024-04-03"),
        ];
        let recs = generate_recommendations(&expenses, Some(100.0));
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("You are over budget by $20.00."));
    }

    #[test]
    fn test_fallback_on_track() {
        let expenses = vec![
            expense(25.0, "Food", "2024-04-02"),
            expense(25.0, "Shopping", "2024-04-03"),
        ];
        assert_eq!(
            generate_recommendations(&expenses, None),
            vec![ON_TRACK.to_string()]
        );
        // A zero limit means no budget
        assert_eq!(
            generate_recommendations(&expenses, Some(0.0)),
            vec![ON_TRACK.to_string()]
        );
    }

    #[test]
    fn test_fallback_well_under_budget() {
        let expenses = vec![
            expense(25.0, "Food", "2024-04-02"),
            expense(25.0, "Shopping", "2024-04-03"),
        ];
        assert_eq!(
            generate_recommendations(&expenses, Some(1000.0)),
            vec![WELL_UNDER_BUDGET.to_string()]
        );
    }

    #[test]
    fn test_trend_messages() {
        let rising = vec![
            expense(50.0, "Food", "2024-01-10"),
            expense(50.0, "Shopping", "2024-01-11"),
            expense(60.0, "Food", "2024-02-10"),
            expense(60.0, "Shopping", "2024-02-11"),
        ];
        assert_eq!(
            generate_recommendations(&rising, None),
            vec!["Your spending increased by 20% compared to last month.".to_string()]
        );

        let falling = vec![
            expense(100.0, "Food", "2024-01-10"),
            expense(100.0, "Shopping", "2024-01-11"),
            expense(75.0, "Food", "2024-02-10"),
            expense(75.0, "Shopping", "2024-02-11"),
        ];
        assert_eq!(
            generate_recommendations(&falling, None),
            vec!["Your spending decreased by 25% compared to last month.".to_string()]
        );
    }

    #[test]
    fn test_trend_exactly_threshold_not_reported() {
        let expenses = vec![
            expense(50.0, "Food", "2024-01-10"),
            expense(50.0, "Shopping", "2024-01-11"),
            expense(52.5, "Food", "2024-02-10"),
            expense(52.5, "Shopping", "2024-02-11"),
        ];
        assert_eq!(
            generate_recommendations(&expenses, None),
            vec![ON_TRACK.to_string()]
        );
    }

    #[test]
    fn test_trend_skipped_when_previous_month_is_zero() {
        let expenses = vec![
            expense(0.0, "Food", "2024-01-10"),
            expense(40.0, "Food", "2024-02-10"),
            expense(40.0, "Shopping", "2024-02-11"),
        ];
        assert_eq!(
            generate_recommendations(&expenses, None),
            vec![ON_TRACK.to_string()]
        );
    }

    #[test]
    fn test_rules_in_fixed_order() {
        let expenses = vec![
            expense(100.0, "Food", "2024-01-10"),
            expense(900.0, "Food", "2024-02-10"),
            expense(100.0, "Shopping", "2024-02-11"),
        ];
        let recs = generate_recommendations(&expenses, Some(1000.0));
        assert_eq!(recs.len(), 3);
        assert!(recs[0].starts_with("You are over budget by $100.00."));
        assert!(recs[1].starts_with("Most of your spending is in Food (91%)."));
        assert_eq!(
            recs[2],
            "Your spending increased by 900% compared to last month."
        );
    }

    #[test]
    fn test_insights_summary() {
        let expenses = vec![
            expense(100.0, "Food", "2024-01-10"),
            expense(50.0, "Shopping", "2024-02-10"),
            expense(70.0, "Food", "2024-02-11"),
        ];
        let insights = get_spending_insights(&expenses, Some(200.0));

        assert_eq!(insights.total_spent, 220.0);
        assert_eq!(insights.category_totals.get("Food"), Some(170.0));
        assert_eq!(insights.top_category.as_deref(), Some("Food"));
        assert!((insights.budget_percentage - 110.0).abs() < 1e-9);
        assert!(insights.is_over_budget);
        assert_eq!(insights.month_over_month_change.direction, ChangeDirection::Increase);
        assert_eq!(insights.month_over_month_change.percentage, 20.0);
        assert!(insights.month_over_month_change.has_change);
    }

    #[test]
    fn test_insights_without_limit() {
        let expenses = vec![expense(10.0, "Food", "2024-01-10")];
        let insights = get_spending_insights(&expenses, None);
        assert_eq!(insights.budget_percentage, 0.0);
        assert!(!insights.is_over_budget);
        assert_eq!(insights.month_over_month_change, MonthChange::stable());
    }

    #[test]
    fn test_custom_thresholds() {
        let recommender = Recommender::with_config(RecommendConfig {
            dominance_percent: 90.0,
            ..Default::default()
        });
        let expenses = vec![
            expense(80.0, "Food", "2024-01-10"),
            expense(20.0, "Shopping", "2024-01-11"),
        ];
        assert_eq!(
            recommender.recommendations(&expenses, None),
            vec![ON_TRACK.to_string()]
        );
    }

    #[test]
    fn test_recommendations_are_idempotent() {
        let expenses = vec![
            expense(100.0, "Food", "2024-01-10"),
            expense(140.0, "Food", "2024-02-10"),
        ];
        let first = generate_recommendations(&expenses, Some(300.0));
        let second = generate_recommendations(&expenses, Some(300.0));
        assert_eq!(first, second);
    }
}

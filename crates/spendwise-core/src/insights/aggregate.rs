//! Grouping subroutines shared by the forecaster, recommender and breakdowns

use std::collections::BTreeMap;

use crate::models::{Expense, MonthKey, MonthlyAggregate};

use super::types::{CategoryTotals, ChangeDirection, MonthChange};

/// Partition expenses by calendar month, ascending by month key
pub fn group_by_month(expenses: &[Expense]) -> Vec<MonthlyAggregate> {
    let mut months: BTreeMap<MonthKey, (f64, usize)> = BTreeMap::new();
    for expense in expenses {
        let entry = months.entry(expense.month_key()).or_insert((0.0, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }
    months
        .into_iter()
        .map(|(month_key, (total, count))| MonthlyAggregate {
            month_key,
            total,
            count,
        })
        .collect()
}

/// Sum amounts per category (missing category counts as "Other")
pub fn category_totals(expenses: &[Expense]) -> CategoryTotals {
    let mut totals = CategoryTotals::new();
    for expense in expenses {
        totals.add(expense.category_or_default(), expense.amount);
    }
    totals
}

pub fn total_spent(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Percentage change between the last two months
///
/// A previous month of 0 has no meaningful percentage, so it is reported
/// as stable.
pub fn month_over_month_change(months: &[MonthlyAggregate], threshold_percent: f64) -> MonthChange {
    let [.., previous, last] = months else {
        return MonthChange::stable();
    };
    if previous.total == 0.0 {
        return MonthChange::stable();
    }

    let change = (last.total - previous.total) / previous.total * 100.0;
    let direction = if change > 0.0 {
        ChangeDirection::Increase
    } else if change < 0.0 {
        ChangeDirection::Decrease
    } else {
        ChangeDirection::Stable
    };

    MonthChange {
        percentage: round_to(change.abs(), 1),
        direction,
        has_change: change.abs() > threshold_percent,
    }
}

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

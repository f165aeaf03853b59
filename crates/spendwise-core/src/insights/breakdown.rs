//! Chart-ready spending breakdowns (weekday, day, category, month window)

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::clock::Clock;
use crate::models::{Expense, MonthKey, MonthlyAggregate};

use super::aggregate::{category_totals, round_to, total_spent};

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Bars below this relative intensity are drawn at this floor
const MIN_INTENSITY: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdaySpending {
    pub day: &'static str,
    pub amount: f64,
    pub count: usize,
    /// Mean expense amount on this weekday
    pub average: f64,
    /// Amount relative to the busiest weekday, floored at 0.3
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    /// Share of the total, 0 when nothing was spent
    pub percent: f64,
}

/// Totals per weekday, Sunday first
pub fn weekday_breakdown(expenses: &[Expense]) -> Vec<WeekdaySpending> {
    let mut buckets = [(0.0_f64, 0_usize); 7];
    for expense in expenses {
        let idx = expense.date.weekday().num_days_from_sunday() as usize;
        buckets[idx].0 += expense.amount;
        buckets[idx].1 += 1;
    }

    let amounts: Vec<f64> = buckets.iter().map(|(amount, _)| round_to(*amount, 2)).collect();
    let max_amount = amounts.iter().copied().fold(0.0, f64::max);

    buckets
        .iter()
        .zip(amounts)
        .enumerate()
        .map(|(i, ((raw, count), amount))| WeekdaySpending {
            day: WEEKDAY_LABELS[i],
            amount,
            count: *count,
            average: if *count > 0 {
                round_to(raw / *count as f64, 2)
            } else {
                0.0
            },
            intensity: if max_amount == 0.0 {
                MIN_INTENSITY
            } else {
                (amount / max_amount).max(MIN_INTENSITY)
            },
        })
        .collect()
}

/// Totals per calendar day, ascending
pub fn daily_totals(expenses: &[Expense]) -> Vec<DailyTotal> {
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for expense in expenses {
        *days.entry(expense.date.date()).or_insert(0.0) += expense.amount;
    }
    days.into_iter()
        .map(|(date, amount)| DailyTotal {
            date,
            amount: round_to(amount, 2),
        })
        .collect()
}

/// Category totals with their share of spend, in first-seen order
pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategoryShare> {
    shares(expenses)
}

/// The `n` largest categories within one month, largest first
pub fn top_categories_for_month(expenses: &[Expense], month: MonthKey, n: usize) -> Vec<CategoryShare> {
    let in_month: Vec<Expense> = expenses
        .iter()
        .filter(|e| month.contains(e.date.date()))
        .cloned()
        .collect();

    let mut categories = shares(&in_month);
    // Stable sort keeps first-seen order among equal totals
    categories.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    categories.truncate(n);
    categories
}

/// Exactly `n` months ending at the clock's current month, zero-filled
///
/// Expenses outside the window are ignored.
pub fn trailing_months(expenses: &[Expense], clock: &dyn Clock, n: usize) -> Vec<MonthlyAggregate> {
    let mut keys = Vec::with_capacity(n);
    let mut key = clock.current_month();
    for _ in 0..n {
        keys.push(key);
        key = key.previous();
    }
    keys.reverse();

    let mut window: Vec<MonthlyAggregate> = keys
        .into_iter()
        .map(|month_key| MonthlyAggregate {
            month_key,
            total: 0.0,
            count: 0,
        })
        .collect();

    for expense in expenses {
        let month_key = expense.month_key();
        if let Some(bucket) = window.iter_mut().find(|m| m.month_key == month_key) {
            bucket.total += expense.amount;
            bucket.count += 1;
        }
    }

    window
}

fn shares(expenses: &[Expense]) -> Vec<CategoryShare> {
    let total = total_spent(expenses);
    category_totals(expenses)
        .iter()
        .map(|(category, amount)| CategoryShare {
            category: category.to_string(),
            amount: round_to(amount, 2),
            percent: if total > 0.0 {
                amount / total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::test_utils::expense;

    #[test]
    fn test_weekday_breakdown() {
        // 2024-01-07 is a Sunday, 2024-01-08 a Monday
        let expenses = vec![
            expense(10.0, "Food", "2024-01-07"),
            expense(20.0, "Food", "2024-01-14"),
            expense(15.0, "Food", "2024-01-08"),
        ];
        let days = weekday_breakdown(&expenses);

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].day, "Sun");
        assert_eq!(days[0].amount, 30.0);
        assert_eq!(days[0].count, 2);
        assert_eq!(days[0].average, 15.0);
        assert_eq!(days[0].intensity, 1.0);
        assert_eq!(days[1].intensity, 0.5);
        assert_eq!(days[2].amount, 0.0);
        assert_eq!(days[2].average, 0.0);
        assert_eq!(days[2].intensity, MIN_INTENSITY);
    }

    #[test]
    fn test_weekday_breakdown_empty() {
        let days = weekday_breakdown(&[]);
        assert!(days.iter().all(|d| d.amount == 0.0 && d.intensity == MIN_INTENSITY));
    }

    #[test]
    fn test_daily_totals_sorted() {
        let expenses = vec![
            expense(1.111, "Food", "2024-02-02"),
            expense(5.0, "Food", "2024-01-30"),
            expense(2.0, "Food", "2024-02-02"),
        ];
        let days = daily_totals(&expenses);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 1, 30).unwrap());
        assert_eq!(days[1].amount, 3.11);
    }

    #[test]
    fn test_category_breakdown_percent() {
        let expenses = vec![
            expense(75.0, "Food", "2024-02-02"),
            expense(25.0, "Shopping", "2024-02-03"),
        ];
        let shares = category_breakdown(&expenses);
        assert_eq!(shares[0].category, "Food");
        assert_eq!(shares[0].percent, 75.0);
        assert_eq!(shares[1].percent, 25.0);

        let zero = category_breakdown(&[expense(0.0, "Food", "2024-02-02")]);
        assert_eq!(zero[0].percent, 0.0);
    }

    #[test]
    fn test_top_categories_for_month() {
        let expenses = vec![
            expense(10.0, "Food", "2024-03-01"),
            expense(30.0, "Shopping", "2024-03-02"),
            expense(10.0, "Grocery", "2024-03-03"),
            expense(5.0, "Utilities", "2024-03-04"),
            expense(500.0, "Healthcare", "2024-02-28"),
        ];
        let month = MonthKey::new(2024, 3).unwrap();
        let top = top_categories_for_month(&expenses, month, 3);

        let names: Vec<&str> = top.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Shopping", "Food", "Grocery"]);
    }

    #[test]
    fn test_trailing_months_window() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        let expenses = vec![
            expense(10.0, "Food", "2023-09-15"),
            expense(20.0, "Food", "2023-12-01"),
            expense(30.0, "Food", "2024-02-09"),
            expense(99.0, "Food", "2023-08-31"),
        ];
        let window = trailing_months(&expenses, &clock, 6);

        let keys: Vec<String> = window.iter().map(|m| m.month_key.to_string()).collect();
        assert_eq!(
            keys,
            vec!["2023-09", "2023-10", "2023-11", "2023-12", "2024-01", "2024-02"]
        );
        assert_eq!(window[0].total, 10.0);
        assert_eq!(window[1].total, 0.0);
        assert_eq!(window[5].count, 1);
        let in_window: f64 = window.iter().map(|m| m.total).sum();
        assert_eq!(in_window, 60.0);
    }
}

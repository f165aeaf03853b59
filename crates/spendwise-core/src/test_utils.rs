//! Test fixtures for building expense lists

use crate::models::{parse_expense_date, Expense};

/// Build an expense dated at midnight on `date` (YYYY-MM-DD)
pub fn expense(amount: f64, category: &str, date: &str) -> Expense {
    let date = parse_expense_date(date).unwrap_or_else(|| panic!("bad test date: {}", date));
    Expense::new(amount, Some(category), "", date).unwrap()
}

/// One expense per month, dated on the 15th, categorized as "Other"
pub fn monthly_expenses(months: &[(&str, f64)]) -> Vec<Expense> {
    months
        .iter()
        .map(|(month, total)| expense(*total, "Other", &format!("{}-15", month)))
        .collect()
}

//! Breakdown command implementation

use std::path::Path;

use anyhow::{Context, Result};
use spendwise_core::insights::{
    category_breakdown, daily_totals, top_categories_for_month, trailing_months,
    weekday_breakdown, CategoryShare,
};
use spendwise_core::{Clock, InsightsConfig, MonthKey, SystemClock};

use super::{load_expenses, truncate};
use crate::cli::BreakdownKind;

pub fn cmd_breakdown(
    config: &InsightsConfig,
    file: &Path,
    by: BreakdownKind,
    month: Option<&str>,
) -> Result<()> {
    let expenses = load_expenses(file)?;
    let clock = SystemClock;

    println!();
    match by {
        BreakdownKind::Weekday => {
            println!("📅 Spending by Weekday");
            println!("   ─────────────────────────────────────────────────────────────");
            println!("   {:4} │ {:>10} │ {:>5} │ {:>8}", "Day", "Amount", "Count", "Average");
            println!("   ─────┼────────────┼───────┼──────────");
            for day in weekday_breakdown(&expenses) {
                println!(
                    "   {:4} │ {:>10.2} │ {:>5} │ {:>8.2}",
                    day.day, day.amount, day.count, day.average
                );
            }
        }
        BreakdownKind::Daily => {
            println!("📈 Daily Totals");
            println!("   ─────────────────────────────────────────────────────────────");
            let days = daily_totals(&expenses);
            if days.is_empty() {
                println!("   No spending found.");
            }
            for day in days {
                println!("   {} │ {:>10.2}", day.date, day.amount);
            }
        }
        BreakdownKind::Category => {
            println!("🏷️  Spending by Category");
            println!("   ─────────────────────────────────────────────────────────────");
            print_shares(&category_breakdown(&expenses));
        }
        BreakdownKind::Months => {
            let n = config.breakdown.trailing_months;
            println!("🗓️  Last {} Months", n);
            println!("   ─────────────────────────────────────────────────────────────");
            for bucket in trailing_months(&expenses, &clock, n) {
                println!(
                    "   {} │ {:>10.2} │ {:>5}",
                    bucket.month_key, bucket.total, bucket.count
                );
            }
        }
        BreakdownKind::Top => {
            let month = match month {
                Some(m) => m
                    .parse::<MonthKey>()
                    .map_err(anyhow::Error::msg)
                    .context("Invalid --month (use YYYY-MM)")?,
                None => clock.current_month(),
            };
            println!("🏆 Top Categories for {}", month);
            println!("   ─────────────────────────────────────────────────────────────");
            let top = top_categories_for_month(&expenses, month, config.breakdown.top_categories);
            if top.is_empty() {
                println!("   No spending found in this month.");
            }
            print_shares(&top);
        }
    }

    Ok(())
}

fn print_shares(shares: &[CategoryShare]) {
    if shares.is_empty() {
        return;
    }
    println!("   {:20} │ {:>10} │ {:>6}", "Category", "Amount", "%");
    println!("   ─────────────────────┼────────────┼────────");
    for share in shares {
        println!(
            "   {:20} │ {:>10.2} │ {:>5.1}%",
            truncate(&share.category, 20),
            share.amount,
            share.percent
        );
    }
}

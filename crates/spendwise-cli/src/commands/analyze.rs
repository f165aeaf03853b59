//! Forecast, recommendation, insights and budget commands

use std::path::Path;

use anyhow::Result;
use spendwise_core::insights::{budget_status_with, BudgetState};
use spendwise_core::{Forecaster, InsightsConfig, Recommender};

use super::{load_expenses, truncate};

pub fn cmd_forecast(config: &InsightsConfig, file: &Path, json: bool) -> Result<()> {
    let expenses = load_expenses(file)?;
    let prediction = Forecaster::with_config(config.forecast.clone()).predict(&expenses);

    if json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
        return Ok(());
    }

    println!();
    println!("🔮 Next Month Forecast ({})", spendwise_core::next_month_string());
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Predicted:  ${:.2}", prediction.predicted_amount);
    println!("   Confidence: {}", prediction.confidence);
    println!("   Method:     {}", prediction.method);

    if let Some(regression) = prediction.regression {
        println!(
            "   Trend:      {:+.2}/month (R² {:.2})",
            regression.slope, regression.r_squared
        );
    }

    if !prediction.monthly_aggregates.is_empty() {
        println!();
        println!("   {:8} │ {:>10} │ {:>5}", "Month", "Total", "Count");
        println!("   ─────────┼────────────┼───────");
        for month in &prediction.monthly_aggregates {
            println!(
                "   {:8} │ {:>10.2} │ {:>5}",
                month.month_key.to_string(),
                month.total,
                month.count
            );
        }
    }

    Ok(())
}

pub fn cmd_recommend(config: &InsightsConfig, file: &Path, limit: Option<f64>) -> Result<()> {
    let expenses = load_expenses(file)?;
    let recommendations =
        Recommender::with_config(config.recommend.clone()).recommendations(&expenses, limit);

    println!();
    println!("💡 Recommendations");
    println!("   ─────────────────────────────────────────────────────────────");
    for rec in &recommendations {
        println!("   • {}", rec);
    }

    Ok(())
}

pub fn cmd_insights(
    config: &InsightsConfig,
    file: &Path,
    limit: Option<f64>,
    json: bool,
) -> Result<()> {
    let expenses = load_expenses(file)?;
    let insights = Recommender::with_config(config.recommend.clone()).insights(&expenses, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    println!();
    println!("📊 Spending Insights");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total spent:  ${:.2}", insights.total_spent);
    println!(
        "   Top category: {}",
        insights.top_category.as_deref().unwrap_or("-")
    );
    if insights.budget_percentage > 0.0 {
        println!(
            "   Budget used:  {:.1}%{}",
            insights.budget_percentage,
            if insights.is_over_budget {
                " (over budget)"
            } else {
                ""
            }
        );
    }
    let change = insights.month_over_month_change;
    println!(
        "   Last month:   {} {}%{}",
        change.direction,
        change.percentage,
        if change.has_change { "" } else { " (not significant)" }
    );

    if !insights.category_totals.is_empty() {
        println!();
        println!("   {:20} │ {:>10}", "Category", "Amount");
        println!("   ─────────────────────┼────────────");
        for (category, total) in insights.category_totals.iter() {
            println!("   {:20} │ {:>10.2}", truncate(category, 20), total);
        }
    }

    Ok(())
}

pub fn cmd_budget(config: &InsightsConfig, file: &Path, limit: Option<f64>) -> Result<()> {
    let expenses = load_expenses(file)?;
    let status = budget_status_with(&expenses, limit, &config.recommend);

    let icon = match status.status {
        BudgetState::NoLimit => "⚪",
        BudgetState::OverLimit => "🔴",
        BudgetState::NearLimit => "🟡",
        BudgetState::OnTrack => "🟢",
    };

    println!();
    println!("{} {}", icon, status.message);
    if status.status != BudgetState::NoLimit {
        println!(
            "   ${:.2} / ${:.2} ({:.1}% of limit used)",
            status.total_spent, status.limit, status.percent_used
        );
    }

    Ok(())
}

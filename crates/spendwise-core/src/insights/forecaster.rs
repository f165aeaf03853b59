//! Expense Forecaster
//!
//! Predicts next month's total from monthly aggregates:
//! - No data: nothing to predict
//! - One month: repeat it
//! - Two or more: least-squares trend over month index
//!
//! Month index is the position in the sorted aggregate list, so a gap of
//! several calendar months still counts as one step.

use tracing::{debug, warn};

use crate::config::ForecastConfig;
use crate::models::{Expense, MonthlyAggregate};

use super::aggregate::{group_by_month, round_to};
use super::types::{Confidence, Prediction, PredictionMethod, Regression};

/// Forecaster for next month's spending
pub struct Forecaster {
    config: ForecastConfig,
}

impl Forecaster {
    pub fn new() -> Self {
        Self {
            config: ForecastConfig::default(),
        }
    }

    pub fn with_config(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn predict(&self, expenses: &[Expense]) -> Prediction {
        if expenses.is_empty() {
            return Prediction::insufficient_data();
        }

        let months = group_by_month(expenses);

        let prediction = match months.len() {
            0 => Prediction::insufficient_data(),
            1 => Prediction {
                predicted_amount: months[0].total,
                confidence: Confidence::Low,
                method: PredictionMethod::SameMonth,
                monthly_aggregates: months,
                regression: None,
            },
            _ => match linear_regression(&months) {
                Some(regression) => {
                    let next_index = months.len() as f64;
                    let predicted = regression.predict(next_index).max(0.0);
                    Prediction {
                        predicted_amount: round_to(predicted, 2),
                        confidence: self.confidence(months.len(), regression.r_squared),
                        method: PredictionMethod::LinearRegression,
                        monthly_aggregates: months,
                        regression: Some(regression),
                    }
                }
                None => {
                    let average = months.iter().map(|m| m.total).sum::<f64>() / months.len() as f64;
                    Prediction {
                        predicted_amount: average,
                        confidence: Confidence::Medium,
                        method: PredictionMethod::Average,
                        monthly_aggregates: months,
                        regression: None,
                    }
                }
            },
        };

        debug!(
            months = prediction.monthly_aggregates.len(),
            method = prediction.method.as_str(),
            confidence = prediction.confidence.as_str(),
            predicted = prediction.predicted_amount,
            "Forecast computed"
        );

        prediction
    }

    fn confidence(&self, month_count: usize, r_squared: f64) -> Confidence {
        if month_count >= self.config.high_confidence_min_months
            && r_squared > self.config.high_confidence_r_squared
        {
            Confidence::High
        } else if month_count >= 2 && r_squared > self.config.medium_confidence_r_squared {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Predict next month's total with default thresholds
pub fn predict_next_month(expenses: &[Expense]) -> Prediction {
    Forecaster::new().predict(expenses)
}

/// Fit total = slope * index + intercept over the aggregates
///
/// Returns None with fewer than two points or when the fit is not finite.
pub fn linear_regression(months: &[MonthlyAggregate]) -> Option<Regression> {
    let n = months.len();
    if n < 2 {
        return None;
    }

    let points: Vec<(f64, f64)> = months
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.total))
        .collect();

    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n as f64;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n as f64;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (x, y) in &points {
        numerator += (x - mean_x) * (y - mean_y);
        denominator += (x - mean_x) * (x - mean_x);
    }

    let slope = if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    };
    let intercept = mean_y - slope * mean_x;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (x, y) in &points {
        let predicted = slope * x + intercept;
        ss_res += (y - predicted).powi(2);
        ss_tot += (y - mean_y).powi(2);
    }

    // Constant totals are a perfect (trivial) fit
    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    if !(slope.is_finite() && intercept.is_finite() && r_squared.is_finite()) {
        warn!(months = n, "Regression produced non-finite coefficients");
        return None;
    }

    Some(Regression {
        slope,
        intercept,
        r_squared,
    })
}

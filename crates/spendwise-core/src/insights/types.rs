//! Result types for the insights engine

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::models::MonthlyAggregate;

/// Qualitative reliability of a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    None,
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::None => "none",
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Confidence::None),
            "low" => Ok(Confidence::Low),
            "medium" => Ok(Confidence::Medium),
            "high" => Ok(Confidence::High),
            _ => Err(format!("Unknown confidence: {}", s)),
        }
    }
}

/// How a forecast was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMethod {
    /// No expenses to work from
    InsufficientData,
    /// One month of data, repeated
    SameMonth,
    /// Mean of monthly totals (regression could not be fitted)
    Average,
    /// Least-squares trend over month index
    LinearRegression,
}

impl PredictionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionMethod::InsufficientData => "insufficient_data",
            PredictionMethod::SameMonth => "same_month",
            PredictionMethod::Average => "average",
            PredictionMethod::LinearRegression => "linear_regression",
        }
    }
}

impl fmt::Display for PredictionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PredictionMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insufficient_data" => Ok(PredictionMethod::InsufficientData),
            "same_month" => Ok(PredictionMethod::SameMonth),
            "average" => Ok(PredictionMethod::Average),
            "linear_regression" => Ok(PredictionMethod::LinearRegression),
            _ => Err(format!("Unknown prediction method: {}", s)),
        }
    }
}

/// Linear fit of monthly totals against month index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl Regression {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Forecast for next month's total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub predicted_amount: f64,
    pub confidence: Confidence,
    pub method: PredictionMethod,
    pub monthly_aggregates: Vec<MonthlyAggregate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regression: Option<Regression>,
}

impl Prediction {
    pub fn insufficient_data() -> Self {
        Self {
            predicted_amount: 0.0,
            confidence: Confidence::None,
            method: PredictionMethod::InsufficientData,
            monthly_aggregates: Vec::new(),
            regression: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDirection {
    Increase,
    Decrease,
    Stable,
}

impl ChangeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeDirection::Increase => "increase",
            ChangeDirection::Decrease => "decrease",
            ChangeDirection::Stable => "stable",
        }
    }
}

impl fmt::Display for ChangeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Change between the two most recent months
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthChange {
    /// Absolute percentage change, rounded to one decimal
    pub percentage: f64,
    pub direction: ChangeDirection,
    /// Whether the change exceeds the reporting threshold
    pub has_change: bool,
}

impl MonthChange {
    pub fn stable() -> Self {
        Self {
            percentage: 0.0,
            direction: ChangeDirection::Stable,
            has_change: false,
        }
    }
}

/// Category totals in first-seen order
///
/// Serializes as a JSON object keyed by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<(String, f64)>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: &str, amount: f64) {
        match self.entries.iter_mut().find(|(c, _)| c == category) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((category.to_string(), amount)),
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(c, t)| (c.as_str(), *t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest category; ties go to the first seen, and all-zero totals
    /// have no top category
    pub fn top(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        let mut max = 0.0;
        for (category, total) in self.iter() {
            if total > max {
                max = total;
                best = Some((category, total));
            }
        }
        best
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, total) in &self.entries {
            map.serialize_entry(category, total)?;
        }
        map.end()
    }
}

/// Structured spending summary for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingInsights {
    pub total_spent: f64,
    pub category_totals: CategoryTotals,
    pub top_category: Option<String>,
    /// Percent of the limit spent; 0 when no limit is set
    pub budget_percentage: f64,
    pub is_over_budget: bool,
    pub month_over_month_change: MonthChange,
}

impl SpendingInsights {
    pub fn empty() -> Self {
        Self {
            total_spent: 0.0,
            category_totals: CategoryTotals::new(),
            top_category: None,
            budget_percentage: 0.0,
            is_over_budget: false,
            month_over_month_change: MonthChange::stable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_serialization() {
        assert_eq!(
            serde_json::to_string(&PredictionMethod::InsufficientData).unwrap(),
            "\"insufficient_data\""
        );
        assert_eq!(serde_json::to_string(&Confidence::High).unwrap(), "\"high\"");
        assert_eq!(
            "linear_regression".parse::<PredictionMethod>().unwrap(),
            PredictionMethod::LinearRegression
        );
        assert!("sometimes".parse::<Confidence>().is_err());
    }

    #[test]
    fn test_category_totals_top_prefers_first_on_tie() {
        let mut totals = CategoryTotals::new();
        totals.add("Food", 50.0);
        totals.add("Shopping", 50.0);
        totals.add("Food", 0.0);
        assert_eq!(totals.top(), Some(("Food", 50.0)));
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_category_totals_all_zero_has_no_top() {
        let mut totals = CategoryTotals::new();
        totals.add("Food", 0.0);
        assert!(totals.top().is_none());
    }

    #[test]
    fn test_category_totals_serializes_in_insertion_order() {
        let mut totals = CategoryTotals::new();
        totals.add("Shopping", 10.0);
        totals.add("Food", 5.0);
        let json = serde_json::to_string(&totals).unwrap();
        assert_eq!(json, r#"{"Shopping":10.0,"Food":5.0}"#);
    }

    #[test]
    fn test_prediction_json_shape() {
        let json = serde_json::to_value(Prediction::insufficient_data()).unwrap();
        assert_eq!(json["predictedAmount"], 0.0);
        assert_eq!(json["confidence"], "none");
        assert_eq!(json["method"], "insufficient_data");
        assert!(json.get("regression").is_none());
    }
}

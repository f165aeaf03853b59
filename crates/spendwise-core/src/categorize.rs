//! Category suggestion from free-text expense descriptions
//!
//! Matching is a case-insensitive substring search over an ordered keyword
//! table. The first category (in table order) with any matching keyword wins,
//! so overlapping keywords ("gas", "subway") resolve to the earlier category.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::InsightsConfig;

/// Spending categories offered by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Grocery,
    Transportation,
    Entertainment,
    Utilities,
    Healthcare,
    Shopping,
    Food,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grocery => "Grocery",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Healthcare => "Healthcare",
            Self::Shopping => "Shopping",
            Self::Food => "Food",
            Self::Other => "Other",
        }
    }

    /// All categories in table order, with Other last
    pub fn all() -> &'static [Category] {
        &[
            Self::Grocery,
            Self::Transportation,
            Self::Entertainment,
            Self::Utilities,
            Self::Healthcare,
            Self::Shopping,
            Self::Food,
            Self::Other,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Built-in keyword table, in match order
const KEYWORD_TABLE: &[(Category, &[&str])] = &[
    (
        Category::Grocery,
        &[
            "walmart",
            "kroger",
            "aldi",
            "grocery",
            "supermarket",
            "food",
            "grocery store",
            "safeway",
            "whole foods",
            "trader joe",
        ],
    ),
    (
        Category::Transportation,
        &[
            "uber", "lyft", "bus", "train", "taxi", "gas", "fuel", "parking", "metro", "subway",
            "flight", "airline",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "netflix",
            "spotify",
            "movie",
            "concert",
            "theater",
            "cinema",
            "game",
            "hulu",
            "disney",
            "amazon prime",
        ],
    ),
    (
        Category::Utilities,
        &[
            "electric",
            "water",
            "gas",
            "internet",
            "phone",
            "cable",
            "utility",
            "electricity",
            "heating",
            "cooling",
        ],
    ),
    (
        Category::Healthcare,
        &[
            "pharmacy",
            "doctor",
            "hospital",
            "medicine",
            "medical",
            "clinic",
            "dentist",
            "prescription",
            "health",
            "cvs",
            "walgreens",
        ],
    ),
    (
        Category::Shopping,
        &[
            "amazon",
            "target",
            "mall",
            "clothes",
            "shopping",
            "store",
            "retail",
            "nike",
            "adidas",
            "best buy",
            "home depot",
        ],
    ),
    (
        Category::Food,
        &[
            "restaurant",
            "mcdonald",
            "pizza",
            "coffee",
            "dining",
            "lunch",
            "dinner",
            "breakfast",
            "cafe",
            "starbucks",
            "subway",
            "burger",
        ],
    ),
];

/// Categories offered for selection, in table order with "Other" last
pub fn get_categories() -> Vec<Category> {
    Category::all().to_vec()
}

/// Suggest a category for a description using the built-in table
pub fn suggest_category(description: &str) -> Category {
    if description.is_empty() {
        return Category::Other;
    }
    let lower = description.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

/// Suggest a category for untyped input (e.g. a raw form value)
pub fn suggest_category_value(value: &Value) -> Category {
    match Description::from_value(value) {
        Description::Text(text) => suggest_category(&text),
        Description::Invalid => Category::Other,
    }
}

/// Description input after the type check at the UI boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Description {
    /// A non-empty string
    Text(String),
    /// Missing, empty or not a string
    Invalid,
}

impl Description {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) if !s.is_empty() => Self::Text(s.clone()),
            _ => Self::Invalid,
        }
    }
}

/// Keyword categorizer with optional user-supplied keywords
///
/// Extra keywords are appended after the built-in ones for each category, so
/// table order still decides overlaps.
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<(Category, Vec<String>)>,
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Categorizer {
    pub fn new() -> Self {
        let rules = KEYWORD_TABLE
            .iter()
            .map(|(category, keywords)| {
                (*category, keywords.iter().map(|k| k.to_string()).collect())
            })
            .collect();
        Self { rules }
    }

    pub fn from_config(config: &InsightsConfig) -> Self {
        let mut categorizer = Self::new();
        for (category, keywords) in &config.extra_keywords {
            categorizer.add_keywords(*category, keywords.iter().map(String::as_str));
        }
        categorizer
    }

    /// Append keywords to a category (a new entry is added at the end for
    /// categories without built-in keywords, such as Other)
    pub fn add_keywords<'a>(
        &mut self,
        category: Category,
        keywords: impl IntoIterator<Item = &'a str>,
    ) {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return;
        }
        match self.rules.iter_mut().find(|(c, _)| *c == category) {
            Some((_, existing)) => existing.extend(keywords),
            None => self.rules.push((category, keywords)),
        }
    }

    pub fn suggest(&self, description: &str) -> Category {
        if description.is_empty() {
            return Category::Other;
        }
        let lower = description.to_lowercase();
        for (category, keywords) in &self.rules {
            if let Some(keyword) = keywords.iter().find(|k| lower.contains(k.as_str())) {
                debug!(category = category.as_str(), keyword = keyword.as_str(), "Category matched");
                return *category;
            }
        }
        Category::Other
    }

    pub fn suggest_value(&self, value: &Value) -> Category {
        match Description::from_value(value) {
            Description::Text(text) => self.suggest(&text),
            Description::Invalid => Category::Other,
        }
    }

    /// Keywords for a category, in match order
    pub fn keywords(&self, category: Category) -> &[String] {
        self.rules
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, k)| k.as_slice())
            .unwrap_or(&[])
    }
}

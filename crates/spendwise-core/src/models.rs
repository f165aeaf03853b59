//! Domain models for Spendwise

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Category label used when an expense has none
pub const DEFAULT_CATEGORY: &str = "Other";

/// A logged spending event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Opaque identity from the store, never used by the analytics
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_description")]
    pub description: String,
    #[serde(
        deserialize_with = "deserialize_expense_date",
        serialize_with = "serialize_expense_date"
    )]
    pub date: NaiveDateTime,
}

impl Expense {
    /// Create a validated expense
    pub fn new(
        amount: f64,
        category: Option<&str>,
        description: impl Into<String>,
        date: NaiveDateTime,
    ) -> Result<Self> {
        let expense = Self {
            id: None,
            amount,
            category: category.map(|c| c.to_string()),
            description: description.into(),
            date,
        };
        expense.validate()?;
        Ok(expense)
    }

    /// Attach the store's identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Reject amounts that would poison the sums (NaN, infinite, negative)
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() {
            return Err(Error::InvalidData(format!(
                "Expense amount must be a finite number, got {}",
                self.amount
            )));
        }
        if self.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Expense amount must not be negative, got {}",
                self.amount
            )));
        }
        Ok(())
    }

    /// Category label, falling back to "Other" when missing or empty
    pub fn category_or_default(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => DEFAULT_CATEGORY,
        }
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date.date())
    }
}

/// Calendar month identifier, displayed as zero-padded "YYYY-MM"
///
/// Ordering is (year, month), which agrees with the lexical order of the
/// zero-padded string form for four-digit years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Returns None unless month is 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid month key (use YYYY-MM): {}", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in month key: {}", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month in month key: {}", s))?;
        MonthKey::new(year, month).ok_or_else(|| format!("Month out of range: {}", s))
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Sum and count of expense amounts for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAggregate {
    pub month_key: MonthKey,
    pub total: f64,
    pub count: usize,
}

/// Parse an expense timestamp
///
/// Accepts RFC 3339 (the wall-clock time as written is kept, so the month
/// is the one the user saw), `YYYY-MM-DDTHH:MM:SS[.fff]`, or `YYYY-MM-DD`.
pub fn parse_expense_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn deserialize_expense_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_expense_date(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("Invalid expense date: {}", s)))
}

fn serialize_expense_date<S>(date: &NaiveDateTime, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format("%Y-%m-%dT%H:%M:%S"))
}

/// A null description is treated as empty
fn deserialize_description<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Store ids arrive as either strings or numbers
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    }))
}

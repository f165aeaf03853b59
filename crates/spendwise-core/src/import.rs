//! Expense import from JSON and CSV exports
//!
//! Every imported expense is validated; a NaN, infinite or negative amount
//! fails the whole import with the offending row named.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{parse_expense_date, Expense};

/// Supported expense file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Csv,
}

impl ImportFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Load expenses from a `.json` or `.csv` file
pub fn load_file(path: &Path) -> Result<Vec<Expense>> {
    let format = ImportFormat::from_path(path).ok_or_else(|| {
        Error::Import(format!(
            "Unsupported file type (use .json or .csv): {}",
            path.display()
        ))
    })?;
    let reader = BufReader::new(File::open(path)?);
    let expenses = match format {
        ImportFormat::Json => parse_json(reader)?,
        ImportFormat::Csv => parse_csv(reader)?,
    };
    debug!(path = %path.display(), count = expenses.len(), "Loaded expenses");
    Ok(expenses)
}

/// Parse a JSON array of expense records
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let expenses: Vec<Expense> = serde_json::from_reader(reader)?;
    for (i, expense) in expenses.iter().enumerate() {
        expense
            .validate()
            .map_err(|e| Error::Import(format!("Record {}: {}", i + 1, e)))?;
    }
    Ok(expenses)
}

/// Column positions resolved from the header row
struct Columns {
    date: usize,
    amount: usize,
    category: Option<usize>,
    description: Option<usize>,
    id: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Ok(Self {
            date: find("date").ok_or_else(|| Error::Import("Missing 'date' column".into()))?,
            amount: find("amount")
                .ok_or_else(|| Error::Import("Missing 'amount' column".into()))?,
            category: find("category"),
            description: find("description"),
            id: find("id"),
        })
    }
}

/// Parse CSV with a header row naming `date`, `amount` and optionally
/// `category`, `description`, `id` (any order)
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut expenses = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is line 1
        let line = i + 2;

        let date_str = record
            .get(columns.date)
            .ok_or_else(|| Error::Import(format!("Line {}: missing date", line)))?;
        let date = parse_expense_date(date_str)
            .ok_or_else(|| Error::Import(format!("Line {}: unable to parse date: {}", line, date_str)))?;

        let amount_str = record
            .get(columns.amount)
            .ok_or_else(|| Error::Import(format!("Line {}: missing amount", line)))?;
        let amount = parse_amount(amount_str)
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;

        let optional = |col: Option<usize>| {
            col.and_then(|c| record.get(c))
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        };

        let mut expense = Expense::new(
            amount,
            optional(columns.category).as_deref(),
            optional(columns.description).unwrap_or_default(),
            date,
        )
        .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;
        expense.id = optional(columns.id);

        expenses.push(expense);
    }

    Ok(expenses)
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s.trim().replace(['$', ',', ' '], "");

    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv() {
        let data = "date,amount,category,description\n\
                    2024-01-15,12.50,Food,Lunch\n\
                    2024-01-16,\"$1,200.00\",Shopping,TV\n\
                    2024-01-17,3,,\n";
        let expenses = parse_csv(data.as_bytes()).unwrap();

        assert_eq!(expenses.len(), 3);
        assert_eq!(expenses[0].amount, 12.5);
        assert_eq!(expenses[0].description, "Lunch");
        assert_eq!(expenses[1].amount, 1200.0);
        assert!(expenses[2].category.is_none());
        assert_eq!(expenses[2].category_or_default(), "Other");
    }

    #[test]
    fn test_parse_csv_any_column_order() {
        let data = "id,description,Amount,Date\nabc,Coffee,4.25,2024-03-01T08:15:00\n";
        let expenses = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(expenses[0].id.as_deref(), Some("abc"));
        assert_eq!(expenses[0].amount, 4.25);
    }

    #[test]
    fn test_parse_csv_rejects_negative_amount() {
        let data = "date,amount\n2024-01-15,10\n2024-01-16,-5\n";
        let err = parse_csv(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Line 3"));
    }

    #[test]
    fn test_parse_csv_missing_columns() {
        assert!(parse_csv("when,amount\n2024-01-01,1\n".as_bytes()).is_err());
        assert!(parse_csv("date,cost\n2024-01-01,1\n".as_bytes()).is_err());
    }

    #[test]
    fn test_parse_csv_bad_values() {
        assert!(parse_csv("date,amount\nsoon,1\n".as_bytes()).is_err());
        assert!(parse_csv("date,amount\n2024-01-01,lots\n".as_bytes()).is_err());
        assert!(parse_csv("date,amount\n2024-01-01,NaN\n".as_bytes()).is_err());
    }

    #[test]
    fn test_parse_json() {
        let data = r#"[
            {"id": "a1", "amount": 20, "category": "Food", "description": "Pizza", "date": "2024-02-01T19:00:00.000Z"},
            {"amount": 5.5, "date": "2024-02-03"}
        ]"#;
        let expenses = parse_json(data.as_bytes()).unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[1].description, "");
        assert!(expenses[1].category.is_none());
    }

    #[test]
    fn test_parse_json_null_description() {
        let data = r#"[{"amount": 5, "description": null, "category": null, "date": "2024-01-01"}]"#;
        let expenses = parse_json(data.as_bytes()).unwrap();
        assert_eq!(expenses[0].description, "");
        assert_eq!(expenses[0].category_or_default(), "Other");
    }

    #[test]
    fn test_parse_json_rejects_negative() {
        let data = r#"[{"amount": -1, "date": "2024-02-03"}]"#;
        let err = parse_json(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Record 1"));
    }

    #[test]
    fn test_load_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("expenses.json");
        std::fs::write(&json, r#"[{"amount": 1, "date": "2024-01-01"}]"#).unwrap();
        assert_eq!(load_file(&json).unwrap().len(), 1);

        let csv = dir.path().join("expenses.CSV");
        std::fs::write(&csv, "date,amount\n2024-01-01,2\n").unwrap();
        assert_eq!(load_file(&csv).unwrap()[0].amount, 2.0);

        let txt = dir.path().join("expenses.txt");
        std::fs::write(&txt, "").unwrap();
        assert!(matches!(load_file(&txt), Err(Error::Import(_))));
    }
}

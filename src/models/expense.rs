//! Expense model
//!
//! An expense is a fixed-shape record: once created it is never edited, only
//! deleted and re-added. There are two ways to build one:
//!
//! - [`NewExpense::parse`] checks user-entered text and collects every
//!   problem it finds.
//! - [`Expense::from_parts`] trusts its inputs. It is what deserialization
//!   and CSV import go through.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::warn;

use super::ids::ExpenseId;
use super::money::Amount;

/// Format of the `date` field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single tracked expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Short identifier
    pub id: ExpenseId,

    /// Amount spent (positive for validated records)
    pub amount: Amount,

    /// Free-text grouping label, stored with original casing
    pub category: String,

    /// What the money was spent on
    pub description: String,

    /// Calendar date as `YYYY-MM-DD`
    ///
    /// Kept as text: range filters compare it lexicographically, which only
    /// matches calendar order for the fixed-width format.
    pub date: String,

    /// When the record was created (local time)
    ///
    /// Read leniently: a missing or unreadable value becomes the Unix epoch
    /// instead of failing the whole file.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: NaiveDateTime,
}

impl Expense {
    /// Create a new expense stamped with a fresh id and the current time
    ///
    /// Category and description are trimmed. `date` defaults to today. No
    /// validation happens here.
    pub fn new(
        amount: Amount,
        category: &str,
        description: &str,
        date: Option<String>,
    ) -> Self {
        Self {
            id: ExpenseId::generate(),
            amount,
            category: category.trim().to_string(),
            description: description.trim().to_string(),
            date: date.unwrap_or_else(today),
            created_at: now(),
        }
    }

    /// Build an expense from already-known fields without any checks
    pub fn from_parts(
        id: ExpenseId,
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            amount,
            category: category.into(),
            description: description.into(),
            date: date.into(),
            created_at,
        }
    }

    /// Case-insensitive category match
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// Inclusive lexicographic date range match
    pub fn in_date_range(&self, start: &str, end: &str) -> bool {
        start <= self.date.as_str() && self.date.as_str() <= end
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date, self.description, self.amount, self.category
        )
    }
}

/// Validated user input for a new expense
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: Option<String>,
}

impl NewExpense {
    /// Check raw user input, reporting every problem at once
    ///
    /// An empty or missing `date` means "today".
    pub fn parse(
        amount: &str,
        category: &str,
        description: &str,
        date: Option<&str>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = validate_expense(amount, category, description);

        let date = date.map(str::trim).filter(|d| !d.is_empty());
        if let Some(d) = date {
            if let Some(message) = validate_date(d) {
                errors.push(message);
            }
        }

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        let amount = Amount::parse(amount).map_err(|e| ValidationErrors(vec![e.to_string()]))?;

        Ok(Self {
            amount,
            category: category.trim().to_string(),
            description: description.trim().to_string(),
            date: date.map(str::to_string),
        })
    }

    /// Turn the input into a stored record
    pub fn into_expense(self) -> Expense {
        Expense::new(self.amount, &self.category, &self.description, self.date)
    }
}

/// Check the amount, category and description of a would-be expense
///
/// Returns human-readable messages; an empty list means the input is valid.
pub fn validate_expense(amount: &str, category: &str, description: &str) -> Vec<String> {
    let mut errors = Vec::new();

    match Amount::parse(amount) {
        Ok(value) if !value.is_positive() => errors.push("Amount must be positive".to_string()),
        Ok(_) => {}
        Err(_) => errors.push("Amount must be a valid number".to_string()),
    }

    if category.trim().is_empty() {
        errors.push("Category is required".to_string());
    }

    if description.trim().is_empty() {
        errors.push("Description is required".to_string());
    }

    errors
}

/// Check that a date is a real calendar day written as `YYYY-MM-DD`
pub fn validate_date(date: &str) -> Option<String> {
    let fixed_width = date.len() == 10;
    if fixed_width && NaiveDate::parse_from_str(date, DATE_FORMAT).is_ok() {
        None
    } else {
        Some("Date must be in YYYY-MM-DD format".to_string())
    }
}

/// Today's local date as `YYYY-MM-DD`
pub fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// The current local time
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Accept ISO 8601 timestamps with or without fractional seconds or offset,
/// or a bare date (midnight)
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(parse_timestamp(&raw).unwrap_or_else(|| {
        warn!(created_at = %raw, "Unreadable created_at, using the epoch");
        NaiveDateTime::default()
    }))
}

/// A list of validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for ValidationErrors {
    fn from(messages: Vec<String>) -> Self {
        Self(messages)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestamp(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn test_new_expense_trims_and_defaults_date() {
        let expense = Expense::new(Amount::new(12.0), "  Food ", " Lunch  ", None);

        assert_eq!(expense.category, "Food");
        assert_eq!(expense.description, "Lunch");
        assert_eq!(expense.date, today());
        assert_eq!(expense.id.as_str().len(), 8);
    }

    #[test]
    fn test_new_expense_keeps_given_date() {
        let expense = Expense::new(Amount::new(1.0), "Food", "Snack", Some("2024-01-15".into()));
        assert_eq!(expense.date, "2024-01-15");
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let errors = validate_expense("abc", "  ", "");
        assert_eq!(
            errors,
            vec![
                "Amount must be a valid number",
                "Category is required",
                "Description is required"
            ]
        );
    }

    #[test]
    fn test_validate_non_positive_amount() {
        assert_eq!(validate_expense("0", "Food", "Lunch"), vec!["Amount must be positive"]);
        assert_eq!(validate_expense("-5", "Food", "Lunch"), vec!["Amount must be positive"]);
        assert!(validate_expense("50", "Food", "Lunch").is_empty());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-01-15").is_none());
        assert!(validate_date("2024-02-30").is_some());
        assert!(validate_date("2024-1-5").is_some());
        assert!(validate_date("15/01/2024").is_some());
    }

    #[test]
    fn test_new_expense_parse() {
        let input = NewExpense::parse("50", " Food ", "Lunch", Some("")).unwrap();
        assert_eq!(input.amount.value(), 50.0);
        assert_eq!(input.category, "Food");
        assert_eq!(input.date, None);

        let expense = input.into_expense();
        assert_eq!(expense.date, today());
    }

    #[test]
    fn test_new_expense_parse_reports_bad_date() {
        let errors = NewExpense::parse("-1", "Food", "Lunch", Some("yesterday")).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.messages()[1], "Date must be in YYYY-MM-DD format");
    }

    #[test]
    fn test_category_match_ignores_case() {
        let expense = Expense::new(Amount::new(1.0), "Food", "Snack", None);
        assert!(expense.in_category("food"));
        assert!(expense.in_category("FOOD"));
        assert!(!expense.in_category("Foo"));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let expense = Expense::new(Amount::new(1.0), "Food", "Snack", Some("2024-01-31".into()));
        assert!(expense.in_date_range("2024-01-01", "2024-01-31"));
        assert!(expense.in_date_range("2024-01-31", "2024-01-31"));
        assert!(!expense.in_date_range("2024-02-01", "2024-02-28"));
    }

    #[test]
    fn test_serialization_field_names() {
        let expense = Expense::from_parts(
            ExpenseId::from("abcd1234"),
            Amount::new(50.0),
            "Food",
            "Lunch",
            "2024-01-15",
            timestamp("2024-01-15T12:30:00"),
        );

        let value = serde_json::to_value(&expense).unwrap();
        assert_eq!(value["id"], "abcd1234");
        assert_eq!(value["amount"], 50.0);
        assert_eq!(value["category"], "Food");
        assert_eq!(value["date"], "2024-01-15");
        assert_eq!(value["created_at"], "2024-01-15T12:30:00");

        let back: Expense = serde_json::from_value(value).unwrap();
        assert_eq!(back, expense);
    }

    #[test]
    fn test_deserialize_fractional_timestamp() {
        let json = r#"{
            "id": "1a2b3c4d",
            "amount": 12.5,
            "category": "Travel",
            "description": "Bus",
            "date": "2024-03-01",
            "created_at": "2024-03-01T08:15:30.123456"
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.amount.value(), 12.5);
        assert_eq!(expense.created_at.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-15T12:30:00").is_some());
        assert!(parse_timestamp("2024-01-15 12:30:00.5").is_some());
        assert!(parse_timestamp("2024-01-15T12:30:00+02:00").is_some());
        assert!(parse_timestamp("2024-01-15").is_some());
        assert!(parse_timestamp("last tuesday").is_none());
    }

    #[test]
    fn test_deserialize_odd_created_at() {
        let json = r#"{"id":"a1","amount":5.0,"category":"Food","description":"Tea","date":"2024-01-15","created_at":""}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.created_at, NaiveDateTime::default());
        assert_eq!(expense.description, "Tea");

        let json = r#"{"id":"a2","amount":5.0,"category":"Food","description":"Tea","date":"2024-01-15"}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.created_at, NaiveDateTime::default());
    }

    #[test]
    fn test_deserialize_keeps_fractional_created_at() {
        let json = r#"{"id":"a1","amount":5.0,"category":"Food","description":"Tea","date":"2024-01-15","created_at":"2024-01-15T12:30:00.123456"}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.created_at.format("%H:%M:%S").to_string(), "12:30:00");
    }
}

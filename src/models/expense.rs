//! Expense model
//!
//! A single tracked financial transaction with a category, a calendar date,
//! free-text description and an ordered list of tags.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// A single expense record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier, assigned by the store's allocator
    pub id: ExpenseId,

    /// Amount spent (no sign constraint)
    pub amount: Money,

    /// Free-text category label
    pub category: String,

    /// Calendar date of the expense
    pub date: NaiveDate,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Ordered tags, duplicates permitted
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Expense {
    /// Create a new expense with an already-allocated ID
    pub fn new(
        id: ExpenseId,
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id,
            amount,
            category: category.into(),
            date,
            description: description.into(),
            tags,
        }
    }

    /// Case-insensitive category comparison, ignoring surrounding whitespace
    pub fn category_matches(&self, needle: &str) -> bool {
        category_key(&self.category) == category_key(needle)
    }

    /// Case-insensitive tag membership test
    pub fn has_tag(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == needle)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {} '{}'",
            self.id,
            self.date.format("%Y-%m-%d"),
            self.amount,
            self.category,
            self.description
        )?;
        if !self.tags.is_empty() {
            write!(f, " [{}]", self.tags.join(", "))?;
        }
        Ok(())
    }
}

/// A partial update: only the fields that are `Some` get applied
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub amount: Option<Money>,
    pub category: Option<String>,
    /// Raw date text, parsed when the update is applied
    pub date: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ExpenseUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Whether no field was supplied
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.tags.is_none()
    }
}

/// Error returned when date text is not a valid `YYYY-MM-DD` date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError(pub String);

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid date '{}': use YYYY-MM-DD format", self.0)
    }
}

impl std::error::Error for DateParseError {}

/// Parse `YYYY-MM-DD`, also accepting an ISO instant (`YYYY-MM-DDTHH:MM:SS`)
/// whose time-of-day is dropped
pub fn parse_date(s: &str) -> Result<NaiveDate, DateParseError> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    Err(DateParseError(s.to_string()))
}

/// Key under which categories compare equal: trimmed and lowercased
///
/// Filtering, aggregation and budget lookup all go through this key, so
/// "Food", "food " and " FOOD" are one category.
pub fn category_key(category: &str) -> String {
    category.trim().to_lowercase()
}

/// Split comma-separated tag input, trimming and dropping blanks
pub fn parse_tag_list(s: &str) -> Vec<String> {
    normalize_tags(s.split(','))
}

/// Trim each tag and drop blank ones
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Expense {
        Expense::new(
            ExpenseId::new(1),
            Money::from_cents(1250),
            "Food",
            NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
            "Lunch at cafe",
            vec!["lunch".into(), "Work".into()],
        )
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();
        assert_eq!(parse_date("2025-10-20").unwrap(), expected);
        assert_eq!(parse_date(" 2025-10-20 ").unwrap(), expected);
        assert_eq!(parse_date("2025-10-20T00:00:00").unwrap(), expected);
        assert_eq!(parse_date("2025-10-20T13:45:10.250").unwrap(), expected);
    }

    #[test]
    fn test_parse_date_rejects_malformed() {
        assert!(parse_date("20-10-2025").is_err());
        assert!(parse_date("2025-13-01").is_err());
        assert!(parse_date("2025/10/20").is_err());
        assert!(parse_date("yesterday").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_category_matches() {
        let e = sample();
        assert!(e.category_matches("food"));
        assert!(e.category_matches("  FOOD "));
        assert!(!e.category_matches("Foodie"));
    }

    #[test]
    fn test_category_key() {
        assert_eq!(category_key(" Food "), "food");
        assert_eq!(category_key("FOOD"), category_key("food"));
        assert_ne!(category_key("Foodie"), category_key("Food"));

        let mut padded = sample();
        padded.category = " food ".into();
        assert!(padded.category_matches("FOOD"));
    }

    #[test]
    fn test_normalize_tags() {
        let tags = normalize_tags(vec!["", " lunch ", "  ", "work"]);
        assert_eq!(tags, vec!["lunch", "work"]);
        assert!(normalize_tags(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_has_tag() {
        let e = sample();
        assert!(e.has_tag("work"));
        assert!(e.has_tag(" LUNCH"));
        assert!(!e.has_tag("travel"));
    }

    #[test]
    fn test_display() {
        let e = sample();
        assert_eq!(
            e.to_string(),
            "#1 2025-10-20 $12.50 Food 'Lunch at cafe' [lunch, Work]"
        );
    }

    #[test]
    fn test_parse_tag_list() {
        assert_eq!(parse_tag_list("work, travel,,  "), vec!["work", "travel"]);
        assert!(parse_tag_list("").is_empty());
    }

    #[test]
    fn test_update_builder() {
        assert!(ExpenseUpdate::new().is_empty());
        let update = ExpenseUpdate::new().category("Transport").tags(vec![]);
        assert!(!update.is_empty());
        assert_eq!(update.category.as_deref(), Some("Transport"));
        assert_eq!(update.tags, Some(vec![]));
    }
}

//! Record codec for the flat CSV format
//!
//! Converts between [`Expense`] and [`ExpenseRow`], the all-strings row that
//! is written to `expenses.csv`. CSV has no list type, so tags are joined
//! with [`TAG_SEPARATOR`].

use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{parse_date, Expense, ExpenseId, Money};

/// Separator used to join tags into a single CSV field
pub const TAG_SEPARATOR: &str = "|";

/// Column order of the persisted file
pub const COLUMNS: [&str; 6] = ["id", "amount", "category", "date", "description", "tags"];

/// One persisted row; field order matches [`COLUMNS`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub id: String,
    pub amount: String,
    pub category: String,
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub tags: String,
}

/// Encode a record into its flat row
pub fn encode(expense: &Expense) -> ExpenseRow {
    ExpenseRow {
        id: expense.id.to_string(),
        amount: expense.amount.to_plain_string(),
        category: expense.category.clone(),
        date: expense.date.format("%Y-%m-%d").to_string(),
        description: expense.description.clone(),
        tags: join_tags(&expense.tags),
    }
}

/// Decode a flat row back into a record
pub fn decode(row: &ExpenseRow) -> TrackerResult<Expense> {
    let id: u64 = row
        .id
        .trim()
        .parse()
        .map_err(|_| TrackerError::Format(format!("id '{}' is not an integer", row.id)))?;
    if id == 0 {
        return Err(TrackerError::Format("id must be positive".into()));
    }

    let amount = Money::parse(&row.amount)
        .map_err(|e| TrackerError::Format(format!("amount '{}': {}", row.amount, e)))?;

    let date = parse_date(&row.date)
        .map_err(|_| TrackerError::Format(format!("date '{}' does not parse", row.date)))?;

    Ok(Expense::new(
        ExpenseId::new(id),
        amount,
        row.category.clone(),
        date,
        row.description.clone(),
        split_tags(&row.tags),
    ))
}

/// Join tags into one field
pub fn join_tags(tags: &[String]) -> String {
    tags.join(TAG_SEPARATOR)
}

/// Split a tag field; an empty field is an empty list, not `[""]`
pub fn split_tags(field: &str) -> Vec<String> {
    if field.is_empty() {
        Vec::new()
    } else {
        field.split(TAG_SEPARATOR).map(String::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn lunch() -> Expense {
        Expense::new(
            ExpenseId::new(1),
            Money::from_cents(1250),
            "Food",
            NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
            "Lunch at cafe",
            vec!["lunch".into(), "work".into()],
        )
    }

    fn row(id: &str, amount: &str, date: &str, tags: &str) -> ExpenseRow {
        ExpenseRow {
            id: id.into(),
            amount: amount.into(),
            category: "Food".into(),
            date: date.into(),
            description: "desc".into(),
            tags: tags.into(),
        }
    }

    #[test]
    fn test_encode() {
        let encoded = encode(&lunch());
        assert_eq!(encoded.id, "1");
        assert_eq!(encoded.amount, "12.50");
        assert_eq!(encoded.date, "2025-10-20");
        assert_eq!(encoded.tags, "lunch|work");
    }

    #[test]
    fn test_round_trip() {
        let expense = lunch();
        assert_eq!(decode(&encode(&expense)).unwrap(), expense);
    }

    #[test]
    fn test_empty_tags_round_trip() {
        let mut expense = lunch();
        expense.tags = Vec::new();

        let encoded = encode(&expense);
        assert_eq!(encoded.tags, "");

        let decoded = decode(&encoded).unwrap();
        assert!(decoded.tags.is_empty());
        assert_eq!(decoded, expense);
    }

    #[test]
    fn test_duplicate_tags_preserved() {
        let mut expense = lunch();
        expense.tags = vec!["a".into(), "b".into(), "a".into()];
        assert_eq!(decode(&encode(&expense)).unwrap().tags, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_decode_legacy_forms() {
        // Float amounts and ISO instants, as older files wrote them
        let decoded = decode(&row("4", "8.5", "2025-10-23T00:00:00", "coffee")).unwrap();
        assert_eq!(decoded.amount, Money::from_cents(850));
        assert_eq!(decoded.date, NaiveDate::from_ymd_opt(2025, 10, 23).unwrap());
    }

    #[test]
    fn test_decode_failures() {
        assert!(decode(&row("x", "1.00", "2025-10-20", "")).unwrap_err().is_format());
        assert!(decode(&row("0", "1.00", "2025-10-20", "")).unwrap_err().is_format());
        assert!(decode(&row("1", "lots", "2025-10-20", "")).unwrap_err().is_format());
        assert!(decode(&row("1", "1.00", "20/10/2025", "")).unwrap_err().is_format());
    }

    #[test]
    fn test_decode_rejects_lossy_amounts() {
        // Extra precision is an error, not a silent truncation to 12.99
        assert!(decode(&row("1", "12.999", "2025-10-20", "")).unwrap_err().is_format());
        assert!(decode(&row("1", "90000000000000000", "2025-10-20", "")).unwrap_err().is_format());
    }
}

//! In-memory expense store
//!
//! The authoritative collection of expenses. Owns the ID allocator so that
//! IDs stay unique across creates, deletes and reloads. Readers get clones;
//! writers go through the ID-qualified mutators.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{normalize_tags, parse_date, Expense, ExpenseId, ExpenseUpdate, IdAllocator, Money};

use super::codec::{self, ExpenseRow};

/// The in-memory expense collection, in insertion order
#[derive(Debug, Clone, Default)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    ids: IdAllocator,
}

impl ExpenseStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new expense and append it
    ///
    /// Fails with a validation error if `date_text` is not a date or the ID
    /// space is used up; nothing is allocated or appended in that case. Tags
    /// are trimmed and blank ones dropped, so the record survives a CSV
    /// round trip unchanged.
    pub fn create(
        &mut self,
        amount: Money,
        category: impl Into<String>,
        date_text: &str,
        description: impl Into<String>,
        tags: Vec<String>,
    ) -> TrackerResult<Expense> {
        let date = parse_date(date_text).map_err(|e| TrackerError::Validation(e.to_string()))?;
        let id = self
            .ids
            .next_id()
            .ok_or_else(|| TrackerError::Validation("expense ID space exhausted".into()))?;

        let expense = Expense::new(
            id,
            amount,
            category,
            date,
            description,
            normalize_tags(tags),
        );
        self.expenses.push(expense.clone());
        debug!(id = %expense.id, "created expense");

        Ok(expense)
    }

    /// Look up an expense by ID
    pub fn get(&self, id: ExpenseId) -> Option<Expense> {
        self.expenses.iter().find(|e| e.id == id).cloned()
    }

    /// Apply the supplied fields of `update` to an existing expense
    ///
    /// Returns false if the ID doesn't exist or the supplied date doesn't
    /// parse. In both cases the record is left untouched.
    pub fn update(&mut self, id: ExpenseId, update: ExpenseUpdate) -> bool {
        let Some(expense) = self.expenses.iter_mut().find(|e| e.id == id) else {
            return false;
        };

        // Parse first so a bad date can't leave a half-applied update
        let date = match update.date.as_deref().map(parse_date).transpose() {
            Ok(date) => date,
            Err(e) => {
                warn!(id = %id, "{}", e);
                return false;
            }
        };

        if let Some(amount) = update.amount {
            expense.amount = amount;
        }
        if let Some(category) = update.category {
            expense.category = category;
        }
        if let Some(date) = date {
            expense.date = date;
        }
        if let Some(description) = update.description {
            expense.description = description;
        }
        if let Some(tags) = update.tags {
            expense.tags = normalize_tags(tags);
        }

        true
    }

    /// Remove an expense; false (and no change) if the ID doesn't exist
    pub fn delete(&mut self, id: ExpenseId) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        self.expenses.len() < before
    }

    /// Filter by category and/or tag
    ///
    /// Both matches are case-insensitive on trimmed input. Blank arguments
    /// count as omitted; when both are given both must hold.
    pub fn filter(&self, category: Option<&str>, tag: Option<&str>) -> Vec<Expense> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        let tag = tag.map(str::trim).filter(|t| !t.is_empty());

        self.expenses
            .iter()
            .filter(|e| category.map_or(true, |c| e.category_matches(c)))
            .filter(|e| tag.map_or(true, |t| e.has_tag(t)))
            .cloned()
            .collect()
    }

    /// All expenses in insertion order
    pub fn list_all(&self) -> Vec<Expense> {
        self.expenses.clone()
    }

    /// Borrow the collection without cloning (for aggregation)
    pub fn as_slice(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// The ID the next `create` will assign, if any are left
    pub fn next_id(&self) -> Option<ExpenseId> {
        self.ids.peek()
    }

    /// Replace the whole collection with decoded rows
    ///
    /// Rows that fail to decode, or repeat an ID already loaded, are skipped
    /// with a warning. The allocator is reset to one past the highest loaded
    /// ID. Returns the number of records loaded.
    pub fn bulk_load<I>(&mut self, rows: I) -> usize
    where
        I: IntoIterator<Item = ExpenseRow>,
    {
        // Header is line 1
        self.bulk_load_numbered(
            rows.into_iter()
                .enumerate()
                .map(|(index, row)| (index as u64 + 2, row)),
        )
    }

    /// Like [`ExpenseStore::bulk_load`], with each row paired with its line
    /// in the source file for warnings
    pub fn bulk_load_numbered<I>(&mut self, rows: I) -> usize
    where
        I: IntoIterator<Item = (u64, ExpenseRow)>,
    {
        let mut loaded = Vec::new();
        let mut seen = HashSet::new();
        let mut max_id = 0;

        for (line, row) in rows {
            let expense = match codec::decode(&row) {
                Ok(expense) => expense,
                Err(e) => {
                    warn!(line, "skipping malformed row: {}", e);
                    continue;
                }
            };

            if !seen.insert(expense.id) {
                warn!(line, id = %expense.id, "skipping row with duplicate id");
                continue;
            }

            max_id = max_id.max(expense.id.get());
            loaded.push(expense);
        }

        self.expenses = loaded;
        self.ids.reset_to(max_id);
        self.expenses.len()
    }

    /// Encode every expense, in order, for persistence
    pub fn bulk_save(&self) -> Vec<ExpenseRow> {
        self.expenses.iter().map(codec::encode).collect()
    }
}

//! Expense service
//!
//! Business logic on top of the expense store: every mutation is saved to
//! disk right away and recorded in the audit log.

use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{parse_date, Expense, ExpenseId, ExpenseUpdate, Money};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a mut Storage,
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Case-insensitive category match
    pub category: Option<String>,
    /// Case-insensitive tag membership
    pub tag: Option<String>,
}

impl ExpenseFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub amount: Money,
    pub category: String,
    /// Date text, `YYYY-MM-DD`
    pub date: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// The demo records seeded by `init`
const SAMPLE_EXPENSES: [(i64, &str, &str, &str, [&str; 2]); 5] = [
    (1250, "Food", "2025-10-20", "Lunch at cafe", ["lunch", "work"]),
    (4500, "Transport", "2025-10-21", "Gas for car", ["car", "fuel"]),
    (2599, "Entertainment", "2025-10-22", "Movie tickets", ["movies", "weekend"]),
    (875, "Food", "2025-10-23", "Coffee and pastry", ["coffee", "morning"]),
    (12000, "Utilities", "2025-10-24", "Electric bill", ["bills", "monthly"]),
];

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Create and persist a new expense
    pub fn create(&mut self, input: CreateExpenseInput) -> TrackerResult<Expense> {
        let expense = self.storage.expenses.store_mut().create(
            input.amount,
            input.category.trim(),
            &input.date,
            input.description,
            input.tags,
        )?;

        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Option<Expense> {
        self.storage.expenses.store().get(id)
    }

    /// Get an expense by ID, or a not-found error
    pub fn find(&self, id: ExpenseId) -> TrackerResult<Expense> {
        self.get(id)
            .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))
    }

    /// All expenses in insertion order
    pub fn list(&self) -> Vec<Expense> {
        self.storage.expenses.store().list_all()
    }

    /// Expenses matching the filter
    pub fn filter(&self, filter: &ExpenseFilter) -> Vec<Expense> {
        self.storage
            .expenses
            .store()
            .filter(filter.category.as_deref(), filter.tag.as_deref())
    }

    /// Number of expenses
    pub fn count(&self) -> usize {
        self.storage.expenses.store().len()
    }

    /// Apply a partial update and persist it
    pub fn update(&mut self, id: ExpenseId, update: ExpenseUpdate) -> TrackerResult<Expense> {
        let before = self.find(id)?;

        if let Some(date) = update.date.as_deref() {
            parse_date(date).map_err(|e| TrackerError::Validation(e.to_string()))?;
        }

        if !self.storage.expenses.store_mut().update(id, update) {
            return Err(TrackerError::expense_not_found(id.to_string()));
        }

        let after = self.find(id)?;
        self.storage.expenses.save()?;

        if before != after {
            self.storage.log_update(
                EntityType::Expense,
                id.to_string(),
                Some(after.description.clone()),
                &before,
                &after,
            )?;
        }

        Ok(after)
    }

    /// Delete an expense and persist the removal
    pub fn delete(&mut self, id: ExpenseId) -> TrackerResult<Expense> {
        let expense = self.find(id)?;

        self.storage.expenses.store_mut().delete(id);
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// Seed the demo expenses if the store is empty
    ///
    /// Returns the number of expenses added (zero when data already exists).
    pub fn seed_sample_data(&mut self) -> TrackerResult<usize> {
        if self.count() > 0 {
            return Ok(0);
        }

        for (cents, category, date, description, tags) in SAMPLE_EXPENSES {
            self.create(CreateExpenseInput {
                amount: Money::from_cents(cents),
                category: category.to_string(),
                date: date.to_string(),
                description: description.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
            })?;
        }

        Ok(SAMPLE_EXPENSES.len())
    }
}

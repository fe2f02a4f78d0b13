//! Budget service
//!
//! Reads and writes the budget ledger and compares it against recorded
//! spend. The ledger file is read fresh on every call, so hand edits to
//! `budgets.json` are picked up without a restart.

use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{BudgetLedger, Money};
use crate::services::aggregation::{budget_status, AggregationStrategy, BudgetStatusReport};
use crate::storage::Storage;

const LEDGER_ENTITY_ID: &str = "ledger";

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The whole ledger; the default limits if none was ever saved
    pub fn get_all(&self) -> TrackerResult<BudgetLedger> {
        self.storage.budgets.load()
    }

    /// Replace the whole ledger
    ///
    /// Categories absent from `ledger` lose their budget.
    pub fn replace_all(&self, ledger: BudgetLedger) -> TrackerResult<BudgetLedger> {
        let before = self.get_all()?;
        self.persist(&before, ledger)
    }

    /// Set or change one category's limit, keeping the others
    pub fn set_limit(&self, category: &str, limit: Money) -> TrackerResult<BudgetLedger> {
        let category = category.trim();
        if category.is_empty() {
            return Err(TrackerError::Validation(
                "Budget category cannot be empty".into(),
            ));
        }

        let before = self.get_all()?;
        let mut after = before.clone();
        after.set(category, limit);
        self.persist(&before, after)
    }

    /// Drop one category's limit
    pub fn remove_limit(&self, category: &str) -> TrackerResult<BudgetLedger> {
        let before = self.get_all()?;
        let mut after = before.clone();
        if after.remove(category.trim()).is_none() {
            return Err(TrackerError::budget_not_found(category.trim()));
        }
        self.persist(&before, after)
    }

    /// Budget vs. spend for every budgeted category
    pub fn status(&self, strategy: AggregationStrategy) -> TrackerResult<BudgetStatusReport> {
        let budgets = self.get_all()?;
        let aggregator = strategy.aggregator();
        Ok(budget_status(
            self.storage.expenses.store().as_slice(),
            &budgets,
            aggregator.as_ref(),
        ))
    }

    fn persist(&self, before: &BudgetLedger, after: BudgetLedger) -> TrackerResult<BudgetLedger> {
        self.storage.budgets.save(&after)?;

        if before != &after {
            self.storage.log_update(
                EntityType::Budgets,
                LEDGER_ENTITY_ID,
                None,
                before,
                &after,
            )?;
        }

        Ok(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use crate::services::aggregation::BudgetState;
    use crate::services::expense::ExpenseService;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_defaults_before_first_save() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let ledger = service.get_all().unwrap();
        assert_eq!(ledger, BudgetLedger::defaults());
        assert!(!storage.budgets.exists());
    }

    #[test]
    fn test_replace_all_is_wholesale() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let mut ledger = BudgetLedger::new();
        ledger.set("Travel", Money::from_cents(40_000));
        service.replace_all(ledger).unwrap();

        let loaded = service.get_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("Food"), None);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_type, EntityType::Budgets);
    }

    #[test]
    fn test_set_and_remove_limit() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let ledger = service.set_limit(" Food ", Money::from_cents(12_345)).unwrap();
        assert_eq!(ledger.get("Food"), Some(Money::from_cents(12_345)));
        assert_eq!(ledger.len(), 6);

        let ledger = service.remove_limit("Shopping").unwrap();
        assert_eq!(ledger.len(), 5);
        assert!(service.remove_limit("Shopping").unwrap_err().is_not_found());
        assert!(service.set_limit("  ", Money::zero()).unwrap_err().is_validation());
    }

    #[test]
    fn test_status_against_saved_expenses() {
        let (_temp_dir, mut storage) = create_test_storage();
        ExpenseService::new(&mut storage).seed_sample_data().unwrap();

        let service = BudgetService::new(&storage);
        service.set_limit("Utilities", Money::from_cents(10_000)).unwrap();

        for strategy in [AggregationStrategy::Iterative, AggregationStrategy::Columnar] {
            let report = service.status(strategy).unwrap();
            assert_eq!(report.total_budgets, 6);
            assert_eq!(report.over_budget_count, 1);

            let utilities = report.get("Utilities").unwrap();
            assert_eq!(utilities.remaining, Money::from_cents(-2000));
            assert_eq!(utilities.status, BudgetState::OverBudget);

            let food = report.get("Food").unwrap();
            assert_eq!(food.spent, Money::from_cents(2125));
            assert_eq!(food.remaining, Money::from_cents(7875));
        }
    }

    #[test]
    fn test_status_empty_store() {
        let (_temp_dir, storage) = create_test_storage();
        let report = BudgetService::new(&storage)
            .status(AggregationStrategy::default())
            .unwrap();
        assert_eq!(report.total_budgets, 0);
        assert!(report.budgets.is_empty());
    }
}

//! Budget repository for JSON storage
//!
//! Manages loading and saving the budget ledger to budgets.json. The file is
//! independent of the expense file and is always rewritten wholesale.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::TrackerError;
use crate::models::BudgetLedger;

use super::file_io::{read_json_optional, write_json_atomic};

/// Repository for budget ledger persistence
pub struct BudgetRepository {
    path: PathBuf,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the JSON file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a budget file has been written yet
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the persisted ledger, or the default limits if there is no file
    pub fn load(&self) -> Result<BudgetLedger, TrackerError> {
        match read_json_optional(&self.path)? {
            Some(ledger) => Ok(ledger),
            None => {
                info!(path = %self.path.display(), "no budget file yet, using default budgets");
                Ok(BudgetLedger::defaults())
            }
        }
    }

    /// Overwrite the persisted ledger
    pub fn save(&self, ledger: &BudgetLedger) -> Result<(), TrackerError> {
        write_json_atomic(&self.path, ledger).map_err(|e| {
            error!(path = %self.path.display(), "failed to save budgets: {}", e);
            e
        })?;
        info!(count = ledger.len(), path = %self.path.display(), "saved budgets");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(!repo.exists());
        assert_eq!(repo.load().unwrap(), BudgetLedger::defaults());
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let (_temp_dir, repo) = create_test_repo();

        repo.save(&BudgetLedger::defaults()).unwrap();

        let mut ledger = BudgetLedger::new();
        ledger.set("Travel", Money::from_cents(50_000));
        repo.save(&ledger).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("Travel"), Some(Money::from_cents(50_000)));
        assert_eq!(loaded.get("Food"), None);
    }

    #[test]
    fn test_empty_ledger_is_not_replaced_by_defaults() {
        let (_temp_dir, repo) = create_test_repo();
        repo.save(&BudgetLedger::new()).unwrap();
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_reads_hand_edited_file() {
        let (temp_dir, repo) = create_test_repo();
        fs::write(
            temp_dir.path().join("budgets.json"),
            r#"{"Food": 150.00, "Transport": 300}"#,
        )
        .unwrap();

        let ledger = repo.load().unwrap();
        assert_eq!(ledger.get("Food"), Some(Money::from_cents(15_000)));
        assert_eq!(ledger.get("Transport"), Some(Money::from_cents(30_000)));
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let (temp_dir, repo) = create_test_repo();
        fs::write(temp_dir.path().join("budgets.json"), "{ nope").unwrap();
        assert!(repo.load().is_err());
    }
}

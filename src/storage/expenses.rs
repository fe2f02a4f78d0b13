//! Expense repository for CSV storage
//!
//! Couples the in-memory [`ExpenseStore`] with `expenses.csv`. Loading
//! replaces the whole collection; saving rewrites the whole file.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::TrackerError;

use super::codec::{ExpenseRow, COLUMNS};
use super::file_io::{read_csv_rows, write_csv_atomic};
use super::store::ExpenseStore;

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    store: ExpenseStore,
}

impl ExpenseRepository {
    /// Create a repository backed by `path`, starting with an empty store
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            store: ExpenseStore::new(),
        }
    }

    /// Path of the CSV file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file and replace the in-memory collection
    ///
    /// A missing file is treated as an empty prior state. Returns the
    /// number of expenses loaded.
    pub fn load(&mut self) -> Result<usize, TrackerError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no expense file yet, starting empty");
        }

        let rows: Vec<(u64, ExpenseRow)> = read_csv_rows(&self.path)?;
        let count = self.store.bulk_load_numbered(rows);
        info!(count, path = %self.path.display(), "loaded expenses");
        Ok(count)
    }

    /// Rewrite the file from the in-memory collection
    ///
    /// On failure the in-memory state is untouched, so the caller can retry.
    pub fn save(&self) -> Result<(), TrackerError> {
        let rows = self.store.bulk_save();
        write_csv_atomic(&self.path, &COLUMNS, &rows).map_err(|e| {
            error!(path = %self.path.display(), "failed to save expenses: {}", e);
            e
        })?;
        info!(count = rows.len(), path = %self.path.display(), "saved expenses");
        Ok(())
    }

    /// Read-only access to the store
    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    /// Mutable access to the store
    pub fn store_mut(&mut self) -> &mut ExpenseStore {
        &mut self.store
    }
}

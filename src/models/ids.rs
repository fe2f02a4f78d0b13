//! Expense identifiers and the allocator that hands them out
//!
//! IDs are plain positive integers (they appear verbatim in the CSV file and
//! on the command line), wrapped in a newtype so they can't be mixed up with
//! counts or amounts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a single expense record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(u64);

impl ExpenseId {
    /// Wrap a raw integer ID
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw integer value
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ExpenseId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for ExpenseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept a leading '#', the way IDs are shown in listings
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}

/// Hands out strictly increasing expense IDs starting at 1
///
/// Owned by the expense store. The counter only moves backwards through
/// [`IdAllocator::reset_to`], which is called right after a bulk load.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    /// Create an allocator whose first ID will be 1
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Allocate the next ID, or `None` once `u64::MAX` has been handed out
    pub fn next_id(&mut self) -> Option<ExpenseId> {
        let next = self.last.checked_add(1)?;
        self.last = next;
        Some(ExpenseId(next))
    }

    /// Set the counter so the next allocation returns `n + 1`
    pub fn reset_to(&mut self, n: u64) {
        self.last = n;
    }

    /// The ID the next call to `next_id` will return, without allocating it
    pub fn peek(&self) -> Option<ExpenseId> {
        self.last.checked_add(1).map(ExpenseId)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

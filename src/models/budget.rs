//! Budget ledger model
//!
//! Maps a category name to its spending limit. The ledger is persisted as a
//! flat JSON object of dollar amounts (`{"Food": 100.0}`) so it stays
//! editable by hand.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::money::Money;

/// Limits applied when no budget file exists yet
pub const DEFAULT_BUDGETS: [(&str, i64); 6] = [
    ("Food", 10_000),
    ("Transport", 20_000),
    ("Entertainment", 15_000),
    ("Utilities", 30_000),
    ("Shopping", 20_000),
    ("Other", 25_000),
];

/// Per-category spending limits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct BudgetLedger {
    limits: BTreeMap<String, Money>,
}

impl BudgetLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in default limits
    pub fn defaults() -> Self {
        DEFAULT_BUDGETS
            .iter()
            .map(|(category, cents)| (category.to_string(), Money::from_cents(*cents)))
            .collect()
    }

    /// Limit for a category (exact name)
    pub fn get(&self, category: &str) -> Option<Money> {
        self.limits.get(category).copied()
    }

    /// Set or replace the limit for a category
    pub fn set(&mut self, category: impl Into<String>, limit: Money) {
        self.limits.insert(category.into(), limit);
    }

    /// Remove a category's limit, returning it if present
    pub fn remove(&mut self, category: &str) -> Option<Money> {
        self.limits.remove(category)
    }

    /// Iterate over `(category, limit)` pairs in category order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.limits.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    /// Sum of all limits
    pub fn total(&self) -> Money {
        self.limits.values().copied().sum()
    }
}

impl FromIterator<(String, Money)> for BudgetLedger {
    fn from_iter<I: IntoIterator<Item = (String, Money)>>(iter: I) -> Self {
        Self {
            limits: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, f64>> for BudgetLedger {
    fn from(raw: BTreeMap<String, f64>) -> Self {
        raw.into_iter()
            .map(|(category, dollars)| (category, Money::from_f64(dollars)))
            .collect()
    }
}

impl From<BudgetLedger> for BTreeMap<String, f64> {
    fn from(ledger: BudgetLedger) -> Self {
        ledger
            .limits
            .into_iter()
            .map(|(category, limit)| (category, limit.to_f64()))
            .collect()
    }
}

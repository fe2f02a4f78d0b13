//! Spending summary
//!
//! Per-category totals over every recorded expense.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::money::as_dollars;
use crate::models::{Expense, Money};
use crate::services::aggregation::{AggregationStrategy, SpendAggregator};
use crate::storage::Storage;

/// Spending by category plus grand totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpendingSummary {
    /// Total per exact category string, in category order
    #[serde(serialize_with = "as_dollars::map")]
    pub by_category: BTreeMap<String, Money>,
    #[serde(with = "as_dollars")]
    pub total: Money,
    pub expense_count: usize,
}

impl SpendingSummary {
    /// Summarize the expenses currently in storage
    pub fn generate(storage: &Storage, strategy: AggregationStrategy) -> Self {
        let aggregator = strategy.aggregator();
        Self::from_expenses(storage.expenses.store().as_slice(), aggregator.as_ref())
    }

    /// Summarize an arbitrary slice of expenses
    pub fn from_expenses(expenses: &[Expense], aggregator: &dyn SpendAggregator) -> Self {
        let by_category = aggregator.spend_by_category(expenses);
        Self {
            total: by_category.values().copied().sum(),
            by_category,
            expense_count: expenses.len(),
        }
    }

    /// Share of the total for one category, in percent
    pub fn percentage(&self, category: &str) -> f64 {
        match self.by_category.get(category) {
            Some(amount) if !self.total.is_zero() => {
                amount.cents() as f64 / self.total.cents() as f64 * 100.0
            }
            _ => 0.0,
        }
    }

    /// Categories ordered by spend, largest first
    pub fn top_categories(&self, limit: usize) -> Vec<(&str, Money)> {
        let mut rows: Vec<(&str, Money)> = self
            .by_category
            .iter()
            .map(|(category, amount)| (category.as_str(), *amount))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows.into_iter().take(limit).collect()
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Spending by Category\n");
        output.push_str(&"=".repeat(50));
        output.push('\n');

        if self.by_category.is_empty() {
            output.push_str("No expenses recorded.\n");
            return output;
        }

        output.push_str(&format!("{:<25} {:>14} {:>8}\n", "Category", "Amount", "%"));
        output.push_str(&"-".repeat(50));
        output.push('\n');

        for (category, amount) in self.top_categories(self.by_category.len()) {
            let label = if category.is_empty() { "(none)" } else { category };
            output.push_str(&format!(
                "{:<25} {:>14} {:>7.1}%\n",
                label,
                amount.format_with_symbol(currency),
                self.percentage(category)
            ));
        }

        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<25} {:>14}\n",
            format!("TOTAL ({} expenses)", self.expense_count),
            self.total.format_with_symbol(currency)
        ));

        output
    }
}

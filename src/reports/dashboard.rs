//! Dashboard report
//!
//! One view combining spend totals and budget status.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::TrackerResult;
use crate::models::money::as_dollars;
use crate::models::{BudgetLedger, Expense, Money};
use crate::services::aggregation::{
    budget_status, AggregationStrategy, BudgetState, BudgetStatusReport, SpendAggregator,
};
use crate::storage::Storage;

/// Totals, per-category spend and budget status together
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardReport {
    #[serde(with = "as_dollars")]
    pub total_spent: Money,
    pub expense_count: usize,
    #[serde(serialize_with = "as_dollars::map")]
    pub spending_by_category: BTreeMap<String, Money>,
    pub budget_status: BudgetStatusReport,
}

impl DashboardReport {
    /// Build the dashboard from storage
    pub fn generate(storage: &Storage, strategy: AggregationStrategy) -> TrackerResult<Self> {
        let budgets = storage.budgets.load()?;
        let aggregator = strategy.aggregator();
        Ok(Self::from_parts(
            storage.expenses.store().as_slice(),
            &budgets,
            aggregator.as_ref(),
        ))
    }

    /// Build the dashboard from in-memory data
    pub fn from_parts(
        expenses: &[Expense],
        budgets: &BudgetLedger,
        aggregator: &dyn SpendAggregator,
    ) -> Self {
        let spending_by_category = aggregator.spend_by_category(expenses);
        Self {
            total_spent: expenses.iter().map(|e| e.amount).sum(),
            expense_count: expenses.len(),
            spending_by_category,
            budget_status: budget_status(expenses, budgets, aggregator),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Expense Dashboard\n");
        output.push_str(&"=".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "Total Spent: {}\n",
            self.total_spent.format_with_symbol(currency)
        ));
        output.push_str(&format!("Expenses: {}\n", self.expense_count));

        if !self.spending_by_category.is_empty() {
            output.push_str("\nSpending by Category\n");
            output.push_str(&"-".repeat(70));
            output.push('\n');
            for (category, amount) in &self.spending_by_category {
                output.push_str(&format!(
                    "  {:<30} {:>14}\n",
                    category,
                    amount.format_with_symbol(currency)
                ));
            }
        }

        let status = &self.budget_status;
        if status.budgets.is_empty() {
            output.push_str("\nNo budget status to show.\n");
            return output;
        }

        output.push_str(&format!(
            "\nBudgets ({} of {} over)\n",
            status.over_budget_count, status.total_budgets
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "  {:<16} {:>12} {:>12} {:>12}  {}\n",
            "Category", "Budget", "Spent", "Remaining", "Status"
        ));
        for row in &status.budgets {
            let marker = match row.status {
                BudgetState::Good => "",
                BudgetState::OverBudget => " !",
            };
            output.push_str(&format!(
                "  {:<16} {:>12} {:>12} {:>12}  {}{}\n",
                row.category,
                row.budget.format_with_symbol(currency),
                row.spent.format_with_symbol(currency),
                row.remaining.format_with_symbol(currency),
                row.status,
                marker
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use crate::services::aggregation::ColumnarAggregator;
    use crate::services::{BudgetService, ExpenseService};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_dashboard_from_sample_data() {
        let (_temp_dir, mut storage) = create_test_storage();
        ExpenseService::new(&mut storage).seed_sample_data().unwrap();
        BudgetService::new(&storage)
            .set_limit("Food", Money::from_cents(2000))
            .unwrap();

        let report = DashboardReport::generate(&storage, AggregationStrategy::Columnar).unwrap();
        assert_eq!(report.total_spent, Money::from_cents(21_224));
        assert_eq!(report.expense_count, 5);
        assert_eq!(report.spending_by_category.len(), 4);
        assert_eq!(report.budget_status.over_budget_count, 1);
        assert_eq!(
            report.budget_status.get("Food").unwrap().remaining,
            Money::from_cents(-125)
        );

        let output = report.format_terminal("$");
        assert!(output.contains("Total Spent: $212.24"));
        assert!(output.contains("Over Budget !"));
        assert!(output.contains("1 of 6 over"));
    }

    #[test]
    fn test_empty_dashboard() {
        let report =
            DashboardReport::from_parts(&[], &BudgetLedger::defaults(), &ColumnarAggregator);
        assert_eq!(report.total_spent, Money::zero());
        assert_eq!(report.expense_count, 0);
        assert!(report.spending_by_category.is_empty());
        assert_eq!(report.budget_status.total_budgets, 0);
        assert!(report.format_terminal("$").contains("No budget status to show."));
    }

    #[test]
    fn test_json_shape() {
        let report =
            DashboardReport::from_parts(&[], &BudgetLedger::defaults(), &ColumnarAggregator);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_spent"], 0.0);
        assert_eq!(json["expense_count"], 0);
        assert_eq!(json["budget_status"]["total_budgets"], 0);
    }
}

//! Budget display formatting

use crate::models::BudgetLedger;
use crate::services::aggregation::{BudgetState, BudgetStatusReport};

/// Format the budget ledger as a list of limits
pub fn format_budget_list(ledger: &BudgetLedger, currency: &str) -> String {
    if ledger.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<20} {:>12}\n", "Category", "Limit"));
    output.push_str(&"-".repeat(33));
    output.push('\n');

    for (category, limit) in ledger.iter() {
        output.push_str(&format!(
            "{:<20} {:>12}\n",
            category,
            limit.format_with_symbol(currency)
        ));
    }

    output.push_str(&"-".repeat(33));
    output.push('\n');
    output.push_str(&format!(
        "{:<20} {:>12}\n",
        "Total",
        ledger.total().format_with_symbol(currency)
    ));
    output
}

/// Format a budget status report
pub fn format_budget_status(report: &BudgetStatusReport, currency: &str) -> String {
    if report.budgets.is_empty() {
        return "No budget status to show (no expenses or no budgets).\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<16} {:>12} {:>12} {:>12}  {}\n",
        "Category", "Budget", "Spent", "Remaining", "Status"
    ));
    output.push_str(&"-".repeat(68));
    output.push('\n');

    for row in &report.budgets {
        let status = match row.status {
            BudgetState::Good => "✓ Good".to_string(),
            BudgetState::OverBudget => format!("⚠ {}", row.status),
        };
        output.push_str(&format!(
            "{:<16} {:>12} {:>12} {:>12}  {}\n",
            row.category,
            row.budget.format_with_symbol(currency),
            row.spent.format_with_symbol(currency),
            row.remaining.format_with_symbol(currency),
            status
        ));
    }

    output.push_str(&format!(
        "\n{} of {} budget(s) over\n",
        report.over_budget_count, report.total_budgets
    ));

    let over: Vec<&str> = report.over_budget().map(|row| row.category.as_str()).collect();
    if !over.is_empty() {
        output.push_str(&format!("Over budget: {}\n", over.join(", ")));
    }
    output
}

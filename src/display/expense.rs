//! Expense display formatting

use crate::models::Expense;

/// Format a single expense as a table row
pub fn format_expense_row(expense: &Expense, currency: &str) -> String {
    format!(
        "{:>5} {} {:>12} {:14} {:28} {}",
        format!("#{}", expense.id),
        expense.date.format("%Y-%m-%d"),
        expense.amount.format_with_symbol(currency),
        truncate(&expense.category, 14),
        truncate(&expense.description, 28),
        expense.tags.join(", ")
    )
}

/// Format a list of expenses as a table
pub fn format_expense_list(expenses: &[Expense], currency: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5} {:10} {:>12} {:14} {:28} {}\n",
        "ID", "Date", "Amount", "Category", "Description", "Tags"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, currency));
        output.push('\n');
    }

    output.push_str(&format!("\n{} expense(s)\n", expenses.len()));
    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     #{}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(currency)
    ));

    if expense.category.is_empty() {
        output.push_str("Category:    (none)\n");
    } else {
        output.push_str(&format!("Category:    {}\n", expense.category));
    }

    if !expense.description.is_empty() {
        output.push_str(&format!("Description: {}\n", expense.description));
    }

    if !expense.tags.is_empty() {
        output.push_str(&format!("Tags:        {}\n", expense.tags.join(", ")));
    }

    output
}

/// Pad or cut a string to exactly `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

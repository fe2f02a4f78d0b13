//! Display formatting for terminal output
//!
//! Turns models and reports into plain text tables.

pub mod budget;
pub mod expense;

pub use budget::{format_budget_list, format_budget_status};
pub use expense::{format_expense_details, format_expense_list, format_expense_row};

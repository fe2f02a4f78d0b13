//! Core data models for the expense tracker
//!
//! This module contains the data structures that represent the domain:
//! expenses, their identifiers, money amounts and the budget ledger.

pub mod budget;
pub mod expense;
pub mod ids;
pub mod money;

pub use budget::{BudgetLedger, DEFAULT_BUDGETS};
pub use expense::{
    category_key, normalize_tags, parse_date, parse_tag_list, DateParseError, Expense,
    ExpenseUpdate,
};
pub use ids::{ExpenseId, IdAllocator};
pub use money::{Money, MoneyParseError};

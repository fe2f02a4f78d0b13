//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, persistence after each mutation, audit logging and the
//! aggregation engine.

pub mod aggregation;
pub mod budget;
pub mod expense;

pub use aggregation::{
    budget_status, AggregationStrategy, BudgetState, BudgetStatusReport, CategoryBudgetStatus,
    ColumnarAggregator, IterativeAggregator, SpendAggregator,
};
pub use budget::BudgetService;
pub use expense::{CreateExpenseInput, ExpenseFilter, ExpenseService};

//! Reports module for the expense tracker
//!
//! Read-only views over the stored data: a per-category spending summary
//! and a dashboard that adds budget status.

pub mod dashboard;
pub mod spending;

pub use dashboard::DashboardReport;
pub use spending::SpendingSummary;

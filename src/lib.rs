//! Expense Tracker - personal expenses and per-category budgets
//!
//! This library provides the core functionality for the expense tracker:
//! recording expenses, persisting them to CSV, keeping a JSON budget ledger
//! and aggregating spend per category.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, money, IDs, budget ledger)
//! - `storage`: In-memory store, CSV codec and file repositories
//! - `services`: Business logic and the aggregation engine
//! - `audit`: Audit logging system
//! - `reports`: Spending summary and dashboard
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{paths::TrackerPaths, settings::Settings};
//! use expense_tracker::storage::Storage;
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};

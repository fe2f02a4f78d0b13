//! Budget CLI commands
//!
//! Implements CLI commands for viewing and changing per-category limits and
//! for budget-vs-spend status.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::budget::{format_budget_list, format_budget_status};
use crate::error::{TrackerError, TrackerResult};
use crate::models::BudgetLedger;
use crate::services::{AggregationStrategy, BudgetService};
use crate::storage::{read_json_optional, Storage};

use super::expense::parse_amount;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show every category limit
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Set one category's limit
    Set {
        /// Category name
        category: String,
        /// Limit (e.g., "150" or "150.00")
        amount: String,
    },
    /// Remove one category's limit
    Remove {
        /// Category name
        category: String,
    },
    /// Replace the whole ledger from a JSON file ({"Food": 100.0, ...})
    Replace {
        /// Path to the JSON file
        file: PathBuf,
    },
    /// Compare spend against each budget
    Status {
        /// Override the configured aggregation strategy
        #[arg(short, long)]
        strategy: Option<AggregationStrategy>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> TrackerResult<()> {
    let currency = settings.currency_symbol.as_str();
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::List { json } => {
            let ledger = service.get_all()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&ledger)?);
            } else {
                print!("{}", format_budget_list(&ledger, currency));
            }
        }

        BudgetCommands::Set { category, amount } => {
            let limit = parse_amount(&amount)?;
            service.set_limit(&category, limit)?;
            println!(
                "Set budget for {}: {}",
                category.trim(),
                limit.format_with_symbol(currency)
            );
        }

        BudgetCommands::Remove { category } => {
            service.remove_limit(&category)?;
            println!("Removed budget for {}", category.trim());
        }

        BudgetCommands::Replace { file } => {
            let ledger: BudgetLedger = read_json_optional(&file)?.ok_or_else(|| {
                TrackerError::Io(format!("File not found: {}", file.display()))
            })?;
            let saved = service.replace_all(ledger)?;
            println!("Replaced budgets ({} categories)", saved.len());
        }

        BudgetCommands::Status { strategy, json } => {
            let report = service.status(strategy.unwrap_or(settings.aggregation_strategy))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", format_budget_status(&report, currency));
            }
        }
    }

    Ok(())
}

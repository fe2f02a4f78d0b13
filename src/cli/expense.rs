//! Expense CLI commands
//!
//! Implements CLI commands for recording, browsing and editing expenses.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::expense::{format_expense_details, format_expense_list};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{parse_tag_list, ExpenseId, ExpenseUpdate, Money};
use crate::services::{CreateExpenseInput, ExpenseFilter, ExpenseService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g., "12.50" or "12")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category name
        category: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text description
        #[arg(short = 'm', long, default_value = "")]
        description: String,
        /// Comma-separated tags (e.g., "lunch,work")
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// List all expenses
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one expense
    Show {
        /// Expense ID (e.g., "3" or "#3")
        id: ExpenseId,
    },
    /// Change fields of an expense
    Edit {
        /// Expense ID
        id: ExpenseId,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Comma-separated tags; an empty string clears them
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: ExpenseId,
    },
    /// List expenses by category and/or tag
    Filter {
        /// Category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,
        /// Tag (case-insensitive)
        #[arg(short, long)]
        tag: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> TrackerResult<()> {
    let currency = settings.currency_symbol.as_str();
    let mut service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            description,
            tags,
        } => {
            let date = date.unwrap_or_else(|| {
                chrono::Local::now()
                    .date_naive()
                    .format("%Y-%m-%d")
                    .to_string()
            });

            let expense = service.create(CreateExpenseInput {
                amount: parse_amount(&amount)?,
                category,
                date,
                description,
                tags: tags.as_deref().map(parse_tag_list).unwrap_or_default(),
            })?;

            println!("Added expense #{}", expense.id);
            print!("{}", format_expense_details(&expense, currency));
        }

        ExpenseCommands::List { json } => {
            let expenses = service.list();
            if json {
                println!("{}", serde_json::to_string_pretty(&expenses)?);
            } else {
                print!("{}", format_expense_list(&expenses, currency));
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = service.find(id)?;
            print!("{}", format_expense_details(&expense, currency));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            date,
            description,
            tags,
        } => {
            let mut update = ExpenseUpdate::new();
            if let Some(amount) = amount {
                update = update.amount(parse_amount(&amount)?);
            }
            if let Some(category) = category {
                update = update.category(category.trim());
            }
            if let Some(date) = date {
                update = update.date(date);
            }
            if let Some(description) = description {
                update = update.description(description);
            }
            if let Some(tags) = tags {
                update = update.tags(parse_tag_list(&tags));
            }

            if update.is_empty() {
                println!("No changes specified. Use --amount, --category, --date, --description or --tags.");
                return Ok(());
            }

            let updated = service.update(id, update)?;
            println!("Updated expense #{}", updated.id);
            print!("{}", format_expense_details(&updated, currency));
        }

        ExpenseCommands::Delete { id } => {
            let removed = service.delete(id)?;
            println!("Deleted expense #{}: {}", removed.id, removed.description);
        }

        ExpenseCommands::Filter {
            category,
            tag,
            json,
        } => {
            let mut filter = ExpenseFilter::new();
            if let Some(category) = category {
                filter = filter.category(category);
            }
            if let Some(tag) = tag {
                filter = filter.tag(tag);
            }

            let expenses = service.filter(&filter);
            if json {
                println!("{}", serde_json::to_string_pretty(&expenses)?);
            } else {
                print!("{}", format_expense_list(&expenses, currency));
            }
        }
    }

    Ok(())
}

/// Parse a user-supplied amount
pub(crate) fn parse_amount(text: &str) -> TrackerResult<Money> {
    Money::parse(text).map_err(|e| {
        TrackerError::Validation(format!(
            "Invalid amount '{}'. Use a format like '12.50' or '12'. Error: {}",
            text, e
        ))
    })
}

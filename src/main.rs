use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::{
    handle_budget_command, handle_dashboard_command, handle_expense_command,
    handle_summary_command,
};
use expense_tracker::config::{paths::TrackerPaths, settings::Settings};
use expense_tracker::services::{AggregationStrategy, ExpenseService};
use expense_tracker::storage::Storage;

/// Environment variable holding the log filter (e.g. "info", "expense_tracker=debug")
const LOG_ENV: &str = "EXPENSE_TRACKER_LOG";

#[derive(Parser)]
#[command(
    name = "expense-tracker",
    version,
    about = "Track expenses and compare spending against category budgets",
    long_about = "A small personal expense tracker. Expenses are kept in a CSV file \
                  and per-category budgets in a JSON file, both under the data \
                  directory (override with EXPENSE_TRACKER_DATA_DIR)."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(expense_tracker::cli::ExpenseCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(expense_tracker::cli::BudgetCommands),

    /// Spending totals per category
    Summary {
        /// Override the configured aggregation strategy
        #[arg(short, long)]
        strategy: Option<AggregationStrategy>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Totals, spending per category and budget status
    Dashboard {
        /// Override the configured aggregation strategy
        #[arg(short, long)]
        strategy: Option<AggregationStrategy>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create the data directory, settings and sample data
    Init,

    /// Show current configuration and paths
    Config,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    // Initialize paths and settings
    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&mut storage, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Summary { strategy, json }) => {
            handle_summary_command(&storage, &settings, strategy, json)?;
        }
        Some(Commands::Dashboard { strategy, json }) => {
            handle_dashboard_command(&storage, &settings, strategy, json)?;
        }
        Some(Commands::Init) => {
            if storage.is_initialized() {
                println!("Expense tracker already initialized at: {}", paths.base_dir().display());
            } else {
                println!("Initializing expense tracker at: {}", paths.base_dir().display());
            }
            settings.save(&paths)?;

            if !storage.budgets.exists() {
                let defaults = storage.budgets.load()?;
                storage.budgets.save(&defaults)?;
                println!("Wrote default budgets ({} categories).", defaults.len());
            }

            if settings.seed_sample_data {
                let seeded = ExpenseService::new(&mut storage).seed_sample_data()?;
                if seeded > 0 {
                    println!("Added {} sample expenses.", seeded);
                }
            }

            println!("Initialization complete!");
            println!();
            println!("Run 'expense-tracker dashboard' to see where things stand.");
        }
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Expenses file:  {}", paths.expenses_file().display());
            println!("Budgets file:   {}", paths.budgets_file().display());
            println!("Audit log:      {}", storage.audit().path().display());
            println!();
            println!("Settings:");
            println!("  Aggregation strategy: {}", settings.aggregation_strategy);
            println!("  Currency symbol:      {}", settings.currency_symbol);
            println!("  Seed sample data:     {}", settings.seed_sample_data);
        }
        Some(Commands::Audit { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("Expense Tracker - expenses, budgets and spending summaries");
            println!();
            println!("Run 'expense-tracker --help' for usage information.");
            println!("Run 'expense-tracker init' to get started.");
        }
    }

    Ok(())
}

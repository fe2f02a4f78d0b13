//! Report CLI commands

use crate::config::settings::Settings;
use crate::error::TrackerResult;
use crate::reports::{DashboardReport, SpendingSummary};
use crate::services::AggregationStrategy;
use crate::storage::Storage;

/// Print the per-category spending summary
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    strategy: Option<AggregationStrategy>,
    json: bool,
) -> TrackerResult<()> {
    let summary =
        SpendingSummary::generate(storage, strategy.unwrap_or(settings.aggregation_strategy));

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}

/// Print the dashboard
pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    strategy: Option<AggregationStrategy>,
    json: bool,
) -> TrackerResult<()> {
    let report =
        DashboardReport::generate(storage, strategy.unwrap_or(settings.aggregation_strategy))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}

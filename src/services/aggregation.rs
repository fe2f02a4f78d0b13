//! Aggregation engine
//!
//! Per-category spend totals and budget-vs-spend status. Totals come from a
//! [`SpendAggregator`]; two implementations exist and must agree exactly:
//!
//! - [`IterativeAggregator`] accumulates into a map while walking the records.
//! - [`ColumnarAggregator`] splits the records into a key column and an
//!   amount column, stable-sorts an index over the key column and reduces
//!   each contiguous run, the way a dataframe group-by does.
//!
//! Categories are grouped by [`category_key`] (trimmed, lowercased). Each
//! group is labelled with the first-seen spelling, trimmed.
//!
//! The strategy is picked once, from settings, via [`AggregationStrategy`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::money::as_dollars;
use crate::models::{category_key, BudgetLedger, Expense, Money};

/// Computes total spend per category
pub trait SpendAggregator {
    /// Short name for diagnostics
    fn name(&self) -> &'static str;

    /// Sum of amounts per category, keyed by the first-seen spelling
    fn spend_by_category(&self, expenses: &[Expense]) -> BTreeMap<String, Money>;
}

/// Plain iterate-and-accumulate path
#[derive(Debug, Clone, Copy, Default)]
pub struct IterativeAggregator;

impl SpendAggregator for IterativeAggregator {
    fn name(&self) -> &'static str {
        "iterative"
    }

    fn spend_by_category(&self, expenses: &[Expense]) -> BTreeMap<String, Money> {
        let mut groups: HashMap<String, (&str, Money)> = HashMap::new();
        for expense in expenses {
            let (_, total) = groups
                .entry(category_key(&expense.category))
                .or_insert((expense.category.trim(), Money::zero()));
            *total += expense.amount;
        }

        groups
            .into_values()
            .map(|(label, total)| (label.to_string(), total))
            .collect()
    }
}

/// Column-oriented group-by path
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnarAggregator;

impl SpendAggregator for ColumnarAggregator {
    fn name(&self) -> &'static str {
        "columnar"
    }

    fn spend_by_category(&self, expenses: &[Expense]) -> BTreeMap<String, Money> {
        let keys: Vec<String> = expenses.iter().map(|e| category_key(&e.category)).collect();
        let amounts: Vec<Money> = expenses.iter().map(|e| e.amount).collect();

        // Stable, so the head of each run is the first-seen record
        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_by(|&a, &b| keys[a].cmp(&keys[b]));

        let mut totals = BTreeMap::new();
        let mut pos = 0;
        while pos < order.len() {
            let head = order[pos];
            let mut sum = Money::zero();
            while pos < order.len() && keys[order[pos]] == keys[head] {
                sum += amounts[order[pos]];
                pos += 1;
            }
            totals.insert(expenses[head].category.trim().to_string(), sum);
        }
        totals
    }
}

/// Which aggregator to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationStrategy {
    Iterative,
    #[default]
    Columnar,
}

impl AggregationStrategy {
    /// Build the aggregator for this strategy
    pub fn aggregator(self) -> Box<dyn SpendAggregator> {
        match self {
            Self::Iterative => Box::new(IterativeAggregator),
            Self::Columnar => Box::new(ColumnarAggregator),
        }
    }
}

impl fmt::Display for AggregationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iterative => write!(f, "iterative"),
            Self::Columnar => write!(f, "columnar"),
        }
    }
}

impl FromStr for AggregationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "iterative" | "plain" => Ok(Self::Iterative),
            "columnar" | "accelerated" => Ok(Self::Columnar),
            other => Err(format!(
                "unknown aggregation strategy '{}' (expected 'iterative' or 'columnar')",
                other
            )),
        }
    }
}

/// Whether a category is within its budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetState {
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Over Budget")]
    OverBudget,
}

impl fmt::Display for BudgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "Good"),
            Self::OverBudget => write!(f, "Over Budget"),
        }
    }
}

/// Budget vs. spend for one budgeted category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBudgetStatus {
    pub category: String,
    #[serde(with = "as_dollars")]
    pub budget: Money,
    #[serde(with = "as_dollars")]
    pub spent: Money,
    #[serde(with = "as_dollars")]
    pub remaining: Money,
    pub status: BudgetState,
}

/// Budget status across every budgeted category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BudgetStatusReport {
    /// One row per ledger entry, in category order
    pub budgets: Vec<CategoryBudgetStatus>,
    pub over_budget_count: usize,
    pub total_budgets: usize,
}

impl BudgetStatusReport {
    /// Look up the row for a category
    pub fn get(&self, category: &str) -> Option<&CategoryBudgetStatus> {
        self.budgets.iter().find(|row| row.category == category)
    }

    /// Rows that are over budget
    pub fn over_budget(&self) -> impl Iterator<Item = &CategoryBudgetStatus> {
        self.budgets
            .iter()
            .filter(|row| row.status == BudgetState::OverBudget)
    }
}

/// Compare spend against every budgeted category
///
/// Ledger entries match spend by [`category_key`], so a "Food" budget
/// counts spend recorded as "food ". Categories with spend but no budget
/// entry are not reported. With no expenses or no budgets the report is
/// empty.
pub fn budget_status(
    expenses: &[Expense],
    budgets: &BudgetLedger,
    aggregator: &dyn SpendAggregator,
) -> BudgetStatusReport {
    if expenses.is_empty() || budgets.is_empty() {
        return BudgetStatusReport::default();
    }

    let spending: HashMap<String, Money> = aggregator
        .spend_by_category(expenses)
        .into_iter()
        .map(|(label, total)| (category_key(&label), total))
        .collect();

    let rows: Vec<CategoryBudgetStatus> = budgets
        .iter()
        .map(|(category, budget)| {
            let spent = spending
                .get(&category_key(category))
                .copied()
                .unwrap_or_default();
            let remaining = budget - spent;
            CategoryBudgetStatus {
                category: category.to_string(),
                budget,
                spent,
                remaining,
                status: if remaining.is_negative() {
                    BudgetState::OverBudget
                } else {
                    BudgetState::Good
                },
            }
        })
        .collect();

    BudgetStatusReport {
        over_budget_count: rows
            .iter()
            .filter(|row| row.status == BudgetState::OverBudget)
            .count(),
        total_budgets: budgets.len(),
        budgets: rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;
    use chrono::NaiveDate;

    fn expense(id: u64, category: &str, cents: i64) -> Expense {
        Expense::new(
            ExpenseId::new(id),
            Money::from_cents(cents),
            category,
            NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
            "",
            vec![],
        )
    }

    fn mixed_records() -> Vec<Expense> {
        vec![
            expense(1, "Food", 1250),
            expense(2, "Transport", 4500),
            expense(3, "Entertainment", 2599),
            expense(4, "Food", 875),
            expense(5, "Utilities", 12000),
            expense(6, "food", 100),
            expense(7, "Food", -300),
            expense(8, "", 50),
        ]
    }

    fn both() -> [Box<dyn SpendAggregator>; 2] {
        [
            AggregationStrategy::Iterative.aggregator(),
            AggregationStrategy::Columnar.aggregator(),
        ]
    }

    #[test]
    fn test_spend_by_category() {
        for aggregator in both() {
            let totals = aggregator.spend_by_category(&mixed_records());
            assert_eq!(totals.get("Food"), Some(&Money::from_cents(1925)), "{}", aggregator.name());
            assert_eq!(totals.get("food"), None);
            assert_eq!(totals.get(""), Some(&Money::from_cents(50)));
            assert_eq!(totals.len(), 5);
        }
    }

    #[test]
    fn test_strategies_agree() {
        let inputs = vec![
            Vec::new(),
            vec![expense(1, "Solo", 1)],
            mixed_records(),
            (1..=200)
                .map(|i| expense(i, ["A", "B", "C", "b"][(i % 4) as usize], (i as i64) * 37 - 900))
                .collect(),
        ];

        for records in inputs {
            let iterative = IterativeAggregator.spend_by_category(&records);
            let columnar = ColumnarAggregator.spend_by_category(&records);
            assert_eq!(iterative, columnar);
        }
    }

    #[test]
    fn test_mixed_case_and_padding_share_a_group() {
        let records = vec![
            expense(1, " food", 100),
            expense(2, "Food", 7000),
            expense(3, "FOOD ", 200),
            expense(4, "Transport", 4500),
            expense(5, "  transport  ", 500),
        ];

        for aggregator in both() {
            let totals = aggregator.spend_by_category(&records);
            assert_eq!(totals.len(), 2, "{}", aggregator.name());
            // Labelled with the first spelling seen, trimmed
            assert_eq!(totals.get("food"), Some(&Money::from_cents(7300)));
            assert_eq!(totals.get("Transport"), Some(&Money::from_cents(5000)));
        }
    }

    #[test]
    fn test_budget_matches_spend_case_insensitively() {
        let mut budgets = BudgetLedger::new();
        budgets.set("Food", Money::from_cents(10_000));

        let records = vec![expense(1, "Food", 7000), expense(2, "food ", 5000)];

        for aggregator in both() {
            let report = budget_status(&records, &budgets, aggregator.as_ref());
            let food = report.get("Food").unwrap();
            assert_eq!(food.spent, Money::from_cents(12_000), "{}", aggregator.name());
            assert_eq!(food.remaining, Money::from_cents(-2000));
            assert_eq!(food.status, BudgetState::OverBudget);
            assert_eq!(report.over_budget_count, 1);
        }
    }

    #[test]
    fn test_empty_records_give_empty_map() {
        for aggregator in both() {
            assert!(aggregator.spend_by_category(&[]).is_empty());
        }
    }

    #[test]
    fn test_budget_status_over_budget() {
        let mut budgets = BudgetLedger::new();
        budgets.set("Food", Money::from_cents(10_000));

        let records = vec![expense(1, "Food", 7000), expense(2, "Food", 5000)];

        for aggregator in both() {
            let report = budget_status(&records, &budgets, aggregator.as_ref());
            let food = report.get("Food").unwrap();
            assert_eq!(food.spent, Money::from_cents(12_000));
            assert_eq!(food.remaining, Money::from_cents(-2000));
            assert_eq!(food.status, BudgetState::OverBudget);
            assert_eq!(report.over_budget_count, 1);
            assert_eq!(report.total_budgets, 1);
        }
    }

    #[test]
    fn test_budget_status_covers_every_budget() {
        let records = vec![expense(1, "Food", 1250), expense(2, "Travel", 99_999)];
        let report = budget_status(&records, &BudgetLedger::defaults(), &IterativeAggregator);

        assert_eq!(report.total_budgets, 6);
        assert_eq!(report.budgets.len(), 6);
        assert_eq!(report.over_budget_count, 0);

        let shopping = report.get("Shopping").unwrap();
        assert_eq!(shopping.spent, Money::zero());
        assert_eq!(shopping.remaining, Money::from_cents(20_000));
        assert_eq!(shopping.status, BudgetState::Good);

        // Unbudgeted spend is left out
        assert!(report.get("Travel").is_none());
    }

    #[test]
    fn test_exactly_on_budget_is_good() {
        let mut budgets = BudgetLedger::new();
        budgets.set("Food", Money::from_cents(1000));
        let report = budget_status(&[expense(1, "Food", 1000)], &budgets, &ColumnarAggregator);
        assert_eq!(report.get("Food").unwrap().status, BudgetState::Good);
        assert_eq!(report.over_budget().count(), 0);
    }

    #[test]
    fn test_budget_status_empty_inputs() {
        let report = budget_status(&[], &BudgetLedger::defaults(), &IterativeAggregator);
        assert_eq!(report, BudgetStatusReport::default());

        let report = budget_status(&[expense(1, "Food", 1)], &BudgetLedger::new(), &IterativeAggregator);
        assert_eq!(report.total_budgets, 0);
        assert_eq!(report.over_budget_count, 0);
        assert!(report.budgets.is_empty());
    }

    #[test]
    fn test_strategy_parse_and_serde() {
        assert_eq!("columnar".parse::<AggregationStrategy>().unwrap(), AggregationStrategy::Columnar);
        assert_eq!(" Plain ".parse::<AggregationStrategy>().unwrap(), AggregationStrategy::Iterative);
        assert!("pandas".parse::<AggregationStrategy>().is_err());

        let json = serde_json::to_string(&AggregationStrategy::Iterative).unwrap();
        assert_eq!(json, "\"iterative\"");
    }

    #[test]
    fn test_report_json_uses_dollars_and_labels() {
        let mut budgets = BudgetLedger::new();
        budgets.set("Food", Money::from_cents(10_000));
        let report = budget_status(&[expense(1, "Food", 12_000)], &budgets, &ColumnarAggregator);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["budgets"][0]["remaining"], -20.0);
        assert_eq!(json["budgets"][0]["status"], "Over Budget");
        assert_eq!(json["over_budget_count"], 1);
    }
}

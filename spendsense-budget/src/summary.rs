//! Fold parsed transactions into the month aggregates the predictors read.

use spendsense_core::{MonthData, ParsedTransaction};
use std::collections::BTreeMap;

/// Aggregate the transactions belonging to `month` (`YYYY-MM`).
pub fn summarize_month(month: &str, starting_budget: f64, txns: &[ParsedTransaction]) -> MonthData {
    let mut data = MonthData {
        month: month.to_string(),
        starting_budget,
        ..MonthData::default()
    };

    for t in txns.iter().filter(|t| t.month == month) {
        if t.is_expense() {
            data.total_expenses += t.amount;
        }
        if t.affects_budget {
            data.budget_expenses += t.amount;
            *data.category_spent.entry(t.category).or_insert(0.0) += t.amount;
        }
    }

    data.ending_budget = starting_budget - data.budget_expenses;
    data
}

/// Budget-affecting spend per month, keyed and ordered by `YYYY-MM`.
pub fn monthly_budget_spend(txns: &[ParsedTransaction]) -> BTreeMap<String, f64> {
    let mut out: BTreeMap<String, f64> = BTreeMap::new();
    for t in txns.iter().filter(|t| t.affects_budget) {
        *out.entry(t.month.clone()).or_insert(0.0) += t.amount;
    }
    out
}

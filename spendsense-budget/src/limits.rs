//! Per-category monthly limits and the two ways of filling them.
//!
//! [`rebalance`] splits what is left after a user edit evenly across the
//! other categories. [`distribute_unassigned`] shares a remainder out in
//! proportion to historical spend. They answer different questions and are
//! kept apart on purpose.

use serde::{Deserialize, Serialize};
use spendsense_core::Category;
use std::collections::BTreeMap;

/// Category → amount
pub type LimitMap = BTreeMap<Category, f64>;

/// Budget ceilings for one user and month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLimits {
    pub user_id: String,
    /// `YYYY-MM`
    pub month: String,
    pub limits: LimitMap,
    pub auto_rebalance: bool,
}

impl CategoryLimits {
    pub fn new(user_id: impl Into<String>, month: impl Into<String>, limits: LimitMap) -> Self {
        Self {
            user_id: user_id.into(),
            month: month.into(),
            limits,
            auto_rebalance: true,
        }
    }

    pub fn total(&self) -> f64 {
        self.limits.values().sum()
    }

    pub fn limit_for(&self, category: Category) -> Option<f64> {
        self.limits.get(&category).copied()
    }

    /// Record a user edit to one category.
    ///
    /// With `auto_rebalance` on, the other categories are re-split so the
    /// total stays at `total_budget`; returns true when that happened. If the
    /// rebalance is a no-op (nothing left over, no other categories) or
    /// auto-rebalance is off, only the edited key changes.
    pub fn set_limit(&mut self, category: Category, value: f64, total_budget: f64) -> bool {
        if self.auto_rebalance {
            let next = rebalance(total_budget, &self.limits, category, value);
            if next != self.limits {
                self.limits = next;
                return true;
            }
        }
        self.limits.insert(category, value.max(0.0));
        false
    }
}

/// Even-split rebalance after `locked` is set to `locked_value`.
///
/// Returns `current` unchanged when `total_budget - locked_value <= 0` or
/// there is no other category to absorb the remainder.
pub fn rebalance(total_budget: f64, current: &LimitMap, locked: Category, locked_value: f64) -> LimitMap {
    let remaining = total_budget - locked_value;
    let others = current.keys().filter(|c| **c != locked).count();
    if remaining <= 0.0 || others == 0 {
        tracing::debug!(remaining, others, %locked, "rebalance skipped");
        return current.clone();
    }

    let share = (remaining / others as f64).max(0.0);
    let mut next: LimitMap = current
        .keys()
        .filter(|c| **c != locked)
        .map(|c| (*c, share))
        .collect();
    next.insert(locked, locked_value);
    next
}

/// Share `remaining_budget` across `unassigned` in proportion to past spend.
///
/// Falls back to an even split when the unassigned categories have no spend
/// history. A negative remainder is treated as zero.
pub fn distribute_unassigned(remaining_budget: f64, unassigned: &[Category], category_spend: &LimitMap) -> LimitMap {
    if unassigned.is_empty() {
        return LimitMap::new();
    }
    let remaining = remaining_budget.max(0.0);
    let spend_of = |c: &Category| category_spend.get(c).copied().unwrap_or(0.0).max(0.0);
    let total_spend: f64 = unassigned.iter().map(spend_of).sum();

    unassigned
        .iter()
        .map(|c| {
            let amount = if total_spend > 0.0 {
                remaining * (spend_of(c) / total_spend)
            } else {
                remaining / unassigned.len() as f64
            };
            (*c, amount)
        })
        .collect()
}

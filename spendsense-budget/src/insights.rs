//! Month-over-month category comparisons and savings tips.

use serde::{Deserialize, Serialize};
use spendsense_core::Category;

use crate::limits::LimitMap;

/// Percent change beyond which a category counts as moving
const CHANGE_THRESHOLD_PCT: f64 = 10.0;
/// Current spend above `previous * FAST_FACTOR` is flagged fast
const FAST_FACTOR: f64 = 1.5;
/// Default share of a limit that triggers a caution tip
pub const DEFAULT_CAUTION_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increased,
    Decreased,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendSpeed {
    Fast,
    Normal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInsight {
    pub category: Category,
    pub change_type: ChangeType,
    pub speed: SpendSpeed,
    pub percent_change: f64,
    pub current: f64,
    pub previous: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipKind {
    Exceeded,
    Caution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingTip {
    pub category: Category,
    pub kind: TipKind,
    pub message: String,
}

/// Percent change from `previous` to `current`; a zero baseline counts as +100%.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 100.0;
    }
    (current - previous) / previous * 100.0
}

fn classify_change(pct: f64) -> ChangeType {
    if pct > CHANGE_THRESHOLD_PCT {
        ChangeType::Increased
    } else if pct < -CHANGE_THRESHOLD_PCT {
        ChangeType::Decreased
    } else {
        ChangeType::Stable
    }
}

/// One insight per category in `current`; categories idle in both months are skipped.
pub fn compare(current: &LimitMap, previous: &LimitMap) -> Vec<CategoryInsight> {
    current
        .iter()
        .filter_map(|(category, &curr)| {
            let prev = previous.get(category).copied().unwrap_or(0.0);
            if curr == 0.0 && prev == 0.0 {
                return None;
            }
            let pct = percent_change(curr, prev);
            Some(CategoryInsight {
                category: *category,
                change_type: classify_change(pct),
                speed: if curr > prev * FAST_FACTOR {
                    SpendSpeed::Fast
                } else {
                    SpendSpeed::Normal
                },
                percent_change: pct,
                current: curr,
                previous: prev,
            })
        })
        .collect()
}

/// Tips for one category using the default caution ratio.
pub fn generate_saving_tips(category: Category, spent: f64, limit: f64) -> Vec<SavingTip> {
    generate_saving_tips_with_ratio(category, spent, limit, DEFAULT_CAUTION_RATIO)
}

/// Exceeded and caution checks are independent: both may fire at once.
pub fn generate_saving_tips_with_ratio(
    category: Category,
    spent: f64,
    limit: f64,
    caution_ratio: f64,
) -> Vec<SavingTip> {
    let mut tips = Vec::new();
    if spent > limit {
        tips.push(SavingTip {
            category,
            kind: TipKind::Exceeded,
            message: format!(
                "{category} is over budget by {:.2}. Pause non-essential {category} spending until next month.",
                spent - limit
            ),
        });
    }
    if spent > caution_ratio * limit {
        tips.push(SavingTip {
            category,
            kind: TipKind::Caution,
            message: format!(
                "{category} has used more than {:.0}% of its limit ({spent:.2} of {limit:.2}).",
                caution_ratio * 100.0
            ),
        });
    }
    tips
}

/// Tips for every category that has a limit.
pub fn saving_tips_for(spent: &LimitMap, limits: &LimitMap, caution_ratio: f64) -> Vec<SavingTip> {
    limits
        .iter()
        .flat_map(|(category, &limit)| {
            let s = spent.get(category).copied().unwrap_or(0.0);
            generate_saving_tips_with_ratio(*category, s, limit, caution_ratio)
        })
        .collect()
}

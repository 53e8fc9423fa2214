//! Record types handed across the library boundary.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::category::{Category, TransactionType};

/// Upper bound for any heuristic confidence score
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Merchant placeholder when nothing could be resolved
pub const UNKNOWN_MERCHANT: &str = "Unknown";

/// Clamp a confidence into `[0, MAX_CONFIDENCE]`
pub fn clamp_confidence(value: f64) -> f64 {
    value.clamp(0.0, MAX_CONFIDENCE)
}

/// A transaction extracted from free text.
///
/// Produced once by a parser and never mutated afterwards; refinements return
/// a new value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTransaction {
    pub user_id: String,
    /// Always > 0, currency-agnostic magnitude
    pub amount: f64,
    pub merchant_name: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub txn_type: TransactionType,
    pub affects_budget: bool,
    /// In `[0, MAX_CONFIDENCE]`
    pub confidence: f64,
    /// Source line, kept verbatim for auditing
    pub raw_text: String,
    pub date: NaiveDateTime,
    /// `YYYY-MM`
    pub month: String,
    pub year: i32,
    /// Origin channel, e.g. "sms" or "csv"
    pub source: String,
}

impl ParsedTransaction {
    /// Copy of this transaction with a new (clamped) confidence
    pub fn with_confidence(&self, confidence: f64) -> Self {
        Self {
            confidence: clamp_confidence(confidence),
            ..self.clone()
        }
    }

    pub fn has_merchant(&self) -> bool {
        self.merchant_name != UNKNOWN_MERCHANT
    }

    pub fn is_expense(&self) -> bool {
        self.txn_type == TransactionType::Expense
    }
}

/// A month's aggregated figures, as supplied by the ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthData {
    /// `YYYY-MM`
    pub month: String,
    pub total_expenses: f64,
    /// Only transactions with `affects_budget`
    pub budget_expenses: f64,
    pub starting_budget: f64,
    pub ending_budget: f64,
    pub category_spent: BTreeMap<Category, f64>,
}

impl MonthData {
    pub fn spent_in(&self, category: Category) -> f64 {
        self.category_spent.get(&category).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> ParsedTransaction {
        ParsedTransaction {
            user_id: "u-1".to_string(),
            amount: 250.0,
            merchant_name: UNKNOWN_MERCHANT.to_string(),
            category: Category::Food,
            txn_type: TransactionType::Expense,
            affects_budget: true,
            confidence: 0.5,
            raw_text: "Rs 250 spent".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            month: "2024-03".to_string(),
            year: 2024,
            source: "sms".to_string(),
        }
    }

    #[test]
    fn test_with_confidence_clamps() {
        let t = sample();
        assert_eq!(t.with_confidence(1.4).confidence, MAX_CONFIDENCE);
        assert_eq!(t.with_confidence(-1.0).confidence, 0.0);
        assert_eq!(t.with_confidence(0.7).confidence, 0.7);
        assert!(!t.has_merchant());
    }

    #[test]
    fn test_json_field_names() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(v["merchantName"], "Unknown");
        assert_eq!(v["type"], "expense");
        assert_eq!(v["affectsBudget"], true);
        assert_eq!(v["category"], "Food");
        assert_eq!(v["month"], "2024-03");
    }

    #[test]
    fn test_month_data_spent_in() {
        let mut m = MonthData::default();
        m.category_spent.insert(Category::Rent, 12000.0);
        assert_eq!(m.spent_in(Category::Rent), 12000.0);
        assert_eq!(m.spent_in(Category::Gifts), 0.0);
    }
}

//! Keyword-count classifier mapping free text to a category.
//!
//! Deterministic and stateless. Every row of [`CATEGORY_RULES`] is scored by
//! how many of its keywords occur in the lowercased text; the first row with
//! the strictly highest count wins.

use serde::Serialize;

use crate::category::{CATEGORY_RULES, Category, TransactionType};
use crate::model::MAX_CONFIDENCE;

const BASE_CONFIDENCE: f64 = 0.5;
const PER_KEYWORD_CONFIDENCE: f64 = 0.15;
const CREDIT_FALLBACK_CONFIDENCE: f64 = 0.6;
const DEBIT_FALLBACK_CONFIDENCE: f64 = 0.4;
const DEFAULT_CONFIDENCE: f64 = 0.3;

/// Result of classifying a piece of text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub category: Category,
    #[serde(rename = "type")]
    pub txn_type: TransactionType,
    pub affects_budget: bool,
    pub confidence: f64,
    pub matched_keywords: Vec<&'static str>,
}

impl Classification {
    fn fallback(category: Category, confidence: f64) -> Self {
        Self {
            category,
            txn_type: category.txn_type(),
            affects_budget: category.affects_budget(),
            confidence,
            matched_keywords: Vec::new(),
        }
    }
}

/// Classify free text into a category, type and budget flag.
pub fn categorize(text: &str) -> Classification {
    let lower = text.to_lowercase();

    let mut best: Option<(Category, Vec<&'static str>)> = None;
    for rule in &CATEGORY_RULES {
        let matched: Vec<&'static str> = rule
            .keywords
            .iter()
            .copied()
            .filter(|kw| lower.contains(kw))
            .collect();
        if matched.is_empty() {
            continue;
        }
        let beats = match &best {
            Some((_, current)) => matched.len() > current.len(),
            None => true,
        };
        if beats {
            best = Some((rule.category, matched));
        }
    }

    if let Some((category, matched_keywords)) = best {
        let confidence =
            (BASE_CONFIDENCE + PER_KEYWORD_CONFIDENCE * matched_keywords.len() as f64).min(MAX_CONFIDENCE);
        tracing::trace!(%category, ?matched_keywords, confidence, "keyword match");
        return Classification {
            category,
            txn_type: category.txn_type(),
            affects_budget: category.affects_budget(),
            confidence,
            matched_keywords,
        };
    }

    // "credit" also covers "credited"; same for "debit"/"debited".
    if lower.contains("credit") {
        Classification::fallback(Category::Income, CREDIT_FALLBACK_CONFIDENCE)
    } else if lower.contains("debit") {
        Classification::fallback(Category::Shopping, DEBIT_FALLBACK_CONFIDENCE)
    } else {
        Classification::fallback(Category::Shopping, DEFAULT_CONFIDENCE)
    }
}

//! Second-pass confidence refinement using signals the classifier never saw.

use crate::date::extract_date;
use crate::model::{ParsedTransaction, clamp_confidence};

const MERCHANT_BONUS: f64 = 0.1;
const DATE_BONUS: f64 = 0.05;

/// Refined confidence for a parsed transaction.
///
/// Bonuses are added first, then the sum is clamped to `[0, 0.95]`.
pub fn refine(txn: &ParsedTransaction) -> f64 {
    let mut score = txn.confidence;
    if txn.has_merchant() {
        score += MERCHANT_BONUS;
    }
    if extract_date(&txn.raw_text).success {
        score += DATE_BONUS;
    }
    clamp_confidence(score)
}

/// Apply [`refine`] to a batch, returning new records.
pub fn refine_all(txns: &[ParsedTransaction]) -> Vec<ParsedTransaction> {
    txns.iter().map(|t| t.with_confidence(refine(t))).collect()
}

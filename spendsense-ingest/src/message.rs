//! Pasted SMS / statement text → transactions.
//!
//! Works line by line and never fails: a line without a usable amount is
//! dropped and the rest of the batch carries on.

use spendsense_core::{
    ParsedTransaction, TransactionType, UNKNOWN_MERCHANT, categorize, extract_date_at,
};

use crate::extract::{extract_amount, extract_merchant};
use crate::types::ParseOptions;

/// Lines shorter than this cannot hold a transaction
const MIN_LINE_CHARS: usize = 10;

const CREDIT_WORDS: [&str; 3] = ["credited", "received", "refund"];
const DEBIT_WORDS: [&str; 3] = ["debited", "paid", "sent"];

/// Parse pasted text with default options (source "sms", local clock).
pub fn parse_messages(text: &str, user_id: &str) -> Vec<ParsedTransaction> {
    parse_messages_with(text, user_id, &ParseOptions::default())
}

/// Parse pasted multi-line text into one transaction per usable line.
pub fn parse_messages_with(text: &str, user_id: &str, opts: &ParseOptions) -> Vec<ParsedTransaction> {
    let txns: Vec<ParsedTransaction> = text
        .lines()
        .filter_map(|line| parse_line(line, user_id, opts))
        .collect();
    tracing::debug!(count = txns.len(), source = %opts.source, "parsed messages");
    txns
}

/// Parse a single line, or `None` if it does not look like a transaction.
pub fn parse_line(line: &str, user_id: &str, opts: &ParseOptions) -> Option<ParsedTransaction> {
    let line = line.trim();
    if line.chars().count() < MIN_LINE_CHARS {
        if !line.is_empty() {
            tracing::debug!(line, "skipping short line");
        }
        return None;
    }

    let Some(amount) = extract_amount(line) else {
        tracing::debug!(line, "skipping line without amount");
        return None;
    };

    let merchant_name =
        extract_merchant(line, Some(amount.end)).unwrap_or_else(|| UNKNOWN_MERCHANT.to_string());
    let date = extract_date_at(line, opts.now);
    let class = categorize(line);
    let txn_type = resolve_type(&line.to_lowercase(), class.txn_type);

    Some(ParsedTransaction {
        user_id: user_id.to_string(),
        amount: amount.value,
        merchant_name,
        category: class.category,
        txn_type,
        affects_budget: class.affects_budget && txn_type == TransactionType::Expense,
        confidence: class.confidence,
        raw_text: line.to_string(),
        date: date.date,
        month: date.month,
        year: date.year,
        source: opts.source.clone(),
    })
}

/// Debit/credit wording in the line overrides the category-implied type.
fn resolve_type(lower: &str, classified: TransactionType) -> TransactionType {
    if CREDIT_WORDS.iter().any(|w| lower.contains(w)) {
        TransactionType::Income
    } else if DEBIT_WORDS.iter().any(|w| lower.contains(w)) {
        if classified == TransactionType::Transfer {
            TransactionType::Transfer
        } else {
            TransactionType::Expense
        }
    } else {
        classified
    }
}

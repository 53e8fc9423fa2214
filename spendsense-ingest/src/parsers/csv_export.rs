//! Generic bank CSV export parser.
//!
//! Bank exports usually carry a few banner rows (account number, period)
//! before the real header, e.g.:
//!   Account Statement for XX1234
//!   Date,Narration,Withdrawal,Deposit,Balance
//!   05/03/2024,UPI-SWIGGY-FOOD,450.00,,12000.00
//!
//! Rows before the first header containing a date column are skipped.

use anyhow::{Context, Result, bail};
use csv::StringRecord;
use spendsense_core::{ParsedTransaction, TransactionType, categorize, extract_date_at};
use std::io::Read;
use std::path::Path;

use crate::extract::{extract_merchant, parse_amount};
use crate::types::ParseOptions;

/// Source tag for CSV imports
pub const CSV_SOURCE: &str = "csv";

const DATE_HEADERS: [&str; 4] = ["date", "txn date", "transaction date", "value date"];
const DESCRIPTION_HEADERS: [&str; 5] = ["description", "narration", "particulars", "details", "remarks"];
const AMOUNT_HEADERS: [&str; 2] = ["amount", "transaction amount"];
const DEBIT_HEADERS: [&str; 3] = ["debit", "withdrawal", "withdrawal amt"];
const CREDIT_HEADERS: [&str; 3] = ["credit", "deposit", "deposit amt"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum AmountColumns {
    /// Negative = money out, positive = money in
    Signed(usize),
    Split { debit: Option<usize>, credit: Option<usize> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Columns {
    date: usize,
    description: usize,
    amount: AmountColumns,
}

/// Lowercased header cell without trailing punctuation ("Withdrawal Amt." -> "withdrawal amt").
fn header_key(cell: &str) -> String {
    cell.trim().trim_end_matches(['.', ':']).trim_end().to_lowercase()
}

fn find_column(header: &StringRecord, names: &[&str]) -> Option<usize> {
    header
        .iter()
        .position(|cell| names.contains(&header_key(cell).as_str()))
}

impl Columns {
    fn from_header(header: &StringRecord) -> Result<Option<Self>> {
        let Some(date) = find_column(header, &DATE_HEADERS) else {
            return Ok(None);
        };
        let description = find_column(header, &DESCRIPTION_HEADERS)
            .context("CSV header has no description/narration column")?;
        let amount = match find_column(header, &AMOUNT_HEADERS) {
            Some(i) => AmountColumns::Signed(i),
            None => {
                let debit = find_column(header, &DEBIT_HEADERS);
                let credit = find_column(header, &CREDIT_HEADERS);
                if debit.is_none() && credit.is_none() {
                    bail!("CSV header has no amount, debit or credit column");
                }
                AmountColumns::Split { debit, credit }
            }
        };
        Ok(Some(Self {
            date,
            description,
            amount,
        }))
    }
}

/// Strip currency decorations so "₹1,200.00" or "Rs 45" parse.
fn clean_number(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('₹')
        .trim_start_matches("INR")
        .trim_start_matches("Rs.")
        .trim_start_matches("Rs")
        .trim()
        .to_string()
}

/// Money magnitude and whether it came in (credit).
fn row_amount(record: &StringRecord, amount: AmountColumns) -> Option<(f64, bool)> {
    match amount {
        AmountColumns::Signed(i) => {
            let raw = clean_number(record.get(i)?);
            if let Some(stripped) = raw.strip_prefix('-') {
                parse_amount(stripped).map(|v| (v, false))
            } else {
                parse_amount(raw.trim_start_matches('+')).map(|v| (v, true))
            }
        }
        AmountColumns::Split { debit, credit } => {
            let credit = credit
                .and_then(|i| record.get(i))
                .and_then(|s| parse_amount(&clean_number(s)));
            if let Some(v) = credit {
                return Some((v, true));
            }
            debit
                .and_then(|i| record.get(i))
                .and_then(|s| parse_amount(&clean_number(s)))
                .map(|v| (v, false))
        }
    }
}

fn row_to_transaction(
    record: &StringRecord,
    cols: Columns,
    user_id: &str,
    opts: &ParseOptions,
) -> Option<ParsedTransaction> {
    let description = record.get(cols.description)?.trim();
    let (amount, is_credit) = row_amount(record, cols.amount)?;

    let date = extract_date_at(record.get(cols.date).unwrap_or(""), opts.now);
    let class = categorize(description);
    let txn_type = if is_credit {
        TransactionType::Income
    } else if class.txn_type == TransactionType::Transfer {
        TransactionType::Transfer
    } else {
        TransactionType::Expense
    };
    let merchant_name = extract_merchant(description, None).unwrap_or_else(|| description.to_string());
    let raw_text = record.iter().map(str::trim).collect::<Vec<_>>().join(",");

    Some(ParsedTransaction {
        user_id: user_id.to_string(),
        amount,
        merchant_name,
        category: class.category,
        txn_type,
        affects_budget: class.affects_budget && txn_type == TransactionType::Expense,
        confidence: class.confidence,
        raw_text,
        date: date.date,
        month: date.month,
        year: date.year,
        source: opts.source.clone(),
    })
}

/// Parse a bank CSV export from any reader.
///
/// Rows without a positive amount are skipped; only a missing header is an error.
pub fn parse_csv_export<R: Read>(
    reader: R,
    user_id: &str,
    opts: &ParseOptions,
) -> Result<Vec<ParsedTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut cols: Option<Columns> = None;
    let mut txns = Vec::new();

    for (line_no, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(err) => {
                tracing::warn!(line = line_no + 1, %err, "skipping undecodable CSV row");
                continue;
            }
        };

        let Some(c) = cols else {
            cols = Columns::from_header(&record)?;
            continue;
        };

        match row_to_transaction(&record, c, user_id, opts) {
            Some(t) => txns.push(t),
            None => tracing::debug!(line = line_no + 1, "skipping CSV row without amount"),
        }
    }

    if cols.is_none() {
        bail!("no header row with a date column found");
    }
    Ok(txns)
}

/// Parse a bank CSV export file, tagging records with source "csv".
pub fn parse_csv_file(
    path: impl AsRef<Path>,
    user_id: &str,
    opts: &ParseOptions,
) -> Result<Vec<ParsedTransaction>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let opts = opts.clone().with_source(CSV_SOURCE);
    parse_csv_export(file, user_id, &opts).with_context(|| format!("parsing {}", path.display()))
}

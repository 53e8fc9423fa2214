//! Amount and merchant extraction shared by the text and CSV importers.

use regex::Regex;
use std::sync::LazyLock;

// `Rs. 1,250.50`, `₹500`, `INR 99`
static CURRENCY_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\brs\.?|₹|\binr)\s*(\d[\d,]*(?:\.\d+)?)").expect("currency-first amount pattern")
});

// `1,250.50 Rs`, `500₹`, `99 INR`
static NUMBER_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*(?:\.\d+)?)\s*(?:rs\b\.?|₹|inr\b)").expect("number-first amount pattern")
});

static AT_TO_FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:at|to|from)\s+(.+?)(?:\s+(?:on|dated|for|via)\b|\s+a/c\b|\.(?:\s|$)|$)")
        .expect("at/to/from merchant pattern")
});

// Any "paid to X" also reads as "to X" above, so this only wins when every
// at/to/from capture is rejected.
static PAID_TO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:paid|sent)\s+to\s+(.+?)(?:\s+(?:on|via)\b|$)").expect("paid-to merchant pattern")
});

static CAPITALIZED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][A-Za-z0-9&']*(?:\s+[A-Z][A-Za-z0-9&']*)*)").expect("capitalized words pattern")
});

// `A/c XX1234`, `your current account`, `Acct no. 5521`
static ACCOUNT_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:your\s+)?(?:(?:savings|current|salary)\s+)?(?:a/c|acct|account)\b(?:\s+(?:no\.?|number))?(?:\s*[x*]*\d+)?",
    )
    .expect("account reference pattern")
});

/// An amount found in text, with the byte offset just past the match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountMatch {
    pub value: f64,
    pub end: usize,
}

/// Parse a number that may carry thousands separators.
///
/// Returns `None` unless the value is finite and strictly positive.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let value: f64 = cleaned.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Find a currency-tagged amount, preferring the currency-then-number form.
pub fn extract_amount(text: &str) -> Option<AmountMatch> {
    let caps = CURRENCY_FIRST_RE
        .captures(text)
        .or_else(|| NUMBER_FIRST_RE.captures(text))?;
    let whole = caps.get(0)?;
    let value = parse_amount(&caps[1])?;
    Some(AmountMatch {
        value,
        end: whole.end(),
    })
}

/// Best-effort merchant name.
///
/// Tries "at/to/from X", then "paid/sent to X", then the first run of
/// capitalized words after `after_amount` (a byte offset into `text`).
pub fn extract_merchant(text: &str, after_amount: Option<usize>) -> Option<String> {
    if let Some(name) = first_name(&AT_TO_FROM_RE, text) {
        return Some(name);
    }
    if let Some(name) = first_name(&PAID_TO_RE, text) {
        return Some(name);
    }
    let tail = after_amount.and_then(|i| text.get(i..))?;
    first_name(&CAPITALIZED_RE, tail)
}

/// First usable capture of `re`, searching past account references and
/// captures that are only punctuation.
fn first_name(re: &Regex, text: &str) -> Option<String> {
    let mut start = 0;
    while let Some(caps) = re.captures_at(text, start) {
        let name = caps.get(1)?;
        if let Some(account) = ACCOUNT_REF_RE.find(&text[name.start()..]) {
            start = name.start() + account.end();
            continue;
        }
        let cleaned = name
            .as_str()
            .trim()
            .trim_end_matches(['.', ',', ';', ':'])
            .trim();
        if !cleaned.is_empty() {
            return Some(cleaned.to_string());
        }
        start = caps.get(0)?.end();
    }
    None
}

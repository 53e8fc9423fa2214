//! Calendar-date extraction from free text.
//!
//! Three pattern families are tried in a fixed order and the first one that
//! yields a real calendar date wins:
//! 1. `DD-MM-YYYY` / `DD/MM/YYYY` (two-digit years pivot at 50)
//! 2. `YYYY-MM-DD` / `YYYY/MM/DD`
//! 3. `DD Mon YYYY` (month matched on its first three letters)
//!
//! Order matters: a numeric date that fits pattern 1 is never re-read as
//! pattern 2 even if that reading would also be valid.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static DMY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})[-/](\d{1,2})[-/](\d{4}|\d{2})\b").expect("DMY date pattern")
});

static YMD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{4})[-/](\d{1,2})[-/](\d{1,2})\b").expect("YMD date pattern")
});

static D_MON_Y_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})[\s-]+([a-z]{3,})\.?[\s-]+(\d{4})\b").expect("D Mon Y date pattern")
});

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Outcome of a date extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDate {
    /// Midnight of the extracted day, or the fallback "now"
    pub date: NaiveDateTime,
    /// `YYYY-MM`
    pub month: String,
    pub year: i32,
    /// False when no pattern produced a valid date
    pub success: bool,
}

impl ExtractedDate {
    fn new(date: NaiveDateTime, success: bool) -> Self {
        Self {
            month: month_key(date.date()),
            year: date.year(),
            date,
            success,
        }
    }

    /// ISO-8601 rendering of `date`
    pub fn iso(&self) -> String {
        self.date.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// `YYYY-MM` key for a date
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Extract a date, falling back to the local current time.
pub fn extract_date(text: &str) -> ExtractedDate {
    extract_date_at(text, Local::now().naive_local())
}

/// Extract a date, falling back to `now` when nothing valid is found.
pub fn extract_date_at(text: &str, now: NaiveDateTime) -> ExtractedDate {
    let found = day_month_year(text)
        .or_else(|| year_month_day(text))
        .or_else(|| day_month_name_year(text));

    match found.and_then(|d| d.and_hms_opt(0, 0, 0)) {
        Some(dt) => ExtractedDate::new(dt, true),
        None => ExtractedDate::new(now, false),
    }
}

fn day_month_year(text: &str) -> Option<NaiveDate> {
    let caps = DMY_RE.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year_raw = &caps[3];
    let mut year: i32 = year_raw.parse().ok()?;
    if year_raw.len() == 2 {
        year += if year < 50 { 2000 } else { 1900 };
    }
    calendar_date(year, month, day)
}

fn year_month_day(text: &str) -> Option<NaiveDate> {
    let caps = YMD_RE.captures(text)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    calendar_date(year, month, day)
}

fn day_month_name_year(text: &str) -> Option<NaiveDate> {
    let caps = D_MON_Y_RE.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let prefix: String = caps[2].chars().take(3).collect::<String>().to_lowercase();
    let month = MONTH_ABBREVIATIONS.iter().position(|m| *m == prefix)? as u32 + 1;
    let year: i32 = caps[3].parse().ok()?;
    calendar_date(year, month, day)
}

/// Build a date only if the components survive the round trip unchanged.
fn calendar_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    (date.year() == year && date.month() == month && date.day() == day).then_some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_dd_mm_yyyy() {
        let r = extract_date_at("Rs 500 debited on 15-03-2024 at Swiggy", now());
        assert!(r.success);
        assert_eq!(r.date, ymd(2024, 3, 15));
        assert_eq!(r.month, "2024-03");
        assert_eq!(r.year, 2024);

        let r = extract_date_at("txn 05/11/2023", now());
        assert_eq!(r.date, ymd(2023, 11, 5));
    }

    #[test]
    fn test_two_digit_year_pivot() {
        assert_eq!(extract_date_at("on 01/02/24", now()).date, ymd(2024, 2, 1));
        assert_eq!(extract_date_at("on 01/02/49", now()).date, ymd(2049, 2, 1));
        assert_eq!(extract_date_at("on 01/02/50", now()).date, ymd(1950, 2, 1));
        assert_eq!(extract_date_at("on 01/02/99", now()).date, ymd(1999, 2, 1));
    }

    #[test]
    fn test_yyyy_mm_dd() {
        let r = extract_date_at("posted 2024-07-09 via UPI", now());
        assert!(r.success);
        assert_eq!(r.date, ymd(2024, 7, 9));

        let r = extract_date_at("posted 2024/12/31", now());
        assert_eq!(r.date, ymd(2024, 12, 31));
    }

    #[test]
    fn test_day_month_name_year() {
        let r = extract_date_at("spent on 3 Jan 2025 at DMart", now());
        assert_eq!(r.date, ymd(2025, 1, 3));

        let r = extract_date_at("dated 21-SEPTEMBER-2024", now());
        assert_eq!(r.date, ymd(2024, 9, 21));

        let r = extract_date_at("on 12 Foo 2024", now());
        assert!(!r.success);
    }

    #[test]
    fn test_first_pattern_has_priority() {
        // Both a DMY and a YMD date are present; DMY wins regardless of position.
        let r = extract_date_at("2023-01-02 settled, txn 04-05-2024", now());
        assert_eq!(r.date, ymd(2024, 5, 4));
    }

    #[test]
    fn test_impossible_date_falls_through() {
        // 31 April is invalid, so the month-name date is used instead.
        let r = extract_date_at("31/04/2024 ref, booked 2 Mar 2024", now());
        assert!(r.success);
        assert_eq!(r.date, ymd(2024, 3, 2));

        let r = extract_date_at("30-02-2024", now());
        assert!(!r.success);
    }

    #[test]
    fn test_no_date_falls_back_to_now() {
        let r = extract_date_at("Rs 500 spent at Zomato", now());
        assert!(!r.success);
        assert_eq!(r.date, now());
        assert_eq!(r.month, "2025-06");
        assert_eq!(r.year, 2025);
        assert_eq!(r.iso(), "2025-06-01T10:30:00");
    }

    #[test]
    fn test_every_valid_day_round_trips() {
        for (m, days) in [(1u32, 31u32), (2, 29), (4, 30), (12, 31)] {
            for d in 1..=days {
                let text = format!("paid on {d:02}-{m:02}-2024");
                let r = extract_date_at(&text, now());
                assert!(r.success, "{text}");
                assert_eq!(r.date, ymd(2024, m, d));
            }
        }
    }

    #[test]
    fn test_is_deterministic() {
        let text = "debited 09/10/2024";
        assert_eq!(extract_date_at(text, now()), extract_date_at(text, now()));
    }
}

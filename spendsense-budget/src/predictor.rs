//! Run-rate spend projections.
//!
//! All functions are plain arithmetic over caller-supplied aggregates; the
//! only guards are for empty inputs and zero elapsed days.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// How many past months feed a next-month forecast
pub const HISTORY_WINDOW: usize = 6;

const HIGH_CONFIDENCE_MONTHS: usize = 6;
const MEDIUM_CONFIDENCE_MONTHS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemainingMonthForecast {
    pub predicted_spend: f64,
    pub will_exceed: bool,
    /// May be negative when the projection overshoots
    pub remaining_budget: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextMonthForecast {
    pub predicted_spend: f64,
    pub predicted_savings: f64,
    pub will_meet_savings_goal: bool,
}

/// Sample-size based trust label for a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastConfidence {
    High,
    Medium,
    Low,
}

impl ForecastConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastConfidence::High => "high",
            ForecastConfidence::Medium => "medium",
            ForecastConfidence::Low => "low",
        }
    }
}

fn run_rate(spent_so_far: f64, days_elapsed: u32, total_days: u32) -> f64 {
    spent_so_far / f64::from(days_elapsed) * f64::from(total_days)
}

/// Project a category's month-end spend; `0` when no days have elapsed.
pub fn predict_category_spend(spent_so_far: f64, days_elapsed: u32, total_days: u32) -> f64 {
    if days_elapsed == 0 {
        return 0.0;
    }
    run_rate(spent_so_far, days_elapsed, total_days)
}

/// Project whole-month spend against a budget.
///
/// With zero elapsed days nothing can be extrapolated, so the projection is
/// the spend so far and `will_exceed` is false.
pub fn predict_remaining_month(
    spent_so_far: f64,
    total_budget: f64,
    days_elapsed: u32,
    total_days: u32,
) -> RemainingMonthForecast {
    if days_elapsed == 0 {
        return RemainingMonthForecast {
            predicted_spend: spent_so_far,
            will_exceed: false,
            remaining_budget: total_budget - spent_so_far,
        };
    }
    let predicted_spend = run_rate(spent_so_far, days_elapsed, total_days);
    RemainingMonthForecast {
        predicted_spend,
        will_exceed: predicted_spend > total_budget,
        remaining_budget: total_budget - predicted_spend,
    }
}

/// Forecast next month as the mean of `past_month_totals`.
///
/// The caller decides how much history to pass; see
/// [`predict_next_month_from_history`] for the usual six-month window.
pub fn predict_next_month(
    past_month_totals: &[f64],
    monthly_budget: f64,
    monthly_savings_target: f64,
) -> NextMonthForecast {
    let predicted_spend = if past_month_totals.is_empty() {
        0.0
    } else {
        past_month_totals.iter().sum::<f64>() / past_month_totals.len() as f64
    };
    let predicted_savings = monthly_budget - predicted_spend;
    NextMonthForecast {
        predicted_spend,
        predicted_savings,
        will_meet_savings_goal: predicted_savings >= monthly_savings_target,
    }
}

/// Same as [`predict_next_month`] over the most recent [`HISTORY_WINDOW`]
/// entries of a chronologically ordered history.
pub fn predict_next_month_from_history(
    history: &[f64],
    monthly_budget: f64,
    monthly_savings_target: f64,
) -> NextMonthForecast {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    predict_next_month(&history[start..], monthly_budget, monthly_savings_target)
}

/// `>= 6` months is high, `>= 3` medium, anything less low.
pub fn confidence_score(sample_size: usize) -> ForecastConfidence {
    if sample_size >= HIGH_CONFIDENCE_MONTHS {
        ForecastConfidence::High
    } else if sample_size >= MEDIUM_CONFIDENCE_MONTHS {
        ForecastConfidence::Medium
    } else {
        ForecastConfidence::Low
    }
}

/// True only when a limit exists and spend is strictly above it.
pub fn check_budget_exceeded(spent: f64, limit: Option<f64>) -> bool {
    limit.is_some_and(|l| spent > l)
}

/// `(days_elapsed, total_days)` for the month containing `date`.
pub fn month_progress(date: NaiveDate) -> (u32, u32) {
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    let total_days = next_month
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31);
    (date.day(), total_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_category_spend() {
        assert_eq!(predict_category_spend(1000.0, 10, 30), 3000.0);
        assert_eq!(predict_category_spend(0.0, 0, 30), 0.0);
        assert_eq!(predict_category_spend(500.0, 0, 30), 0.0);
        assert_eq!(predict_category_spend(3100.0, 31, 31), 3100.0);
    }

    #[test]
    fn test_predict_remaining_month_exceeds() {
        let f = predict_remaining_month(6000.0, 15000.0, 10, 30);
        assert_eq!(f.predicted_spend, 18000.0);
        assert!(f.will_exceed);
        assert_eq!(f.remaining_budget, -3000.0);
    }

    #[test]
    fn test_predict_remaining_month_under() {
        let f = predict_remaining_month(2000.0, 15000.0, 10, 30);
        assert_eq!(f.predicted_spend, 6000.0);
        assert!(!f.will_exceed);
        assert_eq!(f.remaining_budget, 9000.0);
    }

    #[test]
    fn test_predict_remaining_month_day_zero() {
        let f = predict_remaining_month(20000.0, 15000.0, 0, 30);
        assert_eq!(f.predicted_spend, 20000.0);
        assert!(!f.will_exceed);
        assert_eq!(f.remaining_budget, -5000.0);
    }

    #[test]
    fn test_predict_next_month() {
        let f = predict_next_month(&[30000.0, 32000.0, 34000.0], 40000.0, 8000.0);
        assert_eq!(f.predicted_spend, 32000.0);
        assert_eq!(f.predicted_savings, 8000.0);
        assert!(f.will_meet_savings_goal);

        let f = predict_next_month(&[30000.0, 32000.0, 34000.0], 40000.0, 8001.0);
        assert!(!f.will_meet_savings_goal);
    }

    #[test]
    fn test_predict_next_month_empty_history() {
        let f = predict_next_month(&[], 25000.0, 5000.0);
        assert_eq!(f.predicted_spend, 0.0);
        assert_eq!(f.predicted_savings, 25000.0);
        assert!(f.will_meet_savings_goal);
    }

    #[test]
    fn test_history_window_uses_latest_six() {
        let history = [100.0, 100.0, 600.0, 600.0, 600.0, 600.0, 600.0, 600.0];
        let f = predict_next_month_from_history(&history, 1000.0, 0.0);
        assert_eq!(f.predicted_spend, 600.0);

        let f = predict_next_month_from_history(&[300.0, 500.0], 1000.0, 0.0);
        assert_eq!(f.predicted_spend, 400.0);
    }

    #[test]
    fn test_confidence_thresholds() {
        assert_eq!(confidence_score(0), ForecastConfidence::Low);
        assert_eq!(confidence_score(2), ForecastConfidence::Low);
        assert_eq!(confidence_score(3), ForecastConfidence::Medium);
        assert_eq!(confidence_score(5), ForecastConfidence::Medium);
        assert_eq!(confidence_score(6), ForecastConfidence::High);
        assert_eq!(confidence_score(24), ForecastConfidence::High);
    }

    #[test]
    fn test_check_budget_exceeded() {
        assert!(!check_budget_exceeded(5000.0, None));
        assert!(!check_budget_exceeded(5000.0, Some(5000.0)));
        assert!(check_budget_exceeded(5000.01, Some(5000.0)));
    }

    #[test]
    fn test_month_progress() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        assert_eq!(month_progress(d), (10, 29));
        let d = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(month_progress(d), (31, 31));
        let d = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert_eq!(month_progress(d), (1, 30));
    }

    #[test]
    fn test_forecast_json_shape() {
        let f = predict_remaining_month(6000.0, 15000.0, 10, 30);
        let json = serde_json::to_value(f).unwrap();
        assert_eq!(json["predictedSpend"], 18000.0);
        assert_eq!(json["willExceed"], true);
        assert_eq!(json["remainingBudget"], -3000.0);

        let labels: Vec<String> = [6, 3, 1]
            .into_iter()
            .map(|n| serde_json::to_string(&confidence_score(n)).unwrap())
            .collect();
        assert_eq!(labels, ["\"high\"", "\"medium\"", "\"low\""]);
    }
}

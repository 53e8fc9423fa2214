//! spendsense-budget: spend forecasts, limit rebalancing and month-over-month
//! insights over aggregated category totals.

pub mod insights;
pub mod limits;
pub mod predictor;
pub mod summary;

pub use insights::{
    CategoryInsight, ChangeType, DEFAULT_CAUTION_RATIO, SavingTip, SpendSpeed, TipKind, compare,
    generate_saving_tips, generate_saving_tips_with_ratio, percent_change, saving_tips_for,
};
pub use limits::{CategoryLimits, LimitMap, distribute_unassigned, rebalance};
pub use predictor::{
    ForecastConfidence, HISTORY_WINDOW, NextMonthForecast, RemainingMonthForecast,
    check_budget_exceeded, confidence_score, month_progress, predict_category_spend,
    predict_next_month, predict_next_month_from_history, predict_remaining_month,
};
pub use summary::{monthly_budget_spend, summarize_month};

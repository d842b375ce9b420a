//! Calculation logic for the Childcare Benefit Engine.
//!
//! This module contains the calendar utilities, the daily wage derivation,
//! benefit period classification, the per-month cap, the postpartum
//! top-up grant, and the [`compute`] entry point that ties them together.

mod benefit;
mod calendar;
mod daily_wage;
mod monthly_cap;
mod period_split;
mod top_up_grant;

pub use benefit::{LEAVE_RANGE_REVERSED, compute};
pub use calendar::{
    MonthSpan, MonthSpans, add_days, days_in_month, inclusive_day_count, month_spans,
};
pub use daily_wage::{DailyWageResult, base_daily_wage, calculate_daily_wage, clamp_daily_wage};
pub use monthly_cap::{MonthlyCapResult, apply_monthly_cap, distribute_capped_total, prorated_cap};
pub use period_split::{PeriodSplit, classify_leave_day, leave_day_ordinal, split_by_period};
pub use top_up_grant::{TopUpGrantOutcome, evaluate_top_up_grant};

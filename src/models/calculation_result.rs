//! Calculation result models for the Childcare Benefit Engine.
//!
//! This module contains the [`CalculationResult`] type and its associated
//! structures: the per-period and per-month breakdowns, the top-up grant
//! outcome, and the audit trace.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CalculationInput;

/// The two benefit periods of a leave span.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::models::BenefitPeriod;
///
/// let period = BenefitPeriod::First;
/// assert_eq!(format!("{:?}", period), "First");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitPeriod {
    /// Ordinal leave days up to the first-period threshold (67%).
    First,
    /// Ordinal leave days after the first-period threshold (50%).
    Second,
}

impl std::fmt::Display for BenefitPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BenefitPeriod::First => write!(f, "first"),
            BenefitPeriod::Second => write!(f, "second"),
        }
    }
}

/// Days and amounts accumulated for one benefit period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBreakdown {
    /// Number of leave days in this period.
    pub days: u32,
    /// Daily wage x period rate over those days, before monthly capping.
    pub raw_amount: Decimal,
    /// Amount after per-month capping; never above `raw_amount`.
    pub capped_amount: Decimal,
}

/// One calendar month of the leave span, with its cap applied.
///
/// Each record covers the intersection of a calendar month with the
/// leave span. Raw and capped amounts are split by benefit period so the
/// period totals are a plain sum over the months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// First leave day within this month.
    pub first_day: NaiveDate,
    /// Last leave day within this month.
    pub last_day: NaiveDate,
    /// Leave days falling in this month.
    pub days_covered: u32,
    /// Leave days of this month paid at the first-period rate.
    pub first_period_days: u32,
    /// Leave days of this month paid at the second-period rate.
    pub second_period_days: u32,
    /// Raw first-period amount for this month.
    pub raw_first: Decimal,
    /// Raw second-period amount for this month.
    pub raw_second: Decimal,
    /// Which monthly cap tier applies.
    pub cap_tier: BenefitPeriod,
    /// The monthly cap prorated to `days_covered`.
    pub prorated_cap: Decimal,
    /// `min(raw_first + raw_second, prorated_cap)`.
    pub capped_total: Decimal,
    /// Share of `capped_total` attributed to the first period.
    pub capped_first: Decimal,
    /// Share of `capped_total` attributed to the second period.
    pub capped_second: Decimal,
}

impl MonthlyBreakdown {
    /// Returns the raw total for the month across both periods.
    pub fn raw_total(&self) -> Decimal {
        self.raw_first + self.raw_second
    }

    /// Returns true if the monthly cap reduced the raw total.
    pub fn is_capped(&self) -> bool {
        self.capped_total < self.raw_total()
    }
}

/// Outcome of the postpartum top-up grant evaluation.
///
/// When the grant is not applicable the monetary fields are zero, but
/// both eligibility conditions are still reported so a caller can explain
/// why it was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopUpGrantResult {
    /// True only if requested and both eligibility conditions hold.
    pub applicable: bool,
    /// Whether the total leave reaches the minimum duration.
    pub applicant_met_min_duration: bool,
    /// Echo of the spouse-side condition from the input.
    pub spouse_condition_met: bool,
    /// Days covered by the grant, zero when not applicable.
    pub covered_days: u32,
    /// Daily wage capped at the grant upper limit, zero when not applicable.
    pub daily_wage_used: Decimal,
    /// `daily_wage_used x covered_days x additional_rate`.
    pub additional_amount: Decimal,
    /// The grant rate in force.
    pub additional_rate: Decimal,
    /// Standard benefit rate paid alongside the grant on covered days.
    pub base_rate_during_grant_days: Decimal,
    /// Standard daily wage paid alongside the grant on covered days.
    pub base_daily_wage_during_grant_days: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation or intake.
///
/// Warnings never stop a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a benefit calculation.
///
/// Invariants:
/// - `first_period.days + second_period.days == total_leave_days`
/// - `standard_benefit_total == first_period.capped_amount + second_period.capped_amount`
/// - `total_benefit == standard_benefit_total + top_up_grant.additional_amount`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Standard benefit plus the top-up grant.
    pub total_benefit: Decimal,
    /// Sum of both periods' capped amounts.
    pub standard_benefit_total: Decimal,
    /// Daily wage used for the standard benefit, clamped to the standard limits.
    pub daily_wage_standard: Decimal,
    /// First-period breakdown.
    pub first_period: PeriodBreakdown,
    /// Second-period breakdown.
    pub second_period: PeriodBreakdown,
    /// Inclusive number of leave days.
    pub total_leave_days: u32,
    /// Per-calendar-month segments with their caps.
    pub monthly_breakdown: Vec<MonthlyBreakdown>,
    /// Top-up grant outcome.
    pub top_up_grant: TopUpGrantResult,
    /// The input the result was computed from.
    pub input_echo: CalculationInput,
    /// Audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_month(raw_first: &str, raw_second: &str, capped_total: &str) -> MonthlyBreakdown {
        MonthlyBreakdown {
            year: 2024,
            month: 9,
            first_day: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            last_day: NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
            days_covered: 30,
            first_period_days: 27,
            second_period_days: 3,
            raw_first: dec(raw_first),
            raw_second: dec(raw_second),
            cap_tier: BenefitPeriod::First,
            prorated_cap: dec("310143"),
            capped_total: dec(capped_total),
            capped_first: Decimal::ZERO,
            capped_second: Decimal::ZERO,
        }
    }

    #[test]
    fn test_month_raw_total_sums_periods() {
        let month = create_month("180900", "15000", "195900");
        assert_eq!(month.raw_total(), dec("195900"));
        assert!(!month.is_capped());
    }

    #[test]
    fn test_month_is_capped_when_total_below_raw() {
        let month = create_month("400000", "0", "310143");
        assert!(month.is_capped());
    }

    #[test]
    fn test_benefit_period_serialization() {
        let json = serde_json::to_string(&BenefitPeriod::First).unwrap();
        assert_eq!(json, "\"first\"");

        let period: BenefitPeriod = serde_json::from_str("\"second\"").unwrap();
        assert_eq!(period, BenefitPeriod::Second);
    }

    #[test]
    fn test_benefit_period_display() {
        assert_eq!(BenefitPeriod::First.to_string(), "first");
        assert_eq!(BenefitPeriod::Second.to_string(), "second");
    }

    #[test]
    fn test_period_breakdown_default_is_zero() {
        let period = PeriodBreakdown::default();
        assert_eq!(period.days, 0);
        assert_eq!(period.raw_amount, Decimal::ZERO);
        assert_eq!(period.capped_amount, Decimal::ZERO);
    }

    #[test]
    fn test_period_breakdown_serializes_amounts_as_strings() {
        let period = PeriodBreakdown {
            days: 180,
            raw_amount: dec("1206000"),
            capped_amount: dec("1206000"),
        };
        let json = serde_json::to_string(&period).unwrap();
        assert!(json.contains("\"days\":180"));
        assert!(json.contains("\"raw_amount\":\"1206000\""));
    }

    #[test]
    fn test_audit_warning_round_trip() {
        let warning = AuditWarning {
            code: "LEAVE_RANGE_REVERSED".to_string(),
            message: "leave end is before leave start".to_string(),
            severity: "high".to_string(),
        };
        let json = serde_json::to_string(&warning).unwrap();
        let parsed: AuditWarning = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, warning);
    }
}

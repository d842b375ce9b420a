//! Monthly benefit cap.
//!
//! The standard benefit is capped per calendar month. The cap tier is the
//! first-period cap if the month contains any first-period day, otherwise
//! the second-period cap. Partial months get a cap prorated by
//! `cap / divisor x days covered`. The capped month total is shared back
//! between the two periods in proportion to their raw amounts.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::BenefitPolicy;
use crate::models::{AuditStep, BenefitPeriod, MonthlyBreakdown};

use super::calendar::MonthSpan;
use super::period_split::PeriodSplit;

/// Returns the monthly cap prorated to `days` covered days.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::calculation::prorated_cap;
/// use rust_decimal::Decimal;
///
/// // 310143 / 30 x 15
/// let cap = prorated_cap(Decimal::from(310143), Decimal::from(30), 15);
/// assert_eq!(cap, Decimal::new(1550715, 1));
/// ```
pub fn prorated_cap(monthly_cap: Decimal, divisor: Decimal, days: u32) -> Decimal {
    if divisor.is_zero() {
        return Decimal::ZERO;
    }
    monthly_cap / divisor * Decimal::from(days)
}

/// Shares a capped month total between the two periods.
///
/// Returns `(first, second)` with `first + second == capped_total`. An
/// uncapped month passes the raw amounts through unchanged, and a zero
/// raw total distributes nothing.
pub fn distribute_capped_total(
    raw_first: Decimal,
    raw_second: Decimal,
    capped_total: Decimal,
) -> (Decimal, Decimal) {
    let raw_total = raw_first + raw_second;

    if raw_total.is_zero() {
        return (Decimal::ZERO, Decimal::ZERO);
    }
    if capped_total >= raw_total {
        return (raw_first, raw_second);
    }

    let first = raw_first / raw_total * capped_total;
    (first, capped_total - first)
}

/// The result of capping one calendar month, including the audit step.
#[derive(Debug, Clone)]
pub struct MonthlyCapResult {
    /// The capped month record.
    pub breakdown: MonthlyBreakdown,
    /// The audit step recording this month.
    pub audit_step: AuditStep,
}

/// Computes raw amounts for a month span and applies the monthly cap.
///
/// # Arguments
///
/// * `span` - The part of the leave in this calendar month
/// * `split` - How the span's days fall into the two periods
/// * `daily_wage` - The clamped standard daily wage
/// * `policy` - Rates and caps in force
/// * `step_number` - The step number for audit trail sequencing
pub fn apply_monthly_cap(
    span: &MonthSpan,
    split: PeriodSplit,
    daily_wage: Decimal,
    policy: &BenefitPolicy,
    step_number: u32,
) -> MonthlyCapResult {
    let days_covered = span.days();
    let raw_first = daily_wage * policy.first_period_rate * Decimal::from(split.first_days);
    let raw_second = daily_wage * policy.second_period_rate * Decimal::from(split.second_days);
    let raw_total = raw_first + raw_second;

    let (cap_tier, monthly_cap) = if split.contains_first_period() {
        (BenefitPeriod::First, policy.first_period_monthly_cap)
    } else {
        (BenefitPeriod::Second, policy.second_period_monthly_cap)
    };
    let prorated_cap = prorated_cap(monthly_cap, policy.divisor(), days_covered);
    let capped_total = raw_total.min(prorated_cap);
    let (capped_first, capped_second) =
        distribute_capped_total(raw_first, raw_second, capped_total);

    debug!(
        year = span.year,
        month = span.month,
        days = days_covered,
        raw = %raw_total,
        cap = %prorated_cap,
        capped = %capped_total,
        "Applied monthly cap"
    );

    let reasoning = if capped_total < raw_total {
        format!(
            "{}-{:02}: raw {} exceeds {} cap {} / {} x {} days = {}; capped",
            span.year,
            span.month,
            raw_total.round_dp(2).normalize(),
            cap_tier,
            monthly_cap.normalize(),
            policy.days_per_month_divisor,
            days_covered,
            prorated_cap.round_dp(2).normalize()
        )
    } else {
        format!(
            "{}-{:02}: raw {} within {} cap {}",
            span.year,
            span.month,
            raw_total.round_dp(2).normalize(),
            cap_tier,
            prorated_cap.round_dp(2).normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "monthly_cap".to_string(),
        rule_name: "Monthly Benefit Cap".to_string(),
        input: serde_json::json!({
            "year": span.year,
            "month": span.month,
            "days_covered": days_covered,
            "first_period_days": split.first_days,
            "second_period_days": split.second_days,
            "daily_wage": daily_wage.normalize().to_string()
        }),
        output: serde_json::json!({
            "raw_total": raw_total.normalize().to_string(),
            "cap_tier": cap_tier,
            "prorated_cap": prorated_cap.normalize().to_string(),
            "capped_total": capped_total.normalize().to_string()
        }),
        reasoning,
    };

    MonthlyCapResult {
        breakdown: MonthlyBreakdown {
            year: span.year,
            month: span.month,
            first_day: span.first_day,
            last_day: span.last_day,
            days_covered,
            first_period_days: split.first_days,
            second_period_days: split.second_days,
            raw_first,
            raw_second,
            cap_tier,
            prorated_cap,
            capped_total,
            capped_first,
            capped_second,
        },
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn span(y: i32, m: u32, first: u32, last: u32) -> MonthSpan {
        MonthSpan {
            year: y,
            month: m,
            first_day: NaiveDate::from_ymd_opt(y, m, first).unwrap(),
            last_day: NaiveDate::from_ymd_opt(y, m, last).unwrap(),
        }
    }

    fn split(first_days: u32, second_days: u32) -> PeriodSplit {
        PeriodSplit {
            first_days,
            second_days,
        }
    }

    #[test]
    fn test_full_month_below_cap_is_unchanged() {
        let policy = BenefitPolicy::default();
        let result = apply_monthly_cap(&span(2024, 4, 1, 30), split(30, 0), dec("10000"), &policy, 1);
        let month = result.breakdown;

        assert_eq!(month.raw_first, dec("201000"));
        assert_eq!(month.raw_second, Decimal::ZERO);
        assert_eq!(month.cap_tier, BenefitPeriod::First);
        assert_eq!(month.prorated_cap, dec("310143"));
        assert_eq!(month.capped_total, dec("201000"));
        assert_eq!(month.capped_first, dec("201000"));
        assert!(!month.is_capped());
    }

    #[test]
    fn test_full_month_above_cap_is_capped() {
        let policy = BenefitPolicy::default();
        let result = apply_monthly_cap(&span(2024, 4, 1, 30), split(30, 0), dec("16860"), &policy, 1);
        let month = result.breakdown;

        // 16860 x 0.67 x 30 = 338886
        assert_eq!(month.raw_first, dec("338886"));
        assert_eq!(month.capped_total, dec("310143"));
        assert_eq!(month.capped_first, dec("310143"));
        assert_eq!(month.capped_second, Decimal::ZERO);
        assert!(month.is_capped());
        assert!(result.audit_step.reasoning.contains("capped"));
    }

    #[test]
    fn test_partial_month_gets_prorated_cap() {
        let policy = BenefitPolicy::default();
        let result = apply_monthly_cap(&span(2024, 4, 1, 15), split(15, 0), dec("16860"), &policy, 1);
        let month = result.breakdown;

        // 310143 / 30 x 15 = 155071.5
        assert_eq!(month.prorated_cap, dec("155071.5"));
        assert_eq!(month.capped_total, dec("155071.5"));
    }

    #[test]
    fn test_thirty_one_day_month_cap_exceeds_monthly_cap() {
        let policy = BenefitPolicy::default();
        let result = apply_monthly_cap(&span(2024, 5, 1, 31), split(31, 0), dec("16860"), &policy, 1);

        // 310143 / 30 x 31 = 320481.1
        assert_eq!(result.breakdown.prorated_cap, dec("320481.1"));
    }

    #[test]
    fn test_second_period_only_month_uses_second_cap() {
        let policy = BenefitPolicy::default();
        let result = apply_monthly_cap(&span(2024, 12, 1, 31), split(0, 31), dec("16860"), &policy, 1);
        let month = result.breakdown;

        assert_eq!(month.cap_tier, BenefitPeriod::Second);
        // 231450 / 30 x 31 = 239165
        assert_eq!(month.prorated_cap, dec("239165"));
        // 16860 x 0.5 x 31 = 261330
        assert_eq!(month.raw_second, dec("261330"));
        assert_eq!(month.capped_second, dec("239165"));
        assert_eq!(month.capped_first, Decimal::ZERO);
    }

    #[test]
    fn test_mixed_month_uses_first_cap_and_shares_proportionally() {
        let policy = BenefitPolicy::default();
        let result = apply_monthly_cap(&span(2024, 9, 1, 30), split(27, 3), dec("16860"), &policy, 1);
        let month = result.breakdown;

        assert_eq!(month.cap_tier, BenefitPeriod::First);
        // 16860 x 0.67 x 27 = 304997.4 ; 16860 x 0.5 x 3 = 25290
        assert_eq!(month.raw_first, dec("304997.4"));
        assert_eq!(month.raw_second, dec("25290"));
        assert_eq!(month.capped_total, dec("310143"));
        assert_eq!(month.capped_first + month.capped_second, dec("310143"));
        assert!(month.capped_first < month.raw_first);
        assert!(month.capped_second < month.raw_second);

        let expected_first = dec("304997.4") / dec("330287.4") * dec("310143");
        assert!((month.capped_first - expected_first).abs() < dec("0.000001"));
    }

    #[test]
    fn test_distribute_zero_raw_total() {
        let (first, second) = distribute_capped_total(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(first, Decimal::ZERO);
        assert_eq!(second, Decimal::ZERO);
    }

    #[test]
    fn test_prorated_cap_zero_divisor() {
        assert_eq!(prorated_cap(dec("310143"), Decimal::ZERO, 30), Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_records_month() {
        let policy = BenefitPolicy::default();
        let result = apply_monthly_cap(&span(2024, 4, 1, 30), split(30, 0), dec("10000"), &policy, 3);

        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "monthly_cap");
        assert_eq!(result.audit_step.input["month"], 4);
        assert_eq!(result.audit_step.output["cap_tier"], "first");
        assert!(result.audit_step.reasoning.starts_with("2024-04"));
    }
}

//! The benefit calculation entry point.
//!
//! [`compute`] turns a [`CalculationInput`] into a [`CalculationResult`] in
//! one pass: derive the daily wage, walk the leave span month by month,
//! cap each month, fold the months into period totals, then evaluate the
//! top-up grant.

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::BenefitPolicy;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CalculationInput, CalculationResult, MonthlyBreakdown,
    PeriodBreakdown,
};

use super::calendar::month_spans;
use super::daily_wage::calculate_daily_wage;
use super::monthly_cap::apply_monthly_cap;
use super::period_split::split_by_period;
use super::top_up_grant::evaluate_top_up_grant;

/// Warning code recorded when the leave end precedes the leave start.
pub const LEAVE_RANGE_REVERSED: &str = "LEAVE_RANGE_REVERSED";

/// Computes the childcare leave benefit for one input.
///
/// This function is pure: it reads only its arguments, holds no state
/// between calls, and returns identical results for identical input. It
/// never fails; out-of-range salaries are clamped, and a reversed leave
/// range yields zero leave days with a warning in the audit trace.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::calculation::compute;
/// use childcare_benefit_engine::config::BenefitPolicy;
/// use childcare_benefit_engine::models::CalculationInput;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = CalculationInput {
///     average_monthly_salary: Decimal::from(300000),
///     leave_start: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
///     leave_end: NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
///     individual_monthly_salaries: None,
///     wants_top_up_grant: false,
///     spouse_condition_met: false,
/// };
///
/// let result = compute(&input, &BenefitPolicy::default());
/// assert_eq!(result.total_leave_days, 183);
/// assert_eq!(result.first_period.days, 180);
/// assert_eq!(result.second_period.days, 3);
/// assert_eq!(result.first_period.raw_amount, Decimal::from(1206000));
/// ```
pub fn compute(input: &CalculationInput, policy: &BenefitPolicy) -> CalculationResult {
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let daily_wage = calculate_daily_wage(input.average_monthly_salary, policy, step_number);
    steps.push(daily_wage.audit_step);
    step_number += 1;

    if input.is_reversed() {
        warn!(
            leave_start = %input.leave_start,
            leave_end = %input.leave_end,
            "Leave end precedes leave start; treating leave as zero days"
        );
        warnings.push(AuditWarning {
            code: LEAVE_RANGE_REVERSED.to_string(),
            message: format!(
                "Leave end {} is before leave start {}; no leave days counted",
                input.leave_end, input.leave_start
            ),
            severity: "high".to_string(),
        });
    }
    let total_leave_days = input.leave_days();

    let mut monthly_breakdown: Vec<MonthlyBreakdown> = Vec::new();
    for span in month_spans(input.leave_start, input.leave_end) {
        let split = split_by_period(&span, input.leave_start, policy.first_period_threshold);
        let month = apply_monthly_cap(&span, split, daily_wage.wage, policy, step_number);
        steps.push(month.audit_step);
        step_number += 1;
        monthly_breakdown.push(month.breakdown);
    }

    let (first_period, second_period) = fold_periods(&monthly_breakdown);
    let standard_benefit_total = first_period.capped_amount + second_period.capped_amount;

    let top_up = evaluate_top_up_grant(
        daily_wage.base,
        daily_wage.wage,
        total_leave_days,
        input.wants_top_up_grant,
        input.spouse_condition_met,
        policy,
        step_number,
    );
    steps.push(top_up.audit_step);
    step_number += 1;

    let total_benefit = standard_benefit_total + top_up.grant.additional_amount;

    steps.push(AuditStep {
        step_number,
        rule_id: "total_benefit".to_string(),
        rule_name: "Total Benefit".to_string(),
        input: serde_json::json!({
            "standard_benefit_total": standard_benefit_total.normalize().to_string(),
            "additional_amount": top_up.grant.additional_amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_benefit": total_benefit.normalize().to_string()
        }),
        reasoning: format!(
            "{} + {} = {}",
            standard_benefit_total.round_dp(2).normalize(),
            top_up.grant.additional_amount.round_dp(2).normalize(),
            total_benefit.round_dp(2).normalize()
        ),
    });

    info!(
        total_leave_days,
        months = monthly_breakdown.len(),
        standard_benefit_total = %standard_benefit_total,
        top_up_applicable = top_up.grant.applicable,
        total_benefit = %total_benefit,
        "Benefit calculation completed"
    );

    CalculationResult {
        total_benefit,
        standard_benefit_total,
        daily_wage_standard: daily_wage.wage,
        first_period,
        second_period,
        total_leave_days,
        monthly_breakdown,
        top_up_grant: top_up.grant,
        input_echo: input.clone(),
        audit_trace: AuditTrace { steps, warnings },
    }
}

/// Folds capped months into first- and second-period totals.
fn fold_periods(months: &[MonthlyBreakdown]) -> (PeriodBreakdown, PeriodBreakdown) {
    months.iter().fold(
        (PeriodBreakdown::default(), PeriodBreakdown::default()),
        |(first, second), month| {
            (
                PeriodBreakdown {
                    days: first.days + month.first_period_days,
                    raw_amount: first.raw_amount + month.raw_first,
                    capped_amount: first.capped_amount + month.capped_first,
                },
                PeriodBreakdown {
                    days: second.days + month.second_period_days,
                    raw_amount: second.raw_amount + month.raw_second,
                    capped_amount: second.capped_amount + month.capped_second,
                },
            )
        },
    )
}

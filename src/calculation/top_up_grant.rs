//! Postpartum top-up grant.
//!
//! The grant adds a further percentage of the daily wage for up to a fixed
//! number of days. It applies only when requested, when the applicant's own
//! leave reaches the minimum duration, and when the spouse-side condition
//! is met or exempt. Its daily wage uses a separate, lower upper limit and
//! is not subject to the standard benefit's monthly cap.

use rust_decimal::Decimal;

use crate::config::BenefitPolicy;
use crate::models::{AuditStep, TopUpGrantResult};

use super::daily_wage::clamp_daily_wage;

/// The result of the top-up grant evaluation, including the audit step.
#[derive(Debug, Clone)]
pub struct TopUpGrantOutcome {
    /// The grant outcome.
    pub grant: TopUpGrantResult,
    /// The audit step recording this evaluation.
    pub audit_step: AuditStep,
}

/// Evaluates eligibility for the top-up grant and computes its amount.
///
/// # Arguments
///
/// * `base_daily_wage` - Salary divided by the divisor, before clamping
/// * `standard_daily_wage` - The clamped standard daily wage, reported for display
/// * `total_leave_days` - Inclusive leave length
/// * `wants_top_up_grant` - Whether the applicant requested the grant
/// * `spouse_condition_met` - Whether the spouse-side condition holds
/// * `policy` - Rates and limits in force
/// * `step_number` - The step number for audit trail sequencing
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::calculation::evaluate_top_up_grant;
/// use childcare_benefit_engine::config::BenefitPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = BenefitPolicy::default();
/// let wage = Decimal::from(10000);
/// let outcome = evaluate_top_up_grant(wage, wage, 30, true, true, &policy, 1);
///
/// assert!(outcome.grant.applicable);
/// assert_eq!(outcome.grant.covered_days, 28);
/// assert_eq!(outcome.grant.additional_amount, Decimal::from(36400));
/// ```
pub fn evaluate_top_up_grant(
    base_daily_wage: Decimal,
    standard_daily_wage: Decimal,
    total_leave_days: u32,
    wants_top_up_grant: bool,
    spouse_condition_met: bool,
    policy: &BenefitPolicy,
    step_number: u32,
) -> TopUpGrantOutcome {
    let applicant_met_min_duration = total_leave_days >= policy.min_duration_days;
    let applicable = wants_top_up_grant && applicant_met_min_duration && spouse_condition_met;

    let (covered_days, daily_wage_used, additional_amount) = if applicable {
        let covered_days = total_leave_days.min(policy.max_grant_days);
        let daily_wage_used =
            clamp_daily_wage(base_daily_wage, policy.lower_limit, policy.grant_upper_limit);
        let additional_amount =
            daily_wage_used * Decimal::from(covered_days) * policy.additional_rate;
        (covered_days, daily_wage_used, additional_amount)
    } else {
        (0, Decimal::ZERO, Decimal::ZERO)
    };

    let reasoning = if applicable {
        format!(
            "{} x {} days x {} = {}",
            daily_wage_used.round_dp(2).normalize(),
            covered_days,
            policy.additional_rate.normalize(),
            additional_amount.round_dp(2).normalize()
        )
    } else if !wants_top_up_grant {
        "Top-up grant not requested".to_string()
    } else {
        let mut reasons = Vec::new();
        if !applicant_met_min_duration {
            reasons.push(format!(
                "leave of {} days is shorter than {} days",
                total_leave_days, policy.min_duration_days
            ));
        }
        if !spouse_condition_met {
            reasons.push("spouse condition not met".to_string());
        }
        format!("Top-up grant not applicable: {}", reasons.join("; "))
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "top_up_grant".to_string(),
        rule_name: "Postpartum Top-Up Grant".to_string(),
        input: serde_json::json!({
            "requested": wants_top_up_grant,
            "total_leave_days": total_leave_days,
            "min_duration_days": policy.min_duration_days,
            "spouse_condition_met": spouse_condition_met,
            "base_daily_wage": base_daily_wage.normalize().to_string()
        }),
        output: serde_json::json!({
            "applicable": applicable,
            "covered_days": covered_days,
            "daily_wage_used": daily_wage_used.normalize().to_string(),
            "additional_amount": additional_amount.normalize().to_string()
        }),
        reasoning,
    };

    TopUpGrantOutcome {
        grant: TopUpGrantResult {
            applicable,
            applicant_met_min_duration,
            spouse_condition_met,
            covered_days,
            daily_wage_used,
            additional_amount,
            additional_rate: policy.additional_rate,
            base_rate_during_grant_days: policy.first_period_rate,
            base_daily_wage_during_grant_days: standard_daily_wage,
        },
        audit_step,
    }
}

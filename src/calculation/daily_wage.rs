//! Daily wage derivation.
//!
//! The daily wage is the average monthly salary divided by the policy
//! divisor, clamped to the policy's lower and upper limits. The standard
//! benefit and the top-up grant share the lower limit but have separate
//! upper limits.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::BenefitPolicy;
use crate::models::AuditStep;

/// Returns the unclamped daily wage: `average_monthly_salary / divisor`.
///
/// A zero divisor yields zero, which then clamps to the lower limit.
pub fn base_daily_wage(average_monthly_salary: Decimal, policy: &BenefitPolicy) -> Decimal {
    let divisor = policy.divisor();
    if divisor.is_zero() {
        return Decimal::ZERO;
    }
    average_monthly_salary / divisor
}

/// Clamps a daily wage to `[lower, upper]`.
///
/// If `lower` exceeds `upper` the lower limit wins.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::calculation::clamp_daily_wage;
/// use rust_decimal::Decimal;
///
/// let lower = Decimal::from(2746);
/// let upper = Decimal::from(16860);
/// assert_eq!(clamp_daily_wage(Decimal::from(20000), lower, upper), upper);
/// assert_eq!(clamp_daily_wage(Decimal::ZERO, lower, upper), lower);
/// assert_eq!(clamp_daily_wage(Decimal::from(10000), lower, upper), Decimal::from(10000));
/// ```
pub fn clamp_daily_wage(base: Decimal, lower: Decimal, upper: Decimal) -> Decimal {
    lower.max(base.min(upper))
}

/// The result of the standard daily wage derivation, including the audit step.
#[derive(Debug, Clone)]
pub struct DailyWageResult {
    /// Salary divided by the divisor, before clamping.
    pub base: Decimal,
    /// The clamped daily wage used for the standard benefit.
    pub wage: Decimal,
    /// The audit step recording this derivation.
    pub audit_step: AuditStep,
}

/// Derives the daily wage for the standard 67%/50% benefit.
///
/// Salary values outside the limits are clamped, never rejected.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::calculation::calculate_daily_wage;
/// use childcare_benefit_engine::config::BenefitPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = BenefitPolicy::default();
/// let result = calculate_daily_wage(Decimal::from(300000), &policy, 1);
/// assert_eq!(result.wage, Decimal::from(10000));
/// ```
pub fn calculate_daily_wage(
    average_monthly_salary: Decimal,
    policy: &BenefitPolicy,
    step_number: u32,
) -> DailyWageResult {
    let base = base_daily_wage(average_monthly_salary, policy);
    let wage = clamp_daily_wage(base, policy.lower_limit, policy.standard_upper_limit);

    let reasoning = if wage > base {
        format!(
            "{} / {} = {} is below the lower limit; using {}",
            average_monthly_salary.normalize(),
            policy.days_per_month_divisor,
            base.round_dp(2).normalize(),
            wage.normalize()
        )
    } else if wage < base {
        format!(
            "{} / {} = {} exceeds the upper limit; using {}",
            average_monthly_salary.normalize(),
            policy.days_per_month_divisor,
            base.round_dp(2).normalize(),
            wage.normalize()
        )
    } else {
        format!(
            "{} / {} = {}",
            average_monthly_salary.normalize(),
            policy.days_per_month_divisor,
            wage.round_dp(2).normalize()
        )
    };

    debug!(base = %base, wage = %wage, "Derived standard daily wage");

    let audit_step = AuditStep {
        step_number,
        rule_id: "daily_wage_standard".to_string(),
        rule_name: "Standard Daily Wage".to_string(),
        input: serde_json::json!({
            "average_monthly_salary": average_monthly_salary.normalize().to_string(),
            "divisor": policy.days_per_month_divisor,
            "lower_limit": policy.lower_limit.normalize().to_string(),
            "upper_limit": policy.standard_upper_limit.normalize().to_string()
        }),
        output: serde_json::json!({
            "base": base.normalize().to_string(),
            "daily_wage": wage.normalize().to_string()
        }),
        reasoning,
    };

    DailyWageResult {
        base,
        wage,
        audit_step,
    }
}

//! Leave request types and validation.
//!
//! A [`LeaveRequest`] is what a form or other front end collects: six
//! monthly salaries, the leave dates, and the two top-up grant flags. It is
//! validated into a [`CalculationInput`] before the engine runs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculation::compute;
use crate::config::BenefitPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditWarning, CalculationInput, CalculationResult};

/// Number of monthly salaries averaged into the daily wage basis.
pub const SALARY_MONTHS: usize = 6;

/// Warning code: top-up requested but the leave is too short.
pub const TOP_UP_MIN_DURATION_NOT_MET: &str = "TOP_UP_MIN_DURATION_NOT_MET";

/// Warning code: top-up requested but the spouse condition is not met.
pub const TOP_UP_SPOUSE_CONDITION_NOT_MET: &str = "TOP_UP_SPOUSE_CONDITION_NOT_MET";

/// A raw benefit request as collected from the applicant.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::intake::LeaveRequest;
///
/// let json = r#"{
///     "monthly_salaries": ["300000", "300000", "300000", "300000", "300000", "300000"],
///     "leave_start": "2024-04-01",
///     "leave_end": "2024-04-30",
///     "wants_top_up_grant": true,
///     "spouse_condition_met": true
/// }"#;
///
/// let request: LeaveRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(request.monthly_salaries.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Gross salary for each of the six months before leave.
    pub monthly_salaries: Vec<Decimal>,
    /// First day of leave.
    pub leave_start: NaiveDate,
    /// Last day of leave.
    pub leave_end: NaiveDate,
    /// Whether the applicant asks for the top-up grant.
    #[serde(default)]
    pub wants_top_up_grant: bool,
    /// Whether the spouse-side condition is met or exempt.
    #[serde(default)]
    pub spouse_condition_met: bool,
}

/// A request that passed validation, ready for [`compute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    /// The engine input.
    pub input: CalculationInput,
    /// Non-fatal conditions the applicant should be told about.
    pub warnings: Vec<AuditWarning>,
}

impl LeaveRequest {
    /// Validates the request and builds the engine input.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if:
    /// - there are not exactly six monthly salaries
    /// - any salary is negative
    /// - the salary total overflows
    /// - the average salary is not positive
    /// - the leave end is not strictly after the leave start
    ///
    /// A top-up request whose conditions fail is not an error; it produces
    /// a warning and the grant is simply not applied.
    pub fn validate(&self, policy: &BenefitPolicy) -> EngineResult<ValidatedRequest> {
        if self.monthly_salaries.len() != SALARY_MONTHS {
            return Err(EngineError::InvalidRequest {
                field: "monthly_salaries".to_string(),
                message: format!(
                    "expected {} monthly salaries, got {}",
                    SALARY_MONTHS,
                    self.monthly_salaries.len()
                ),
            });
        }

        if let Some((index, salary)) = self
            .monthly_salaries
            .iter()
            .enumerate()
            .find(|(_, s)| **s < Decimal::ZERO)
        {
            return Err(EngineError::InvalidRequest {
                field: format!("monthly_salaries[{}]", index),
                message: format!("salary {} must not be negative", salary),
            });
        }

        let average_monthly_salary = average_salary(&self.monthly_salaries)?;
        if average_monthly_salary <= Decimal::ZERO {
            return Err(EngineError::InvalidRequest {
                field: "monthly_salaries".to_string(),
                message: "average monthly salary must be positive".to_string(),
            });
        }

        if self.leave_end <= self.leave_start {
            return Err(EngineError::InvalidRequest {
                field: "leave_end".to_string(),
                message: format!(
                    "leave end {} must be after leave start {}",
                    self.leave_end, self.leave_start
                ),
            });
        }

        let spouse_condition_met = self.wants_top_up_grant && self.spouse_condition_met;
        let input = CalculationInput {
            average_monthly_salary,
            leave_start: self.leave_start,
            leave_end: self.leave_end,
            individual_monthly_salaries: Some(self.monthly_salaries.clone()),
            wants_top_up_grant: self.wants_top_up_grant,
            spouse_condition_met,
        };

        let warnings = top_up_warnings(&input, policy);

        Ok(ValidatedRequest { input, warnings })
    }
}

/// Returns the mean of the given salaries, or zero for an empty slice.
///
/// # Errors
///
/// Returns `InvalidRequest` if the salary total overflows.
pub fn average_salary(salaries: &[Decimal]) -> EngineResult<Decimal> {
    if salaries.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let total = salaries
        .iter()
        .try_fold(Decimal::ZERO, |sum, salary| sum.checked_add(*salary))
        .ok_or_else(|| EngineError::InvalidRequest {
            field: "monthly_salaries".to_string(),
            message: "salary total is too large".to_string(),
        })?;
    Ok(total / Decimal::from(salaries.len()))
}

fn top_up_warnings(input: &CalculationInput, policy: &BenefitPolicy) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();
    if !input.wants_top_up_grant {
        return warnings;
    }

    let leave_days = input.leave_days();
    if leave_days < policy.min_duration_days {
        warn!(leave_days, "Top-up grant requested with leave below minimum duration");
        warnings.push(AuditWarning {
            code: TOP_UP_MIN_DURATION_NOT_MET.to_string(),
            message: format!(
                "The top-up grant needs at least {} days of leave; the requested leave is {} days, so it will not be calculated",
                policy.min_duration_days, leave_days
            ),
            severity: "medium".to_string(),
        });
    }
    if !input.spouse_condition_met {
        warn!("Top-up grant requested without the spouse condition");
        warnings.push(AuditWarning {
            code: TOP_UP_SPOUSE_CONDITION_NOT_MET.to_string(),
            message: "The top-up grant also requires the spouse condition; it is not met, so the grant will not be calculated".to_string(),
            severity: "medium".to_string(),
        });
    }

    warnings
}

/// Validates a request and computes its benefit.
///
/// Intake warnings are appended to the result's audit trace.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::config::BenefitPolicy;
/// use childcare_benefit_engine::intake::{LeaveRequest, calculate};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let request = LeaveRequest {
///     monthly_salaries: vec![Decimal::from(300000); 6],
///     leave_start: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
///     leave_end: NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
///     wants_top_up_grant: true,
///     spouse_condition_met: true,
/// };
///
/// let result = calculate(&request, &BenefitPolicy::default())?;
/// assert_eq!(result.total_benefit, Decimal::from(237400));
/// # Ok::<(), childcare_benefit_engine::error::EngineError>(())
/// ```
pub fn calculate(request: &LeaveRequest, policy: &BenefitPolicy) -> EngineResult<CalculationResult> {
    let validated = request.validate(policy)?;
    let mut result = compute(&validated.input, policy);
    result.audit_trace.warnings.extend(validated.warnings);
    Ok(result)
}

//! Calculation input model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::inclusive_day_count;

/// The complete, already-validated input for one benefit calculation.
///
/// `leave_start` and `leave_end` are both inclusive. Callers are expected
/// to ensure `leave_start <= leave_end`; a reversed range is still handled
/// (it yields zero leave days) but is reported as a warning.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::models::CalculationInput;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = CalculationInput {
///     average_monthly_salary: Decimal::from(300000),
///     leave_start: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
///     leave_end: NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
///     individual_monthly_salaries: None,
///     wants_top_up_grant: true,
///     spouse_condition_met: true,
/// };
/// assert_eq!(input.leave_days(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Average gross monthly salary over the six months before leave.
    pub average_monthly_salary: Decimal,
    /// First day of leave.
    pub leave_start: NaiveDate,
    /// Last day of leave.
    pub leave_end: NaiveDate,
    /// The six monthly salaries behind the average, kept for display only.
    #[serde(default)]
    pub individual_monthly_salaries: Option<Vec<Decimal>>,
    /// Whether the applicant asks for the postpartum top-up grant.
    #[serde(default)]
    pub wants_top_up_grant: bool,
    /// Whether the spouse-side condition for the top-up grant is met or exempt.
    #[serde(default)]
    pub spouse_condition_met: bool,
}

impl CalculationInput {
    /// Returns the inclusive number of leave days, or zero for a reversed range.
    pub fn leave_days(&self) -> u32 {
        u32::try_from(inclusive_day_count(self.leave_start, self.leave_end).max(0))
            .unwrap_or(u32::MAX)
    }

    /// Returns true if the leave end falls before the leave start.
    pub fn is_reversed(&self) -> bool {
        self.leave_end < self.leave_start
    }
}

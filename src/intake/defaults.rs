//! Initial values for a leave request form.
//!
//! These take the current date as a parameter instead of reading the
//! clock, so callers decide what "today" is.

use chrono::{Datelike, Months, NaiveDate};

use crate::calculation::add_days;
use crate::config::BenefitPolicy;

use super::request::SALARY_MONTHS;

/// Default leave length offered to the applicant, in calendar months.
pub const DEFAULT_LEAVE_MONTHS: u32 = 6;

/// Returns the default `(leave_start, leave_end)` for a new request.
///
/// The leave starts on `today` and ends six calendar months later, but
/// never before the top-up grant's minimum duration is reached. Month
/// arithmetic clamps to the end of shorter months (August 31 plus six
/// months is the last day of February).
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::config::BenefitPolicy;
/// use childcare_benefit_engine::intake::default_leave_range;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
/// let (start, end) = default_leave_range(today, &BenefitPolicy::default());
/// assert_eq!(start, today);
/// assert_eq!(end, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
/// ```
pub fn default_leave_range(today: NaiveDate, policy: &BenefitPolicy) -> (NaiveDate, NaiveDate) {
    let six_months = today
        .checked_add_months(Months::new(DEFAULT_LEAVE_MONTHS))
        .unwrap_or(NaiveDate::MAX);
    let min_end = add_days(today, i64::from(policy.min_duration_days) - 1);

    (today, six_months.max(min_end))
}

/// Returns the `(year, month)` pairs of the six months before the leave start month.
///
/// The most recent month comes first.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::intake::salary_months;
/// use chrono::NaiveDate;
///
/// let months = salary_months(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
/// assert_eq!(months[0], (2024, 2));
/// assert_eq!(months[2], (2023, 12));
/// assert_eq!(months[5], (2023, 9));
/// ```
pub fn salary_months(leave_start: NaiveDate) -> Vec<(i32, u32)> {
    (1..=SALARY_MONTHS as i32)
        .map(|back| {
            let index = leave_start.year() * 12 + leave_start.month0() as i32 - back;
            (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_range_is_six_months() {
        let (start, end) = default_leave_range(date(2025, 1, 15), &BenefitPolicy::default());
        assert_eq!(start, date(2025, 1, 15));
        assert_eq!(end, date(2025, 7, 15));
    }

    #[test]
    fn test_default_range_clamps_to_month_end() {
        let (_, end) = default_leave_range(date(2025, 8, 31), &BenefitPolicy::default());
        assert_eq!(end, date(2026, 2, 28));
    }

    #[test]
    fn test_default_range_respects_minimum_duration() {
        let policy = BenefitPolicy {
            min_duration_days: 400,
            ..BenefitPolicy::default()
        };
        let today = date(2025, 1, 1);
        let (_, end) = default_leave_range(today, &policy);

        assert_eq!(end, add_days(today, 399));
    }

    #[test]
    fn test_salary_months_within_year() {
        let months = salary_months(date(2024, 10, 1));
        assert_eq!(
            months,
            vec![
                (2024, 9),
                (2024, 8),
                (2024, 7),
                (2024, 6),
                (2024, 5),
                (2024, 4)
            ]
        );
    }

    #[test]
    fn test_salary_months_cross_year() {
        let months = salary_months(date(2024, 1, 31));
        assert_eq!(months.len(), 6);
        assert_eq!(months[0], (2023, 12));
        assert_eq!(months[5], (2023, 7));
    }
}

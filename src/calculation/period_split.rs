//! Benefit period classification.
//!
//! Every leave day has a 1-based ordinal position within the whole leave
//! span. Days up to the first-period threshold belong to the first period,
//! later days to the second. Classification is a pure function of the
//! ordinal, so a month's days split into at most one first-period run
//! followed by one second-period run.

use chrono::NaiveDate;

use crate::models::BenefitPeriod;

use super::calendar::{MonthSpan, inclusive_day_count};

/// Returns the 1-based ordinal of `date` within a leave span starting at `leave_start`.
pub fn leave_day_ordinal(leave_start: NaiveDate, date: NaiveDate) -> i64 {
    inclusive_day_count(leave_start, date)
}

/// Classifies a leave day by its ordinal position.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::calculation::classify_leave_day;
/// use childcare_benefit_engine::models::BenefitPeriod;
///
/// assert_eq!(classify_leave_day(180, 180), BenefitPeriod::First);
/// assert_eq!(classify_leave_day(181, 180), BenefitPeriod::Second);
/// ```
pub fn classify_leave_day(ordinal: i64, threshold: u32) -> BenefitPeriod {
    if ordinal <= i64::from(threshold) {
        BenefitPeriod::First
    } else {
        BenefitPeriod::Second
    }
}

/// The number of days of a month span falling in each benefit period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSplit {
    /// Days paid at the first-period rate.
    pub first_days: u32,
    /// Days paid at the second-period rate.
    pub second_days: u32,
}

impl PeriodSplit {
    /// Returns true if any day of the span is in the first period.
    pub fn contains_first_period(&self) -> bool {
        self.first_days > 0
    }
}

/// Splits a month span into first-period and second-period days.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::calculation::{month_spans, split_by_period};
/// use chrono::NaiveDate;
///
/// let leave_start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
/// let leave_end = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();
///
/// let september = month_spans(leave_start, leave_end).last().unwrap();
/// let split = split_by_period(&september, leave_start, 180);
/// assert_eq!(split.first_days, 27);
/// assert_eq!(split.second_days, 3);
/// ```
pub fn split_by_period(span: &MonthSpan, leave_start: NaiveDate, threshold: u32) -> PeriodSplit {
    let days = span.days();
    let days_before_span = leave_day_ordinal(leave_start, span.first_day) - 1;
    let first_remaining = (i64::from(threshold) - days_before_span).max(0);
    let first_days = u32::try_from(first_remaining.min(i64::from(days))).unwrap_or(days);

    PeriodSplit {
        first_days,
        second_days: days - first_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::month_spans;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn splits(start: NaiveDate, end: NaiveDate, threshold: u32) -> Vec<PeriodSplit> {
        month_spans(start, end)
            .map(|span| split_by_period(&span, start, threshold))
            .collect()
    }

    #[test]
    fn test_first_day_has_ordinal_one() {
        let start = date(2024, 4, 1);
        assert_eq!(leave_day_ordinal(start, start), 1);
        assert_eq!(leave_day_ordinal(start, date(2024, 9, 27)), 180);
    }

    #[test]
    fn test_threshold_day_is_first_period() {
        assert_eq!(classify_leave_day(1, 180), BenefitPeriod::First);
        assert_eq!(classify_leave_day(180, 180), BenefitPeriod::First);
        assert_eq!(classify_leave_day(181, 180), BenefitPeriod::Second);
    }

    #[test]
    fn test_short_leave_is_all_first_period() {
        let result = splits(date(2024, 5, 1), date(2024, 5, 30), 180);
        assert_eq!(
            result,
            vec![PeriodSplit {
                first_days: 30,
                second_days: 0
            }]
        );
    }

    #[test]
    fn test_boundary_month_is_split() {
        let result = splits(date(2024, 4, 1), date(2024, 9, 30), 180);

        assert_eq!(result.len(), 6);
        for split in &result[..5] {
            assert_eq!(split.second_days, 0);
        }
        assert_eq!(result[5].first_days, 27);
        assert_eq!(result[5].second_days, 3);
    }

    #[test]
    fn test_months_after_boundary_are_second_period() {
        let result = splits(date(2024, 1, 1), date(2024, 12, 31), 180);

        let first: u32 = result.iter().map(|s| s.first_days).sum();
        let second: u32 = result.iter().map(|s| s.second_days).sum();
        assert_eq!(first, 180);
        assert_eq!(second, 186);

        let december = result.last().unwrap();
        assert!(!december.contains_first_period());
        assert_eq!(december.second_days, 31);
    }

    #[test]
    fn test_matches_day_by_day_classification() {
        let start = date(2023, 11, 17);
        let end = date(2024, 8, 3);

        for span in month_spans(start, end) {
            let split = split_by_period(&span, start, 180);
            let mut first = 0;
            let mut day = span.first_day;
            while day <= span.last_day {
                if classify_leave_day(leave_day_ordinal(start, day), 180) == BenefitPeriod::First {
                    first += 1;
                }
                day = day.succ_opt().unwrap();
            }
            assert_eq!(split.first_days, first, "month {}-{}", span.year, span.month);
            assert_eq!(split.first_days + split.second_days, span.days());
        }
    }
}

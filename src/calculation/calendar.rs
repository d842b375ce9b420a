//! Calendar utilities and month segmentation.
//!
//! This module provides the date arithmetic used by the benefit calculation:
//! days in a month, inclusive day counts, date offsets, and splitting a
//! leave span at calendar month boundaries.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Returns the number of days in a Gregorian month.
///
/// `month` is 1-based. Returns 0 for a month outside 1-12 or a year
/// outside the representable range.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::calculation::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2), 29);
/// assert_eq!(days_in_month(2023, 2), 28);
/// assert_eq!(days_in_month(1900, 2), 28);
/// assert_eq!(days_in_month(2000, 2), 29);
/// ```
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next_first)) => {
            u32::try_from(next_first.signed_duration_since(first).num_days()).unwrap_or(0)
        }
        _ => 0,
    }
}

/// Returns the number of calendar days from `start` to `end`, counting both ends.
///
/// `NaiveDate` carries no time or zone, so the count depends on the
/// calendar dates alone. The result is zero or negative when `end`
/// precedes `start`.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::calculation::inclusive_day_count;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2023, 12, 30).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
/// assert_eq!(inclusive_day_count(start, end), 4);
/// assert_eq!(inclusive_day_count(start, start), 1);
/// ```
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days() + 1
}

/// Returns the date `days` days after `date`; negative values go backwards.
///
/// Saturates at the representable date range instead of panicking.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::calculation::add_days;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
/// assert_eq!(add_days(date, 1), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(add_days(date, -28), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
/// ```
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let offset = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(offset).unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_days(offset).unwrap_or(NaiveDate::MIN)
    }
}

/// The part of a leave span that falls within one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSpan {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// First leave day in this month.
    pub first_day: NaiveDate,
    /// Last leave day in this month.
    pub last_day: NaiveDate,
}

impl MonthSpan {
    /// Returns the number of leave days in this month.
    pub fn days(&self) -> u32 {
        u32::try_from(inclusive_day_count(self.first_day, self.last_day).max(0)).unwrap_or(0)
    }
}

/// Iterator over the calendar months of an inclusive date range.
///
/// Produced by [`month_spans`]. Yields nothing for a reversed range.
#[derive(Debug, Clone)]
pub struct MonthSpans {
    next_start: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for MonthSpans {
    type Item = MonthSpan;

    fn next(&mut self) -> Option<MonthSpan> {
        let start = self.next_start?;
        if start > self.end {
            self.next_start = None;
            return None;
        }

        let month_end = start
            .with_day(days_in_month(start.year(), start.month()))
            .unwrap_or(self.end);
        let last_day = month_end.min(self.end);

        self.next_start = if last_day < self.end {
            last_day.succ_opt()
        } else {
            None
        };

        Some(MonthSpan {
            year: start.year(),
            month: start.month(),
            first_day: start,
            last_day,
        })
    }
}

/// Splits the inclusive range `start..=end` at calendar month boundaries.
///
/// The first span starts at `start`, the last ends at `end`, and every
/// span in between covers a whole month.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::calculation::month_spans;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2023, 12, 15).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
///
/// let spans: Vec<_> = month_spans(start, end).collect();
/// assert_eq!(spans.len(), 2);
/// assert_eq!(spans[0].days(), 17);
/// assert_eq!(spans[1].days(), 15);
/// ```
pub fn month_spans(start: NaiveDate, end: NaiveDate) -> MonthSpans {
    MonthSpans {
        next_start: Some(start),
        end,
    }
}

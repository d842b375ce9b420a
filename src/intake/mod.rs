//! Request intake for the Childcare Benefit Engine.
//!
//! This module sits between a front end and the engine: it validates a raw
//! [`LeaveRequest`], averages the six monthly salaries, raises warnings for
//! top-up grant conditions that will not be met, and supplies the initial
//! form values.

mod defaults;
mod request;

pub use defaults::{DEFAULT_LEAVE_MONTHS, default_leave_range, salary_months};
pub use request::{
    LeaveRequest, SALARY_MONTHS, TOP_UP_MIN_DURATION_NOT_MET, TOP_UP_SPOUSE_CONDITION_NOT_MET,
    ValidatedRequest, average_salary, calculate,
};

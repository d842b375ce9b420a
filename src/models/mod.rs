//! Core data models for the Childcare Benefit Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_input;
mod calculation_result;

pub use calculation_input::CalculationInput;
pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, BenefitPeriod, CalculationResult, MonthlyBreakdown,
    PeriodBreakdown, TopUpGrantResult,
};

//! Configuration types for benefit calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata about the benefit scheme.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemeMetadata {
    /// Short identifier of the scheme (e.g., "ikuji-kyugyo").
    pub code: String,
    /// The human-readable name of the scheme.
    pub name: String,
    /// The version or revision date of the scheme rules.
    pub version: String,
    /// URL to the official scheme documentation.
    pub source_url: String,
}

/// The regulatory constants driving one benefit calculation.
///
/// Monetary values are in yen. Rates are fractions (0.67 for 67%).
/// Values change by regulation, typically every August for the wage
/// limits, so each policy records the date it takes effect.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::config::BenefitPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = BenefitPolicy::default();
/// assert_eq!(policy.standard_upper_limit, Decimal::from(16860));
/// assert_eq!(policy.first_period_threshold, 180);
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitPolicy {
    /// The date from which these values apply.
    pub effective_date: NaiveDate,
    /// Minimum daily wage, shared by the standard benefit and the top-up grant.
    pub lower_limit: Decimal,
    /// Maximum daily wage for the standard 67%/50% benefit.
    pub standard_upper_limit: Decimal,
    /// Maximum daily wage for the top-up grant.
    pub grant_upper_limit: Decimal,
    /// Benefit rate for leave days up to the first-period threshold.
    pub first_period_rate: Decimal,
    /// Benefit rate for leave days after the first-period threshold.
    pub second_period_rate: Decimal,
    /// Last ordinal leave day paid at the first-period rate.
    pub first_period_threshold: u32,
    /// Monthly ceiling for a month containing any first-period day.
    pub first_period_monthly_cap: Decimal,
    /// Monthly ceiling for a month containing only second-period days.
    pub second_period_monthly_cap: Decimal,
    /// Divisor turning a monthly salary or cap into a daily figure.
    pub days_per_month_divisor: u32,
    /// Top-up grant rate.
    pub additional_rate: Decimal,
    /// Maximum number of days covered by the top-up grant.
    pub max_grant_days: u32,
    /// Minimum leave length for the applicant to qualify for the top-up grant.
    pub min_duration_days: u32,
}

impl Default for BenefitPolicy {
    fn default() -> Self {
        Self {
            effective_date: NaiveDate::from_ymd_opt(2023, 8, 1).expect("valid date"),
            lower_limit: Decimal::from(2746),
            standard_upper_limit: Decimal::from(16860),
            grant_upper_limit: Decimal::from(15690),
            first_period_rate: Decimal::new(67, 2),
            second_period_rate: Decimal::new(50, 2),
            first_period_threshold: 180,
            first_period_monthly_cap: Decimal::from(310143),
            second_period_monthly_cap: Decimal::from(231450),
            days_per_month_divisor: 30,
            additional_rate: Decimal::new(13, 2),
            max_grant_days: 28,
            min_duration_days: 14,
        }
    }
}

impl BenefitPolicy {
    /// Checks that the policy values are mutually consistent.
    ///
    /// The lower limit must not exceed either upper limit, the grant
    /// upper limit must not exceed the standard one, rates must lie in
    /// `[0, 1]`, caps must be non-negative and the divisor and minimum
    /// duration must be positive.
    pub fn validate(&self) -> EngineResult<()> {
        if self.lower_limit < Decimal::ZERO {
            return Err(invalid("lower_limit", "must not be negative"));
        }
        if self.grant_upper_limit < self.lower_limit {
            return Err(invalid(
                "grant_upper_limit",
                format!(
                    "{} is below lower_limit {}",
                    self.grant_upper_limit, self.lower_limit
                ),
            ));
        }
        if self.standard_upper_limit < self.grant_upper_limit {
            return Err(invalid(
                "standard_upper_limit",
                format!(
                    "{} is below grant_upper_limit {}",
                    self.standard_upper_limit, self.grant_upper_limit
                ),
            ));
        }

        let rates = [
            ("first_period_rate", self.first_period_rate),
            ("second_period_rate", self.second_period_rate),
            ("additional_rate", self.additional_rate),
        ];
        for (field, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(invalid(field, format!("{} is outside [0, 1]", rate)));
            }
        }

        if self.first_period_monthly_cap < Decimal::ZERO {
            return Err(invalid("first_period_monthly_cap", "must not be negative"));
        }
        if self.second_period_monthly_cap < Decimal::ZERO {
            return Err(invalid("second_period_monthly_cap", "must not be negative"));
        }
        if self.days_per_month_divisor == 0 {
            return Err(invalid("days_per_month_divisor", "must be positive"));
        }
        if self.min_duration_days == 0 {
            return Err(invalid("min_duration_days", "must be positive"));
        }

        Ok(())
    }

    /// Returns the divisor as a decimal.
    pub fn divisor(&self) -> Decimal {
        Decimal::from(self.days_per_month_divisor)
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidPolicy {
        field: field.to_string(),
        message: message.into(),
    }
}

/// The complete benefit configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct BenefitConfig {
    /// Scheme metadata.
    metadata: SchemeMetadata,
    /// Policies by effective date (sorted oldest first).
    policies: Vec<BenefitPolicy>,
}

impl BenefitConfig {
    /// Creates a new BenefitConfig from its component parts.
    pub fn new(metadata: SchemeMetadata, policies: Vec<BenefitPolicy>) -> Self {
        let mut sorted_policies = policies;
        sorted_policies.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            policies: sorted_policies,
        }
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.metadata
    }

    /// Returns all policies, oldest first.
    pub fn policies(&self) -> &[BenefitPolicy] {
        &self.policies
    }
}

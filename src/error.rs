//! Error types for the Childcare Benefit Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The benefit computation itself is total and never fails; errors only
//! arise while loading policy configuration or validating a raw request.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Childcare Benefit Engine.
///
/// # Example
///
/// ```
/// use childcare_benefit_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/scheme.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/scheme.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No benefit policy is effective on the requested date.
    #[error("No benefit policy effective on {date}")]
    PolicyNotFound {
        /// The date for which a policy was requested.
        date: NaiveDate,
    },

    /// A loaded benefit policy has inconsistent values.
    #[error("Invalid policy field '{field}': {message}")]
    InvalidPolicy {
        /// The policy field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A leave request failed validation before calculation.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The request field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

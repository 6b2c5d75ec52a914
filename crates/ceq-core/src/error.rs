//! # Error Hierarchy
//!
//! Structured error types for the equivalence engine, built with `thiserror`.
//!
//! The decision tree itself is total: every input reaches a classification.
//! Errors exist only at the boundary, where callers construct inputs and
//! load calibration files. Each variant carries the rejected value so that
//! the caller can see exactly what was refused.

use thiserror::Error;

/// Top-level error type for the equivalence engine.
#[derive(Error, Debug)]
pub enum CeqError {
    /// Input or configuration validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A configuration document could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Precondition violations on engine inputs.
///
/// None of these are raised by the decision tree. They are reported by the
/// checked constructors ([`FunctionalTest::new`](crate::FunctionalTest::new),
/// [`JurisdictionId::new`](crate::JurisdictionId::new)) and by calibration
/// validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Reliability rate outside the closed unit interval.
    #[error("invalid reliability rate: {0} (expected a value in [0.0, 1.0])")]
    InvalidReliabilityRate(f64),

    /// Procedural friction string is not one of the known levels.
    #[error("invalid procedural friction: \"{0}\" (expected low, standard, or high)")]
    InvalidFriction(String),

    /// Iteration threshold below one.
    #[error("invalid iteration threshold: {0} (expected N >= 1)")]
    InvalidIterationThreshold(u32),

    /// Jurisdiction identifier is empty.
    #[error("invalid jurisdiction ID: must be non-empty")]
    InvalidJurisdictionId,

    /// A calibration parameter is out of range or inconsistent.
    #[error("invalid calibration field {field}: {reason}")]
    InvalidCalibration {
        /// The offending field name.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

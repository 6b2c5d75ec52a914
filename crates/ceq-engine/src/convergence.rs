//! # Legal Convergence Vector
//!
//! `V_legal = d(t1) - d(t2)`: the change in distance for the same concept
//! pair between two points in time. A positive vector means the legal
//! orders moved closer (harmonization); a negative one means drift.
//!
//! Inputs are expected in `[0.0, 3.0]` by convention but are not validated.
//! There are no error conditions.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// |V| at or above which a change counts as High.
pub const HIGH_MAGNITUDE: f64 = 1.5;

/// Sign of the vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceDirection {
    /// Distance shrank.
    Convergence,
    /// Distance grew.
    Divergence,
    /// No net change.
    Stable,
}

impl fmt::Display for ConvergenceDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Convergence => write!(f, "Convergence"),
            Self::Divergence => write!(f, "Divergence"),
            Self::Stable => write!(f, "Stable Equivalence"),
        }
    }
}

/// Size of a non-zero change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceMagnitude {
    /// |V| >= 1.5
    High,
    /// 0 < |V| < 1.5
    Incremental,
}

impl ConvergenceMagnitude {
    fn of(value: f64) -> Self {
        if value.abs() >= HIGH_MAGNITUDE {
            Self::High
        } else {
            Self::Incremental
        }
    }
}

impl fmt::Display for ConvergenceMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Incremental => write!(f, "Incremental"),
        }
    }
}

/// A distance score observed at a date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceMeasurement {
    /// Distance score at that date.
    pub distance: f64,
    /// When the distance was measured.
    pub measured_at: NaiveDate,
}

/// Classified change in distance between two measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceVector {
    /// `d_t1 - d_t2`.
    pub value: f64,
    /// Sign classification.
    pub direction: ConvergenceDirection,
    /// `None` when stable.
    pub magnitude: Option<ConvergenceMagnitude>,
    /// Human-readable interpretation.
    pub interpretation: String,
}

impl ConvergenceVector {
    /// Vector from the distance before (`d_t1`) and after (`d_t2`) a change.
    pub fn compute(d_t1: f64, d_t2: f64) -> Self {
        let value = d_t1 - d_t2;
        // NaN compares false both ways and lands in the stable branch.
        let (direction, magnitude, interpretation) = if value > 0.0 {
            let magnitude = ConvergenceMagnitude::of(value);
            (
                ConvergenceDirection::Convergence,
                Some(magnitude),
                format!("Legal Convergence (+{value:.1}) - {magnitude} harmonization"),
            )
        } else if value < 0.0 {
            let magnitude = ConvergenceMagnitude::of(value);
            (
                ConvergenceDirection::Divergence,
                Some(magnitude),
                format!("Legal Divergence ({value:.1}) - {magnitude} drift"),
            )
        } else {
            (
                ConvergenceDirection::Stable,
                None,
                "Stable Equivalence (0.0) - No net change or Feature Shift".to_string(),
            )
        };
        Self {
            value,
            direction,
            magnitude,
            interpretation,
        }
    }

    /// Vector between two dated measurements, taken in chronological order
    /// whatever order they are passed in. Same-day measurements keep the
    /// argument order.
    pub fn between(a: &DistanceMeasurement, b: &DistanceMeasurement) -> Self {
        let (earlier, later) = if b.measured_at < a.measured_at {
            (b, a)
        } else {
            (a, b)
        };
        tracing::debug!(
            from = %earlier.measured_at,
            to = %later.measured_at,
            d_t1 = earlier.distance,
            d_t2 = later.distance,
            "computing convergence vector"
        );
        Self::compute(earlier.distance, later.distance)
    }
}

impl fmt::Display for ConvergenceVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.interpretation)
    }
}

/// `(V_legal, interpretation)` for distances at T1 (before) and T2 (after).
pub fn calculate_convergence_vector(d_t1: f64, d_t2: f64) -> (f64, String) {
    let vector = ConvergenceVector::compute(d_t1, d_t2);
    (vector.value, vector.interpretation)
}

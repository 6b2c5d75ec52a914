//! # Functional Test Data
//!
//! The optional evidence that drives Gates 2 and 3: how reliably two
//! concepts produce the same outcome on a fact pattern, and at what
//! procedural cost.
//!
//! ## Validation
//!
//! [`FunctionalTest::new`] enforces the documented ranges, and deserialization
//! goes through it too. The fields are public, so a caller can still build an
//! out-of-range value by struct literal; the engine does not re-check and
//! such a value simply lands in whichever branch the raw comparisons select
//! (a negative reliability rate is non-convergent).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Institutional overhead required to obtain the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProceduralFriction {
    /// The outcome is the ordinary operating mode (e.g. a single chamber ruling).
    Low,
    /// Ordinary procedural cost.
    Standard,
    /// The outcome requires exceptional machinery (e.g. convening a plenary court).
    High,
}

impl ProceduralFriction {
    /// Lowercase label used in traces and rationales.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Standard => "standard",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ProceduralFriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProceduralFriction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "standard" => Ok(Self::Standard),
            "high" => Ok(Self::High),
            _ => Err(ValidationError::InvalidFriction(s.to_string())),
        }
    }
}

/// Outcome-convergence evidence for a concept pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFunctionalTest")]
pub struct FunctionalTest {
    /// The fact pattern both concepts were applied to.
    pub fact_pattern: String,
    /// Share of cases producing the same outcome, in `[0.0, 1.0]`.
    pub reliability_rate: f64,
    /// Procedural cost of reaching the outcome.
    pub procedural_friction: ProceduralFriction,
    /// Number of decisions needed before the outcome binds (N=1 for a
    /// single binding precedent).
    pub iteration_threshold: u32,
}

impl FunctionalTest {
    /// Construct a functional test, checking every range precondition.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidReliabilityRate`] if the rate is outside
    /// `[0.0, 1.0]` (NaN included), [`ValidationError::InvalidIterationThreshold`]
    /// if the threshold is zero.
    pub fn new(
        fact_pattern: impl Into<String>,
        reliability_rate: f64,
        procedural_friction: ProceduralFriction,
        iteration_threshold: u32,
    ) -> Result<Self, ValidationError> {
        let test = Self {
            fact_pattern: fact_pattern.into(),
            reliability_rate,
            procedural_friction,
            iteration_threshold,
        };
        test.validate()?;
        Ok(test)
    }

    /// Check the range preconditions on an already-built value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.reliability_rate) {
            return Err(ValidationError::InvalidReliabilityRate(
                self.reliability_rate,
            ));
        }
        if self.iteration_threshold < 1 {
            return Err(ValidationError::InvalidIterationThreshold(
                self.iteration_threshold,
            ));
        }
        Ok(())
    }

    /// Reliability rate as a percentage, for traces.
    pub fn reliability_percent(&self) -> f64 {
        self.reliability_rate * 100.0
    }
}

/// Wire shape of a [`FunctionalTest`] before range checks.
#[derive(Deserialize)]
struct RawFunctionalTest {
    fact_pattern: String,
    reliability_rate: f64,
    procedural_friction: ProceduralFriction,
    iteration_threshold: u32,
}

impl TryFrom<RawFunctionalTest> for FunctionalTest {
    type Error = ValidationError;

    fn try_from(raw: RawFunctionalTest) -> Result<Self, Self::Error> {
        Self::new(
            raw.fact_pattern,
            raw.reliability_rate,
            raw.procedural_friction,
            raw.iteration_threshold,
        )
    }
}

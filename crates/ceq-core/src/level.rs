//! # Equivalence Levels — Single Source of Truth
//!
//! Defines the [`EquivalenceLevel`] taxonomy with all 8 variants. Each level
//! owns the inclusive distance band its scores must fall in, so the band
//! table lives in exactly one place and every `match` on the level is
//! exhaustive.
//!
//! ```text
//! 0.0        0.1 ─ 0.4   0.5 ─ 1.4   1.5 ─ 1.9   2.0 ─ 2.1   2.2 ─ 2.7   2.8 ─ 2.9   3.0
//! Total      F-Strong    F-Standard  F-Weak      P-Strong    P-Standard  P-Weak      NoDirect
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inclusive range of distance scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceBand {
    /// Lowest score in the band.
    pub min: f64,
    /// Highest score in the band.
    pub max: f64,
}

impl DistanceBand {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `score` lies within the band, bounds included.
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }
}

/// The coarse family a level belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquivalenceCategory {
    /// Perfect substitution.
    Total,
    /// Same practical outcome despite formal differences.
    Functional,
    /// Structural or purposive overlap without outcome convergence.
    Partial,
    /// No basis for comparison (Category Error).
    NoDirect,
}

/// Classification assigned to a concept pair. Exactly one per analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquivalenceLevel {
    /// Superimposable concepts, d = 0.0.
    Total,
    /// Functional equivalent, d in 0.1–0.4.
    FunctionalStrong,
    /// Functional equivalent, d in 0.5–1.4.
    FunctionalStandard,
    /// Functional equivalent, d in 1.5–1.9.
    FunctionalWeak,
    /// Partial equivalent, d in 2.0–2.1.
    PartialStrong,
    /// Partial equivalent, d in 2.2–2.7.
    PartialStandard,
    /// Partial equivalent, d in 2.8–2.9.
    PartialWeak,
    /// Category Error, d = 3.0.
    NoDirect,
}

impl EquivalenceLevel {
    /// All levels, ordered from closest to most distant.
    pub fn all() -> &'static [EquivalenceLevel] {
        &[
            Self::Total,
            Self::FunctionalStrong,
            Self::FunctionalStandard,
            Self::FunctionalWeak,
            Self::PartialStrong,
            Self::PartialStandard,
            Self::PartialWeak,
            Self::NoDirect,
        ]
    }

    /// The total number of levels.
    pub const COUNT: usize = 8;

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Total => "Total Legal Equivalent",
            Self::FunctionalStrong => "Strong Functional Equivalent",
            Self::FunctionalStandard => "Standard Functional Equivalent",
            Self::FunctionalWeak => "Weak Functional Equivalent",
            Self::PartialStrong => "Strong Partial Equivalent",
            Self::PartialStandard => "Standard Partial Equivalent",
            Self::PartialWeak => "Weak Partial Equivalent",
            Self::NoDirect => "No Direct Legal Equivalent",
        }
    }

    /// Inclusive distance band for scores at this level.
    pub fn band(self) -> DistanceBand {
        match self {
            Self::Total => DistanceBand::new(0.0, 0.0),
            Self::FunctionalStrong => DistanceBand::new(0.1, 0.4),
            Self::FunctionalStandard => DistanceBand::new(0.5, 1.4),
            Self::FunctionalWeak => DistanceBand::new(1.5, 1.9),
            Self::PartialStrong => DistanceBand::new(2.0, 2.1),
            Self::PartialStandard => DistanceBand::new(2.2, 2.7),
            Self::PartialWeak => DistanceBand::new(2.8, 2.9),
            Self::NoDirect => DistanceBand::new(3.0, 3.0),
        }
    }

    /// The family this level belongs to.
    pub fn category(self) -> EquivalenceCategory {
        match self {
            Self::Total => EquivalenceCategory::Total,
            Self::FunctionalStrong | Self::FunctionalStandard | Self::FunctionalWeak => {
                EquivalenceCategory::Functional
            }
            Self::PartialStrong | Self::PartialStandard | Self::PartialWeak => {
                EquivalenceCategory::Partial
            }
            Self::NoDirect => EquivalenceCategory::NoDirect,
        }
    }
}

impl fmt::Display for EquivalenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//! # Finalizers
//!
//! Map a provisional score onto a level and its confidence-interval label.
//! Upper bounds are inclusive.
//!
//! | finalizer | score ≤ | level | interval |
//! |---|---|---|---|
//! | partial | 2.1 | `PartialStrong` | 2.0-2.1 |
//! | partial | 2.7 | `PartialStandard` | 2.2-2.7 |
//! | partial | else | `PartialWeak` | 2.8-2.9 |
//! | functional | 0.4 | `FunctionalStrong` | 0.1-0.4 |
//! | functional | 1.4 | `FunctionalStandard` | 0.5-1.4 |
//! | functional | else | `FunctionalWeak` | 1.5-1.9 |

use ceq_core::EquivalenceLevel;

use crate::engine::EquivalenceResult;

const PARTIAL_SUFFIX: &str = " (Structural overlap but functional divergence)";
const FUNCTIONAL_SUFFIX: &str = " (Same practical outcome despite formal differences)";

/// `"d = 2.0-2.1"`-style label for a level's band.
pub fn interval_label(level: EquivalenceLevel) -> String {
    let band = level.band();
    if band.min == band.max {
        format!("d = {:.1}", band.min)
    } else {
        format!("d = {:.1}-{:.1}", band.min, band.max)
    }
}

/// Level for a partial score.
pub fn partial_level(score: f64) -> EquivalenceLevel {
    if score <= 2.1 {
        EquivalenceLevel::PartialStrong
    } else if score <= 2.7 {
        EquivalenceLevel::PartialStandard
    } else {
        EquivalenceLevel::PartialWeak
    }
}

/// Level for a functional score.
pub fn functional_level(score: f64) -> EquivalenceLevel {
    if score <= 0.4 {
        EquivalenceLevel::FunctionalStrong
    } else if score <= 1.4 {
        EquivalenceLevel::FunctionalStandard
    } else {
        EquivalenceLevel::FunctionalWeak
    }
}

/// Finalize as a Partial Equivalent. Always `step_reached = 2`.
pub fn finalize_partial(score: f64, rationale: &str) -> EquivalenceResult {
    let level = partial_level(score);
    EquivalenceResult {
        distance_score: score,
        level,
        confidence_interval: interval_label(level),
        rationale: format!("{rationale}{PARTIAL_SUFFIX}"),
        step_reached: 2,
    }
}

/// Finalize as a Functional Equivalent. Always `step_reached = 3`.
pub fn finalize_functional(score: f64, rationale: &str) -> EquivalenceResult {
    let level = functional_level(score);
    EquivalenceResult {
        distance_score: score,
        level,
        confidence_interval: interval_label(level),
        rationale: format!("{rationale}{FUNCTIONAL_SUFFIX}"),
        step_reached: 3,
    }
}

//! # ceq-engine — Computational Equivalence Engine
//!
//! Classifies a pair of [`LegalConcept`](ceq_core::LegalConcept)s from
//! different jurisdictions into the 8-level
//! [`EquivalenceLevel`](ceq_core::EquivalenceLevel) taxonomy and assigns a
//! distance score `d ∈ [0.0, 3.0]` (0.0 identical, 3.0 unrelated).
//!
//! ## Decision Tree
//!
//! ```text
//!            ┌────────────────────┐
//!            │ Gate 1: core       │── no shared elements, no shared objective ──▶ NO_DIRECT (d = 3.0)
//!            │ feature filter     │
//!            └─────────┬──────────┘
//!                      │ provisional partial score (2.0 / 2.5 / 2.9)
//!                      ▼
//!            ┌────────────────────┐
//!            │ Gate 2: same       │── no functional data, or reliability < 85% ──▶ PARTIAL_*
//!            │ outcome filter     │
//!            └─────────┬──────────┘
//!                      │ functional score (0.15 / 0.35 / 1.0 / 1.7)
//!                      ▼
//!            ┌────────────────────┐
//!            │ Gate 3: perfect    │── elements, objective and zero friction all match ──▶ TOTAL (d = 0.0)
//!            │ substitution       │
//!            └─────────┬──────────┘
//!                      ▼
//!                FUNCTIONAL_*
//! ```
//!
//! The output is advisory. It carries no legal authority and is meant for
//! review by a qualified legal professional.
//!
//! ## Trace
//!
//! Every [`EquivalenceEngine::analyze`] call returns its own
//! [`AnalysisLog`] inside the [`Analysis`], so an engine holds no mutable
//! state and can be shared freely between threads.

pub mod calibration;
pub mod convergence;
pub mod engine;
pub mod finalize;
pub mod gates;
pub mod similarity;
pub mod trace;

// Re-export primary types.
pub use calibration::{format_percent, Calibration};
pub use convergence::{
    calculate_convergence_vector, ConvergenceDirection, ConvergenceMagnitude, ConvergenceVector,
    DistanceMeasurement,
};
pub use engine::{Analysis, EquivalenceEngine, EquivalenceResult};
pub use similarity::{KeywordOverlap, ObjectiveSimilarity};
pub use trace::AnalysisLog;

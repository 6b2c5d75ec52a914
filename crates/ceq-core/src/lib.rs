#![deny(missing_docs)]

//! # ceq-core — Foundational Types for the Computational Equivalence Engine
//!
//! This crate defines the value types that the decision procedure in
//! `ceq-engine` consumes and produces. It has no internal crate
//! dependencies; it uses only `serde`, `serde_json` and `thiserror`.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** A [`JurisdictionId`] is not
//!    a bare `String`; it is validated non-empty at construction.
//!
//! 2. **Closed variants, not open strings.** [`ProceduralFriction`] and
//!    [`EquivalenceLevel`] are enums. An unrecognized friction string is a
//!    parse error at the boundary, never a silent fall-through inside the
//!    decision tree.
//!
//! 3. **Single [`EquivalenceLevel`] enum.** One definition, 8 variants,
//!    each carrying its own distance band. Every `match` is exhaustive.
//!
//! 4. **[`CeqError`] hierarchy.** Structured errors with `thiserror`, no
//!    `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod concept;
pub mod error;
pub mod functional;
pub mod jurisdiction;
pub mod level;

// Re-export primary types at crate root for ergonomic imports.
pub use concept::LegalConcept;
pub use error::{CeqError, ValidationError};
pub use functional::{FunctionalTest, ProceduralFriction};
pub use jurisdiction::JurisdictionId;
pub use level::{DistanceBand, EquivalenceCategory, EquivalenceLevel};

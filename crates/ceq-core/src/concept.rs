//! # Legal Concepts
//!
//! A [`LegalConcept`] is the unit of comparison: a named institution of one
//! jurisdiction, described by its structure (morphology) and its purpose
//! (teleology).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::jurisdiction::JurisdictionId;

/// A legal concept under comparison.
///
/// Immutable once constructed: the engine only reads it. Constituent
/// elements are stored as an ordered set, so duplicates supplied by the
/// caller collapse and iteration order is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalConcept {
    name: String,
    jurisdiction: JurisdictionId,
    /// Morphology: the structural components of the concept.
    constituent_elements: BTreeSet<String>,
    /// Teleology: the purpose the concept serves.
    regulatory_objective: String,
}

impl LegalConcept {
    /// Build a concept from its parts.
    pub fn new<I, S>(
        name: impl Into<String>,
        jurisdiction: JurisdictionId,
        constituent_elements: I,
        regulatory_objective: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            jurisdiction,
            constituent_elements: constituent_elements.into_iter().map(Into::into).collect(),
            regulatory_objective: regulatory_objective.into(),
        }
    }

    /// The concept's name, e.g. "Recurso de Amparo".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The legal order the concept belongs to.
    pub fn jurisdiction(&self) -> &JurisdictionId {
        &self.jurisdiction
    }

    /// The constituent elements (morphology).
    pub fn constituent_elements(&self) -> &BTreeSet<String> {
        &self.constituent_elements
    }

    /// The regulatory objective (teleology).
    pub fn regulatory_objective(&self) -> &str {
        &self.regulatory_objective
    }

    /// Number of constituent elements present in both concepts.
    pub fn shared_element_count(&self, other: &LegalConcept) -> usize {
        self.constituent_elements
            .intersection(&other.constituent_elements)
            .count()
    }

    /// Whether both concepts have exactly the same constituent elements.
    pub fn elements_identical(&self, other: &LegalConcept) -> bool {
        self.constituent_elements == other.constituent_elements
    }
}

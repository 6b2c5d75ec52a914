//! # Jurisdiction Identifiers
//!
//! Every [`LegalConcept`](crate::LegalConcept) belongs to a legal order. The
//! identifier is free-form (ISO 3166-1 codes, "EU", "US-NY", "ES-TC" for a
//! constitutional court) but never empty.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The legal order a concept is drawn from.
///
/// Comparative work mixes national, sub-national and supranational orders,
/// so the code is not checked against any registry. Surrounding whitespace
/// is dropped so that `"ES"` and `" ES "` name the same order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JurisdictionId(String);

impl JurisdictionId {
    /// Build an identifier for a legal order.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidJurisdictionId`] when nothing is left after
    /// trimming: a concept cannot be compared without knowing which system
    /// it comes from.
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidJurisdictionId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The code as supplied, minus surrounding whitespace.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for JurisdictionId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<JurisdictionId> for String {
    fn from(id: JurisdictionId) -> Self {
        id.0
    }
}

impl std::fmt::Display for JurisdictionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

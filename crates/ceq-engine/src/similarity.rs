//! # Objective Similarity
//!
//! Gate 1 asks whether two regulatory objectives "substantially overlap".
//! The question sits behind the [`ObjectiveSimilarity`] trait so that a real
//! semantic-similarity service can replace the default without touching the
//! gate's control flow.
//!
//! The default, [`KeywordOverlap`], is a placeholder keyword heuristic. It
//! is not semantic analysis and is kept exactly as calibrated; do not tune
//! it for accuracy.

use std::collections::HashSet;
use std::fmt;

/// Capability deciding whether two objectives substantially overlap.
///
/// Case-insensitive equality is checked by Gate 1 before this is consulted.
pub trait ObjectiveSimilarity: Send + Sync + fmt::Debug {
    /// Whether objectives `a` and `b` substantially overlap.
    fn overlaps(&self, a: &str, b: &str) -> bool;
}

/// Keyword-overlap heuristic.
///
/// Both objectives are split on whitespace into lowercase token sets. The
/// overlap ratio is `|A ∩ B| / max(|A|, |B|)`; the objectives match when the
/// ratio strictly exceeds `min_ratio`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordOverlap {
    min_ratio: f64,
}

impl KeywordOverlap {
    /// Heuristic matching when the overlap ratio exceeds `min_ratio`.
    pub fn new(min_ratio: f64) -> Self {
        Self { min_ratio }
    }

    /// Overlap ratio of the two objectives, or `None` if both are blank.
    pub fn ratio(a: &str, b: &str) -> Option<f64> {
        let lower_a = a.to_lowercase();
        let lower_b = b.to_lowercase();
        let tokens_a: HashSet<&str> = lower_a.split_whitespace().collect();
        let tokens_b: HashSet<&str> = lower_b.split_whitespace().collect();
        let denominator = tokens_a.len().max(tokens_b.len());
        if denominator == 0 {
            return None;
        }
        let shared = tokens_a.intersection(&tokens_b).count();
        Some(shared as f64 / denominator as f64)
    }
}

impl Default for KeywordOverlap {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl ObjectiveSimilarity for KeywordOverlap {
    fn overlaps(&self, a: &str, b: &str) -> bool {
        match Self::ratio(a, b) {
            Some(ratio) => ratio > self.min_ratio,
            None => false,
        }
    }
}

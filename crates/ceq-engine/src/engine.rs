//! # Equivalence Engine
//!
//! Orchestrates the three gates for one concept pair and returns the
//! classification together with its trace.
//!
//! ## Step numbering
//!
//! `step_reached` is 1 only for a Category Error. Any partial result is 2,
//! including the case where no functional data was supplied and Gate 2
//! never ran; a functional or total result is 3.

use serde::{Deserialize, Serialize};

use ceq_core::{CeqError, EquivalenceLevel, FunctionalTest, LegalConcept};

use crate::calibration::Calibration;
use crate::finalize::{finalize_functional, finalize_partial, interval_label};
use crate::gates::{
    core_feature_filter, perfect_substitution_filter, same_outcome_filter, CoreFeatureFilter,
    SameOutcomeFilter, NO_DIRECT_SCORE, SUPERIMPOSABLE_RATIONALE, TOTAL_SCORE,
};
use crate::similarity::{KeywordOverlap, ObjectiveSimilarity};
use crate::trace::AnalysisLog;

/// Classification of one concept pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquivalenceResult {
    /// Distance score in `[0.0, 3.0]`.
    pub distance_score: f64,
    /// Assigned level.
    pub level: EquivalenceLevel,
    /// Display label such as `"d = 0.1-0.4"`.
    pub confidence_interval: String,
    /// Why the level was assigned.
    pub rationale: String,
    /// How far the decision tree progressed (1, 2 or 3).
    pub step_reached: u8,
}

impl EquivalenceResult {
    /// Whether the score lies in the band of the assigned level.
    pub fn score_within_level_band(&self) -> bool {
        self.level.band().contains(self.distance_score)
    }
}

/// Result of [`EquivalenceEngine::analyze`]: the classification and the
/// trace that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// The classification.
    pub result: EquivalenceResult,
    /// Step-by-step trace.
    pub log: AnalysisLog,
}

impl Analysis {
    /// The classification.
    pub fn result(&self) -> &EquivalenceResult {
        &self.result
    }

    /// Newline-joined trace of this analysis.
    pub fn analysis_log(&self) -> String {
        self.log.render()
    }

    /// Consume the analysis, keeping only the classification.
    pub fn into_result(self) -> EquivalenceResult {
        self.result
    }
}

/// The three-gate equivalence classifier.
///
/// Holds only immutable configuration. Generic over the objective-similarity
/// capability consulted by Gate 1.
#[derive(Debug, Clone)]
pub struct EquivalenceEngine<S = KeywordOverlap> {
    calibration: Calibration,
    similarity: S,
}

impl EquivalenceEngine<KeywordOverlap> {
    /// Engine with the default calibration and keyword-overlap heuristic.
    pub fn new() -> Self {
        let calibration = Calibration::default();
        let similarity = KeywordOverlap::new(calibration.objective_overlap_ratio);
        Self {
            calibration,
            similarity,
        }
    }

    /// Engine with a custom calibration and keyword-overlap heuristic.
    ///
    /// # Errors
    ///
    /// Returns [`CeqError::Validation`] if the calibration is inconsistent.
    pub fn with_calibration(calibration: Calibration) -> Result<Self, CeqError> {
        calibration.validate()?;
        let similarity = KeywordOverlap::new(calibration.objective_overlap_ratio);
        Ok(Self {
            calibration,
            similarity,
        })
    }
}

impl Default for EquivalenceEngine<KeywordOverlap> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ObjectiveSimilarity> EquivalenceEngine<S> {
    /// Engine with a custom objective-similarity capability.
    ///
    /// `calibration.objective_overlap_ratio` is not consulted; the
    /// capability owns its own matching rule.
    pub fn with_similarity(calibration: Calibration, similarity: S) -> Result<Self, CeqError> {
        calibration.validate()?;
        Ok(Self {
            calibration,
            similarity,
        })
    }

    /// The thresholds in use.
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Run the decision tree on a concept pair.
    ///
    /// `functional_test` is optional; without it the analysis stops after
    /// Gate 1 with a partial classification.
    pub fn analyze(
        &self,
        concept_a: &LegalConcept,
        concept_b: &LegalConcept,
        functional_test: Option<&FunctionalTest>,
    ) -> Analysis {
        let mut log = AnalysisLog::new();
        let result = self.run(concept_a, concept_b, functional_test, &mut log);

        tracing::info!(
            concept_a = concept_a.name(),
            jurisdiction_a = %concept_a.jurisdiction(),
            concept_b = concept_b.name(),
            jurisdiction_b = %concept_b.jurisdiction(),
            equivalence_level = ?result.level,
            distance_score = result.distance_score,
            step_reached = result.step_reached,
            "equivalence analysis complete"
        );

        Analysis { result, log }
    }

    fn run(
        &self,
        concept_a: &LegalConcept,
        concept_b: &LegalConcept,
        functional_test: Option<&FunctionalTest>,
        log: &mut AnalysisLog,
    ) -> EquivalenceResult {
        let basis = match core_feature_filter(
            concept_a,
            concept_b,
            &self.calibration,
            &self.similarity,
            log,
        ) {
            CoreFeatureFilter::CategoryError { rationale } => {
                return EquivalenceResult {
                    distance_score: NO_DIRECT_SCORE,
                    level: EquivalenceLevel::NoDirect,
                    confidence_interval: interval_label(EquivalenceLevel::NoDirect),
                    rationale,
                    step_reached: 1,
                };
            }
            CoreFeatureFilter::Partial(basis) => basis,
        };

        let Some(test) = functional_test else {
            tracing::debug!("no functional test supplied; finalizing as partial");
            return finalize_partial(basis.provisional_score, &basis.rationale);
        };

        let functional = match same_outcome_filter(test, &self.calibration, log) {
            SameOutcomeFilter::Diverge { rationale } => {
                return finalize_partial(basis.provisional_score, &rationale);
            }
            SameOutcomeFilter::Converge(functional) => functional,
        };

        let check = perfect_substitution_filter(concept_a, concept_b, test, log);
        if check.is_perfect() {
            return EquivalenceResult {
                distance_score: TOTAL_SCORE,
                level: EquivalenceLevel::Total,
                confidence_interval: interval_label(EquivalenceLevel::Total),
                rationale: SUPERIMPOSABLE_RATIONALE.to_string(),
                step_reached: 3,
            };
        }

        finalize_functional(functional.functional_score, &functional.rationale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ceq_core::{JurisdictionId, ProceduralFriction};

    fn concept(name: &str, jurisdiction: &str, elements: &[&str], objective: &str) -> LegalConcept {
        LegalConcept::new(
            name,
            JurisdictionId::new(jurisdiction).unwrap(),
            elements.iter().copied(),
            objective,
        )
    }

    #[test]
    fn category_error_ignores_functional_test() {
        let a = concept("A", "ES", &["x"], "tax revenue");
        let b = concept("B", "US", &["y"], "child welfare");
        let test = FunctionalTest::new("p", 1.0, ProceduralFriction::Low, 1).unwrap();
        let analysis = EquivalenceEngine::new().analyze(&a, &b, Some(&test));
        assert_eq!(analysis.result.level, EquivalenceLevel::NoDirect);
        assert_eq!(analysis.result.distance_score, 3.0);
        assert_eq!(analysis.result.confidence_interval, "d = 3.0");
        assert_eq!(analysis.result.step_reached, 1);
        assert!(!analysis.analysis_log().contains("STEP 2"));
    }

    #[test]
    fn missing_functional_test_reports_step_two() {
        let a = concept("A", "ES", &["x", "y"], "o");
        let b = concept("B", "US", &["x"], "p");
        let analysis = EquivalenceEngine::new().analyze(&a, &b, None);
        assert_eq!(analysis.result.level, EquivalenceLevel::PartialStandard);
        assert_eq!(analysis.result.step_reached, 2);
        assert_eq!(
            analysis.result.rationale,
            "Standard feature overlap detected (1 structural + teleological alignment) \
             (Structural overlap but functional divergence)"
        );
    }

    #[test]
    fn divergence_uses_gate_two_rationale() {
        let a = concept("A", "ES", &["x", "y", "z"], "o");
        let b = concept("B", "US", &["x", "y", "z"], "p");
        let test = FunctionalTest::new("p", 0.5, ProceduralFriction::Low, 1).unwrap();
        let r = EquivalenceEngine::new().analyze(&a, &b, Some(&test)).into_result();
        assert_eq!(r.level, EquivalenceLevel::PartialStrong);
        assert_eq!(r.distance_score, 2.0);
        assert_eq!(
            r.rationale,
            "Reliability rate (50.0%) below functional threshold \
             (Structural overlap but functional divergence)"
        );
    }

    #[test]
    fn total_equivalence() {
        let a = concept("A", "ES", &["x", "y"], "Protect rights");
        let b = concept("B", "MX", &["y", "x"], "Protect rights");
        let test = FunctionalTest::new("p", 0.97, ProceduralFriction::Low, 1).unwrap();
        let analysis = EquivalenceEngine::new().analyze(&a, &b, Some(&test));
        assert_eq!(analysis.result.level, EquivalenceLevel::Total);
        assert_eq!(analysis.result.distance_score, 0.0);
        assert_eq!(analysis.result.confidence_interval, "d = 0.0");
        assert_eq!(analysis.result.rationale, SUPERIMPOSABLE_RATIONALE);
        assert_eq!(analysis.result.step_reached, 3);
    }

    #[test]
    fn functional_result_carries_gate_two_rationale() {
        let a = concept("A", "ES", &["x", "y"], "Protect rights");
        let b = concept("B", "DE", &["x"], "Protect rights");
        let test = FunctionalTest::new("p", 0.92, ProceduralFriction::Standard, 2).unwrap();
        let r = EquivalenceEngine::new().analyze(&a, &b, Some(&test)).into_result();
        assert_eq!(r.level, EquivalenceLevel::FunctionalStandard);
        assert_eq!(r.distance_score, 1.0);
        assert_eq!(r.confidence_interval, "d = 0.5-1.4");
        assert_eq!(
            r.rationale,
            "Standard functional match (reliability 92.0%, standard friction) \
             (Same practical outcome despite formal differences)"
        );
    }

    #[test]
    fn custom_calibration_moves_convergence_floor() {
        let calibration = Calibration {
            convergence_floor: 0.75,
            ..Calibration::default()
        };
        let engine = EquivalenceEngine::with_calibration(calibration).unwrap();
        let a = concept("A", "ES", &["x"], "o");
        let b = concept("B", "US", &["x"], "p");
        let test = FunctionalTest::new("p", 0.80, ProceduralFriction::Standard, 1).unwrap();
        let analysis = engine.analyze(&a, &b, Some(&test));
        assert_eq!(analysis.result.level, EquivalenceLevel::FunctionalWeak);
    }

    #[test]
    fn with_calibration_rejects_invalid() {
        let calibration = Calibration {
            strong_floor: 0.5,
            ..Calibration::default()
        };
        assert!(EquivalenceEngine::with_calibration(calibration).is_err());
    }

    #[derive(Debug)]
    struct AlwaysOverlaps;

    impl ObjectiveSimilarity for AlwaysOverlaps {
        fn overlaps(&self, _a: &str, _b: &str) -> bool {
            true
        }
    }

    #[test]
    fn similarity_capability_is_pluggable() {
        let engine =
            EquivalenceEngine::with_similarity(Calibration::default(), AlwaysOverlaps).unwrap();
        let a = concept("A", "ES", &["x"], "tax revenue");
        let b = concept("B", "US", &["y"], "child welfare");
        let r = engine.analyze(&a, &b, None).into_result();
        assert_eq!(r.level, EquivalenceLevel::PartialWeak);
        assert_eq!(r.distance_score, 2.9);
    }

    #[test]
    fn engine_is_reusable_and_traces_are_independent() {
        let engine = EquivalenceEngine::new();
        let a = concept("A", "ES", &["x"], "o");
        let b = concept("B", "US", &["y"], "p");
        let first = engine.analyze(&a, &b, None);
        let second = engine.analyze(&a, &a, None);
        assert_ne!(first.log, second.log);
        assert_eq!(
            first.analysis_log(),
            engine.analyze(&a, &b, None).analysis_log()
        );
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EquivalenceEngine>();
    }
}

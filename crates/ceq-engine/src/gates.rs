//! # Decision Gates
//!
//! The three filters of the decision tree. Each gate is a pure function of
//! its inputs plus the [`AnalysisLog`] it writes its trace into; the
//! orchestration in [`engine`](crate::engine) decides which gate runs next.
//!
//! | gate | question | outcome |
//! |---|---|---|
//! | 1. Core feature | Is there any basis for comparison? | [`CoreFeatureFilter`] |
//! | 2. Same outcome | Do the concepts reach the same result reliably? | [`SameOutcomeFilter`] |
//! | 3. Perfect substitution | Is one a drop-in replacement for the other? | [`SubstitutionCheck`] |
//!
//! Gate 1 treats objectives as matching when they are case-insensitively
//! equal or the [`ObjectiveSimilarity`] capability reports overlap. Gate 3
//! requires exact, case-sensitive equality. The asymmetry is deliberate.

use std::fmt;

use serde::{Deserialize, Serialize};

use ceq_core::{FunctionalTest, LegalConcept, ProceduralFriction};

use crate::calibration::{format_percent, Calibration};
use crate::similarity::ObjectiveSimilarity;
use crate::trace::AnalysisLog;

/// Distance score of a Category Error.
pub const NO_DIRECT_SCORE: f64 = 3.0;
/// Distance score of a perfect substitution.
pub const TOTAL_SCORE: f64 = 0.0;

/// Render a score the way traces show it: always with a fractional part.
pub(crate) fn fmt_score(score: f64) -> String {
    format!("{score:?}")
}

// ---------------------------------------------------------------------------
// Gate 1 — Core Feature Filter
// ---------------------------------------------------------------------------

/// Strength of the structural overlap found by Gate 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialStrength {
    /// Many shared elements.
    Strong,
    /// At least one shared element.
    Standard,
    /// Teleological alignment only.
    Weak,
}

impl PartialStrength {
    /// Provisional partial distance for this strength.
    pub fn provisional_score(self) -> f64 {
        match self {
            Self::Strong => 2.0,
            Self::Standard => 2.5,
            Self::Weak => 2.9,
        }
    }
}

impl fmt::Display for PartialStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strong => write!(f, "Strong"),
            Self::Standard => write!(f, "Standard"),
            Self::Weak => write!(f, "Weak"),
        }
    }
}

/// The basis for comparison Gate 1 established.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialBasis {
    /// Number of shared constituent elements.
    pub morphology_match: usize,
    /// Whether the objectives matched.
    pub teleology_match: bool,
    /// Overlap strength.
    pub strength: PartialStrength,
    /// Provisional partial distance.
    pub provisional_score: f64,
    /// Rationale carried into the partial finalizer.
    pub rationale: String,
}

/// Outcome of Gate 1.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreFeatureFilter {
    /// Neither structure nor purpose is shared. Terminal.
    CategoryError {
        /// Fixed rationale.
        rationale: String,
    },
    /// Some basis exists; the analysis continues.
    Partial(PartialBasis),
}

/// Gate 1: decide whether any basis for comparison exists.
pub fn core_feature_filter<S>(
    concept_a: &LegalConcept,
    concept_b: &LegalConcept,
    calibration: &Calibration,
    similarity: &S,
    log: &mut AnalysisLog,
) -> CoreFeatureFilter
where
    S: ObjectiveSimilarity + ?Sized,
{
    log.section("STEP 1: PARTIAL EQUIVALENCY TEST");

    let morphology_match = concept_a.shared_element_count(concept_b);
    let objective_a = concept_a.regulatory_objective();
    let objective_b = concept_b.regulatory_objective();
    let teleology_match = objective_a.to_lowercase() == objective_b.to_lowercase()
        || similarity.overlaps(objective_a, objective_b);

    log.push(format!(
        "Morphological overlap: {morphology_match} shared elements"
    ));
    log.push(format!("Teleological match: {teleology_match}"));

    tracing::debug!(
        concept_a = concept_a.name(),
        concept_b = concept_b.name(),
        morphology_match,
        teleology_match,
        "core feature filter evaluated"
    );

    if morphology_match == 0 && !teleology_match {
        log.push("RESULT: No basis for comparison (Category Error)");
        return CoreFeatureFilter::CategoryError {
            rationale: "Concepts share neither structural elements nor regulatory objectives."
                .to_string(),
        };
    }

    let strength = if morphology_match >= calibration.strong_partial_elements {
        PartialStrength::Strong
    } else if morphology_match >= 1 {
        PartialStrength::Standard
    } else {
        PartialStrength::Weak
    };
    let provisional_score = strength.provisional_score();

    log.push(format!(
        "RESULT: {strength} Partial Equivalent (provisional d = {})",
        fmt_score(provisional_score)
    ));
    log.push("→ Proceeding to Step 2");

    CoreFeatureFilter::Partial(PartialBasis {
        morphology_match,
        teleology_match,
        strength,
        provisional_score,
        rationale: format!(
            "{strength} feature overlap detected \
             ({morphology_match} structural + teleological alignment)"
        ),
    })
}

// ---------------------------------------------------------------------------
// Gate 2 — Same Outcome Filter
// ---------------------------------------------------------------------------

/// Functional tier assigned by Gate 2 to converging outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionalTier {
    /// Low friction, single binding decision: the ordinary operating mode.
    StrongConstitutional,
    /// High friction: a single decision, but only through exceptional machinery.
    StrongPlenary,
    /// Reliable convergence without the Strong preconditions.
    Standard,
    /// Convergence just above the floor.
    Weak,
}

impl FunctionalTier {
    /// Functional distance for this tier.
    pub fn functional_score(self) -> f64 {
        match self {
            Self::StrongConstitutional => 0.15,
            Self::StrongPlenary => 0.35,
            Self::Standard => 1.0,
            Self::Weak => 1.7,
        }
    }

    /// Sub-interval of the tier, as reported in the trace.
    pub fn interval(self) -> &'static str {
        match self {
            Self::StrongConstitutional => "0.1-0.2",
            Self::StrongPlenary => "0.3-0.4",
            Self::Standard => "0.5-1.4",
            Self::Weak => "1.5-1.9",
        }
    }
}

impl fmt::Display for FunctionalTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrongConstitutional => write!(f, "Strong (Constitutional)"),
            Self::StrongPlenary => write!(f, "Strong (Plenary)"),
            Self::Standard => write!(f, "Standard"),
            Self::Weak => write!(f, "Weak"),
        }
    }
}

/// Converging outcome found by Gate 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionalMatch {
    /// Assigned tier.
    pub tier: FunctionalTier,
    /// Functional distance.
    pub functional_score: f64,
    /// Rationale carried into the functional finalizer.
    pub rationale: String,
}

/// Outcome of Gate 2.
#[derive(Debug, Clone, PartialEq)]
pub enum SameOutcomeFilter {
    /// Reliability below the convergence floor.
    Diverge {
        /// Rationale reporting the rate.
        rationale: String,
    },
    /// Outcomes converge.
    Converge(FunctionalMatch),
}

/// Pick the functional tier. First matching rule wins.
pub fn functional_tier(test: &FunctionalTest, calibration: &Calibration) -> FunctionalTier {
    let rate = test.reliability_rate;
    let friction = test.procedural_friction;
    if rate > calibration.strong_floor
        && friction == ProceduralFriction::Low
        && test.iteration_threshold == 1
    {
        FunctionalTier::StrongConstitutional
    } else if rate > calibration.strong_floor && friction == ProceduralFriction::High {
        FunctionalTier::StrongPlenary
    } else if rate > calibration.standard_floor {
        FunctionalTier::Standard
    } else {
        FunctionalTier::Weak
    }
}

/// Gate 2: decide whether the concepts reach the same practical outcome.
pub fn same_outcome_filter(
    test: &FunctionalTest,
    calibration: &Calibration,
    log: &mut AnalysisLog,
) -> SameOutcomeFilter {
    let percent = test.reliability_percent();

    log.section("STEP 2: FUNCTIONAL EQUIVALENCY TEST");
    log.push(format!("Fact pattern: {}", test.fact_pattern));
    log.push(format!("Reliability rate: {percent:.1}%"));
    log.push(format!("Procedural friction: {}", test.procedural_friction));

    if test.reliability_rate < calibration.convergence_floor {
        tracing::debug!(
            reliability_rate = test.reliability_rate,
            floor = calibration.convergence_floor,
            "outcomes diverge"
        );
        log.push(format!(
            "RESULT: Outcomes diverge (reliability < {}%)",
            format_percent(calibration.convergence_floor)
        ));
        return SameOutcomeFilter::Diverge {
            rationale: format!("Reliability rate ({percent:.1}%) below functional threshold"),
        };
    }

    let tier = functional_tier(test, calibration);
    let functional_score = tier.functional_score();

    tracing::debug!(
        reliability_rate = test.reliability_rate,
        friction = %test.procedural_friction,
        iteration_threshold = test.iteration_threshold,
        tier = %tier,
        interval = tier.interval(),
        "outcomes converge"
    );

    log.push(format!(
        "RESULT: Outcomes converge - {tier} Functional Equivalent (d = {})",
        fmt_score(functional_score)
    ));
    log.push("→ Proceeding to Step 3");

    SameOutcomeFilter::Converge(FunctionalMatch {
        tier,
        functional_score,
        rationale: format!(
            "{tier} functional match (reliability {percent:.1}%, {} friction)",
            test.procedural_friction
        ),
    })
}

// ---------------------------------------------------------------------------
// Gate 3 — Perfect Substitution Filter
// ---------------------------------------------------------------------------

/// The three conditions Gate 3 checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionCheck {
    /// Constituent-element sets are equal.
    pub all_elements_match: bool,
    /// Objectives are byte-for-byte equal.
    pub objectives_identical: bool,
    /// Procedural friction is low.
    pub zero_friction: bool,
}

impl SubstitutionCheck {
    /// All three conditions hold.
    pub fn is_perfect(&self) -> bool {
        self.all_elements_match && self.objectives_identical && self.zero_friction
    }
}

/// Rationale of a confirmed perfect substitution.
pub const SUPERIMPOSABLE_RATIONALE: &str =
    "Concepts are superimposable - perfect one-to-one match in all dimensions";

/// Gate 3: decide whether the concepts are perfectly substitutable.
pub fn perfect_substitution_filter(
    concept_a: &LegalConcept,
    concept_b: &LegalConcept,
    test: &FunctionalTest,
    log: &mut AnalysisLog,
) -> SubstitutionCheck {
    log.section("STEP 3: TOTAL EQUIVALENCY TEST");

    let check = SubstitutionCheck {
        all_elements_match: concept_a.elements_identical(concept_b),
        objectives_identical: concept_a.regulatory_objective()
            == concept_b.regulatory_objective(),
        zero_friction: test.procedural_friction == ProceduralFriction::Low,
    };

    log.push(format!("All elements identical: {}", check.all_elements_match));
    log.push(format!("Objectives identical: {}", check.objectives_identical));
    log.push(format!("Zero procedural friction: {}", check.zero_friction));

    tracing::debug!(
        all_elements_match = check.all_elements_match,
        objectives_identical = check.objectives_identical,
        zero_friction = check.zero_friction,
        "perfect substitution filter evaluated"
    );

    if check.is_perfect() {
        log.push("RESULT: Perfect substitution confirmed (Total Equivalent)");
    } else {
        log.push("RESULT: Doctrinal divergence detected (not Total Equivalent)");
    }
    check
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::KeywordOverlap;
    use ceq_core::JurisdictionId;

    fn concept(elements: &[&str], objective: &str) -> LegalConcept {
        LegalConcept::new(
            "c",
            JurisdictionId::new("XX").unwrap(),
            elements.iter().copied(),
            objective,
        )
    }

    fn test_data(rate: f64, friction: ProceduralFriction, n: u32) -> FunctionalTest {
        FunctionalTest {
            fact_pattern: "pattern".into(),
            reliability_rate: rate,
            procedural_friction: friction,
            iteration_threshold: n,
        }
    }

    fn gate1(a: &LegalConcept, b: &LegalConcept) -> (CoreFeatureFilter, AnalysisLog) {
        let mut log = AnalysisLog::new();
        let out = core_feature_filter(
            a,
            b,
            &Calibration::default(),
            &KeywordOverlap::default(),
            &mut log,
        );
        (out, log)
    }

    // ── Gate 1 ──────────────────────────────────────────────────────

    #[test]
    fn category_error_without_elements_or_objective() {
        let (out, log) = gate1(
            &concept(&["a"], "tax revenue"),
            &concept(&["b"], "child welfare"),
        );
        assert!(matches!(out, CoreFeatureFilter::CategoryError { .. }));
        assert_eq!(
            log.lines().last().map(String::as_str),
            Some("RESULT: No basis for comparison (Category Error)")
        );
    }

    #[test]
    fn strength_tiers_by_shared_elements() {
        let cases: [(&[&str], PartialStrength, f64); 4] = [
            (&["a", "b", "c", "d"], PartialStrength::Strong, 2.0),
            (&["a", "b", "c"], PartialStrength::Strong, 2.0),
            (&["a", "b"], PartialStrength::Standard, 2.5),
            (&["a"], PartialStrength::Standard, 2.5),
        ];
        let other = concept(&["a", "b", "c", "d"], "x");
        for (elements, strength, score) in cases {
            let (out, _) = gate1(&concept(elements, "y"), &other);
            match out {
                CoreFeatureFilter::Partial(basis) => {
                    assert_eq!(basis.strength, strength);
                    assert_eq!(basis.provisional_score, score);
                }
                other => panic!("expected partial, got {other:?}"),
            }
        }
    }

    #[test]
    fn teleology_only_is_weak() {
        let (out, log) = gate1(
            &concept(&["a"], "Protect Rights"),
            &concept(&["b"], "protect rights"),
        );
        let CoreFeatureFilter::Partial(basis) = out else {
            panic!("expected partial");
        };
        assert_eq!(basis.strength, PartialStrength::Weak);
        assert_eq!(basis.provisional_score, 2.9);
        assert!(basis.teleology_match);
        assert_eq!(
            basis.rationale,
            "Weak feature overlap detected (0 structural + teleological alignment)"
        );
        assert!(log
            .lines()
            .contains(&"RESULT: Weak Partial Equivalent (provisional d = 2.9)".to_string()));
    }

    #[test]
    fn teleology_via_keyword_overlap() {
        let (out, _) = gate1(
            &concept(&[], "ensure effective judicial protection"),
            &concept(&[], "ensure effective judicial review"),
        );
        assert!(matches!(out, CoreFeatureFilter::Partial(_)));
    }

    #[test]
    fn gate1_trace_header_and_counts() {
        let (_, log) = gate1(&concept(&["a", "b"], "x"), &concept(&["b", "a"], "y"));
        assert_eq!(log.lines()[0], "=== STEP 1: PARTIAL EQUIVALENCY TEST ===");
        assert_eq!(log.lines()[1], "Morphological overlap: 2 shared elements");
        assert_eq!(log.lines()[2], "Teleological match: false");
        assert_eq!(log.lines()[4], "→ Proceeding to Step 2");
    }

    // ── Gate 2 ──────────────────────────────────────────────────────

    #[test]
    fn functional_tier_precedence() {
        use ProceduralFriction::{High, Low, Standard};
        let c = Calibration::default();
        let tier = |rate, friction, n| functional_tier(&test_data(rate, friction, n), &c);

        assert_eq!(tier(0.97, Low, 1), FunctionalTier::StrongConstitutional);
        assert_eq!(tier(0.97, High, 1), FunctionalTier::StrongPlenary);
        assert_eq!(tier(0.97, High, 4), FunctionalTier::StrongPlenary);
        // Low friction but N > 1 falls through to Standard.
        assert_eq!(tier(0.97, Low, 2), FunctionalTier::Standard);
        assert_eq!(tier(0.97, Standard, 1), FunctionalTier::Standard);
        assert_eq!(tier(0.95, Low, 1), FunctionalTier::Standard);
        assert_eq!(tier(0.90, Low, 1), FunctionalTier::Weak);
        assert_eq!(tier(0.85, High, 1), FunctionalTier::Weak);
    }

    #[test]
    fn diverges_below_floor() {
        let mut log = AnalysisLog::new();
        let out = same_outcome_filter(
            &test_data(0.80, ProceduralFriction::Low, 1),
            &Calibration::default(),
            &mut log,
        );
        assert_eq!(
            out,
            SameOutcomeFilter::Diverge {
                rationale: "Reliability rate (80.0%) below functional threshold".into()
            }
        );
        assert_eq!(
            log.lines().last().map(String::as_str),
            Some("RESULT: Outcomes diverge (reliability < 85%)")
        );
    }

    #[test]
    fn fractional_floor_is_not_rounded_in_trace() {
        let calibration = Calibration {
            convergence_floor: 0.875,
            ..Calibration::default()
        };
        let mut log = AnalysisLog::new();
        let out = same_outcome_filter(
            &test_data(0.875 - 1e-9, ProceduralFriction::Low, 1),
            &calibration,
            &mut log,
        );
        assert!(matches!(out, SameOutcomeFilter::Diverge { .. }));
        assert_eq!(
            log.lines().last().map(String::as_str),
            Some("RESULT: Outcomes diverge (reliability < 87.5%)")
        );
    }

    #[test]
    fn floor_itself_converges() {
        let mut log = AnalysisLog::new();
        let out = same_outcome_filter(
            &test_data(0.85, ProceduralFriction::Standard, 1),
            &Calibration::default(),
            &mut log,
        );
        let SameOutcomeFilter::Converge(m) = out else {
            panic!("expected convergence at the floor");
        };
        assert_eq!(m.tier, FunctionalTier::Weak);
        assert_eq!(m.functional_score, 1.7);
        assert_eq!(
            m.rationale,
            "Weak functional match (reliability 85.0%, standard friction)"
        );
    }

    #[test]
    fn negative_rate_is_non_convergent() {
        let mut log = AnalysisLog::new();
        let out = same_outcome_filter(
            &test_data(-0.5, ProceduralFriction::Low, 1),
            &Calibration::default(),
            &mut log,
        );
        assert!(matches!(out, SameOutcomeFilter::Diverge { .. }));
    }

    #[test]
    fn gate2_trace_lines() {
        let mut log = AnalysisLog::new();
        log.push("previous");
        same_outcome_filter(
            &test_data(0.97, ProceduralFriction::High, 1),
            &Calibration::default(),
            &mut log,
        );
        let lines = log.lines();
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "=== STEP 2: FUNCTIONAL EQUIVALENCY TEST ===");
        assert_eq!(lines[3], "Fact pattern: pattern");
        assert_eq!(lines[4], "Reliability rate: 97.0%");
        assert_eq!(lines[5], "Procedural friction: high");
        assert_eq!(
            lines[6],
            "RESULT: Outcomes converge - Strong (Plenary) Functional Equivalent (d = 0.35)"
        );
    }

    // ── Gate 3 ──────────────────────────────────────────────────────

    #[test]
    fn perfect_substitution_requires_all_three() {
        let a = concept(&["x", "y"], "Protect rights");
        let low = test_data(0.97, ProceduralFriction::Low, 1);
        let mut log = AnalysisLog::new();
        assert!(perfect_substitution_filter(&a, &a.clone(), &low, &mut log).is_perfect());

        let case_differs = concept(&["x", "y"], "protect rights");
        let check = perfect_substitution_filter(&a, &case_differs, &low, &mut log);
        assert!(check.all_elements_match);
        assert!(!check.objectives_identical);
        assert!(!check.is_perfect());

        let high = test_data(0.97, ProceduralFriction::High, 1);
        let check = perfect_substitution_filter(&a, &a.clone(), &high, &mut log);
        assert!(!check.zero_friction);
        assert!(!check.is_perfect());

        let fewer = concept(&["x"], "Protect rights");
        assert!(!perfect_substitution_filter(&a, &fewer, &low, &mut log).all_elements_match);
    }

    #[test]
    fn substitution_trace_result_line() {
        let a = concept(&["x"], "o");
        let mut log = AnalysisLog::new();
        let test = test_data(1.0, ProceduralFriction::Low, 1);
        perfect_substitution_filter(&a, &a.clone(), &test, &mut log);
        assert_eq!(
            log.lines().last().map(String::as_str),
            Some("RESULT: Perfect substitution confirmed (Total Equivalent)")
        );
    }

    #[test]
    fn fmt_score_keeps_fraction() {
        assert_eq!(fmt_score(2.0), "2.0");
        assert_eq!(fmt_score(0.15), "0.15");
        assert_eq!(fmt_score(1.7), "1.7");
    }
}

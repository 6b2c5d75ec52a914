//! # Calibration
//!
//! Decision thresholds for the three gates. The defaults are the published
//! methodology's values; a research group testing the methodology on a new
//! dataset may load alternative thresholds from YAML or JSON.
//!
//! Only thresholds are configurable. Scores, tier names and interval labels
//! are part of the taxonomy and stay fixed.

use serde::{Deserialize, Serialize};

use ceq_core::{CeqError, ValidationError};

/// Threshold set consumed by the gates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Minimum reliability rate for outcomes to converge (Gate 2).
    pub convergence_floor: f64,
    /// Reliability above which a converging pair is at least Standard.
    pub standard_floor: f64,
    /// Reliability above which a converging pair may be Strong.
    pub strong_floor: f64,
    /// Shared elements needed for a Strong partial score (Gate 1).
    pub strong_partial_elements: usize,
    /// Keyword-overlap ratio that must be exceeded for objectives to match.
    pub objective_overlap_ratio: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            convergence_floor: 0.85,
            standard_floor: 0.90,
            strong_floor: 0.95,
            strong_partial_elements: 3,
            objective_overlap_ratio: 0.5,
        }
    }
}

impl Calibration {
    /// Parse and validate a YAML calibration document. Missing fields take
    /// their default values.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CeqError> {
        let calibration: Self =
            serde_yaml::from_str(yaml).map_err(|e| CeqError::Configuration(e.to_string()))?;
        calibration.validate()?;
        Ok(calibration)
    }

    /// Parse and validate a JSON calibration document.
    pub fn from_json_str(json: &str) -> Result<Self, CeqError> {
        let calibration: Self = serde_json::from_str(json)?;
        calibration.validate()?;
        Ok(calibration)
    }

    /// Check ranges and ordering of the thresholds.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidCalibration`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("convergence_floor", self.convergence_floor),
            ("standard_floor", self.standard_floor),
            ("strong_floor", self.strong_floor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::InvalidCalibration {
                    field,
                    reason: format!("{value} is outside [0.0, 1.0]"),
                });
            }
        }
        if self.standard_floor <= self.convergence_floor {
            return Err(ValidationError::InvalidCalibration {
                field: "standard_floor",
                reason: "must exceed convergence_floor".to_string(),
            });
        }
        if self.strong_floor <= self.standard_floor {
            return Err(ValidationError::InvalidCalibration {
                field: "strong_floor",
                reason: "must exceed standard_floor".to_string(),
            });
        }
        if self.strong_partial_elements < 1 {
            return Err(ValidationError::InvalidCalibration {
                field: "strong_partial_elements",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..1.0).contains(&self.objective_overlap_ratio) {
            return Err(ValidationError::InvalidCalibration {
                field: "objective_overlap_ratio",
                reason: format!("{} is outside [0.0, 1.0)", self.objective_overlap_ratio),
            });
        }
        Ok(())
    }
}

/// Render a threshold fraction as a percentage without rounding away its
/// decimals: `0.85` is "85", `0.875` is "87.5".
pub fn format_percent(fraction: f64) -> String {
    let fixed = format!("{:.4}", fraction * 100.0);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

//! Recovery readiness scoring
//!
//! Blends whatever recovery sub-metrics are available (sleep quality, HRV,
//! muscle readiness, mental readiness, hydration) into a single 0-100 score.
//! Each metric arrives already normalized to 0-100; the blend divides by the
//! weight mass of the metrics actually present so a partial set still lands
//! on the full scale.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RecoveryWeights;
use crate::error::{CalculationError, Result};
use crate::models::ensure_finite;

/// Score returned when no sub-metrics are supplied at all
pub const DEFAULT_RECOVERY_SCORE: f64 = 75.0;

/// Optional recovery sub-metrics, each normalized to 0-100
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RecoveryInputs {
    pub sleep_quality: Option<f64>,
    pub hrv_score: Option<f64>,
    pub muscle_readiness: Option<f64>,
    pub mental_readiness: Option<f64>,
    pub hydration_level: Option<f64>,
}

/// Weighted recovery score calculator
#[derive(Debug, Clone, Default)]
pub struct RecoveryScorer {
    weights: RecoveryWeights,
}

impl RecoveryScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scorer with custom weights
    pub fn with_weights(weights: RecoveryWeights) -> Self {
        RecoveryScorer { weights }
    }

    /// Blend the supplied sub-metrics into a single 0-100 score
    ///
    /// Only present metrics contribute; the weighted sum is divided by the
    /// sum of their weights. No metrics at all returns the neutral default
    /// of 75.
    pub fn score(&self, inputs: &RecoveryInputs) -> Result<f64> {
        let components = [
            ("sleep_quality", inputs.sleep_quality, self.weights.sleep),
            ("hrv_score", inputs.hrv_score, self.weights.hrv),
            (
                "muscle_readiness",
                inputs.muscle_readiness,
                self.weights.muscle,
            ),
            (
                "mental_readiness",
                inputs.mental_readiness,
                self.weights.mental,
            ),
            (
                "hydration_level",
                inputs.hydration_level,
                self.weights.hydration,
            ),
        ];

        let mut weighted_sum = 0.0;
        let mut weight_mass = 0.0;

        for (name, value, weight) in components {
            if let Some(value) = value {
                ensure_finite(value, "recovery score", name)?;
                if !(0.0..=100.0).contains(&value) {
                    return Err(
                        CalculationError::invalid_parameter("recovery score", name, value).into(),
                    );
                }
                weighted_sum += value * weight;
                weight_mass += weight;
            }
        }

        if weight_mass == 0.0 {
            debug!("no recovery metrics supplied, returning default score");
            return Ok(DEFAULT_RECOVERY_SCORE);
        }

        Ok(weighted_sum / weight_mass)
    }
}

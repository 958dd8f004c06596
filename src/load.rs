//! Training load analysis
//!
//! Computes the acute:chronic workload ratio (ACWR) over a daily load series
//! and a per-session training-stress score. ACWR compares the mean of the
//! most recent acute window (default 7 days) against the mean of the chronic
//! window (default 28 days); ratios outside the 0.8-1.3 sweet spot flag
//! elevated injury risk.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fmt;
use tracing::debug;

use crate::config::StressMultipliers;
use crate::error::{CalculationError, Result};
use crate::models::ensure_finite;

/// ACWR window configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Acute window in days (default 7)
    pub acute_days: usize,

    /// Chronic window in days (default 28)
    pub chronic_days: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        LoadConfig {
            acute_days: 7,
            chronic_days: 28,
        }
    }
}

/// Risk classification of a workload ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadRisk {
    /// Ratio in [0.8, 1.3]
    Optimal,
    /// Ratio in [0.5, 1.5] but outside the optimal band
    Caution,
    /// Ratio outside [0.5, 1.5]
    Danger,
}

impl WorkloadRisk {
    /// Classify a ratio into a risk band
    pub fn from_ratio(ratio: f64) -> Self {
        if (0.8..=1.3).contains(&ratio) {
            WorkloadRisk::Optimal
        } else if (0.5..=1.5).contains(&ratio) {
            WorkloadRisk::Caution
        } else {
            WorkloadRisk::Danger
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WorkloadRisk::Optimal => "Workload is in the optimal range",
            WorkloadRisk::Caution => "Workload is drifting outside the optimal range",
            WorkloadRisk::Danger => "Workload spike or crash, elevated injury risk",
        }
    }
}

impl fmt::Display for WorkloadRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadRisk::Optimal => write!(f, "optimal"),
            WorkloadRisk::Caution => write!(f, "caution"),
            WorkloadRisk::Danger => write!(f, "danger"),
        }
    }
}

/// ACWR result with the intermediate means that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadAnalysis {
    /// Acute:chronic workload ratio
    pub ratio: f64,

    /// Mean daily load over the acute window
    pub acute_mean: f64,

    /// Mean daily load over the chronic window
    pub chronic_mean: f64,

    /// Risk classification of the ratio
    pub risk: WorkloadRisk,

    /// Number of daily samples the analysis saw
    pub sample_days: usize,
}

/// Acute:chronic workload and training-stress calculator
#[derive(Debug, Clone, Default)]
pub struct TrainingLoadAnalyzer {
    config: LoadConfig,
    multipliers: StressMultipliers,
}

impl TrainingLoadAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with custom windows and multipliers
    pub fn with_config(config: LoadConfig, multipliers: StressMultipliers) -> Self {
        TrainingLoadAnalyzer {
            config,
            multipliers,
        }
    }

    /// Compute the acute:chronic workload ratio over a daily load series
    ///
    /// The series is chronological, one scalar per day, most recent last.
    /// Window sizes must satisfy `1 <= acute_days <= chronic_days`. Fewer
    /// samples than the chronic window yields the neutral default (ratio
    /// 1.0, optimal) rather than an error; a zero chronic mean is likewise
    /// guarded to the neutral ratio.
    pub fn acwr(&self, daily_loads: &[f64]) -> Result<WorkloadAnalysis> {
        if self.config.acute_days == 0 || self.config.acute_days > self.config.chronic_days {
            return Err(CalculationError::invalid_parameter(
                "ACWR",
                "acute_days",
                self.config.acute_days,
            )
            .into());
        }

        for &load in daily_loads {
            ensure_finite(load, "ACWR", "daily load")?;
            if load < 0.0 {
                return Err(
                    CalculationError::invalid_parameter("ACWR", "daily load", load).into(),
                );
            }
        }

        if daily_loads.len() < self.config.chronic_days {
            debug!(
                samples = daily_loads.len(),
                required = self.config.chronic_days,
                "short load history, returning neutral ACWR"
            );
            return Ok(WorkloadAnalysis {
                ratio: 1.0,
                acute_mean: 0.0,
                chronic_mean: 0.0,
                risk: WorkloadRisk::Optimal,
                sample_days: daily_loads.len(),
            });
        }

        let acute_start = daily_loads.len() - self.config.acute_days;
        let chronic_start = daily_loads.len() - self.config.chronic_days;

        let acute_mean = daily_loads[acute_start..].iter().mean();
        let chronic_mean = daily_loads[chronic_start..].iter().mean();

        let ratio = if chronic_mean == 0.0 {
            1.0
        } else {
            acute_mean / chronic_mean
        };

        Ok(WorkloadAnalysis {
            ratio,
            acute_mean,
            chronic_mean,
            risk: WorkloadRisk::from_ratio(ratio),
            sample_days: daily_loads.len(),
        })
    }

    /// Training-stress score for a single session
    ///
    /// `duration_minutes × (intensity / 10) × type multiplier`, rounded to
    /// the nearest integer. Intensity is the 1-10 RPE scale; workout types
    /// not present in the multiplier table score a neutral 1.0.
    pub fn training_stress(
        &self,
        duration_minutes: f64,
        intensity: u8,
        workout_type: &str,
    ) -> Result<u32> {
        ensure_finite(duration_minutes, "training stress", "duration")?;
        if duration_minutes <= 0.0 {
            return Err(CalculationError::invalid_parameter(
                "training stress",
                "duration",
                duration_minutes,
            )
            .into());
        }
        if !(1..=10).contains(&intensity) {
            return Err(CalculationError::invalid_parameter(
                "training stress",
                "intensity",
                intensity,
            )
            .into());
        }

        let multiplier = self.multipliers.multiplier_for(workout_type);
        let stress = duration_minutes * (intensity as f64 / 10.0) * multiplier;
        Ok(stress.round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> TrainingLoadAnalyzer {
        TrainingLoadAnalyzer::new()
    }

    #[test]
    fn test_balanced_load_is_optimal() {
        // 28 identical days: acute mean equals chronic mean
        let loads = vec![100.0; 28];
        let analysis = analyzer().acwr(&loads).unwrap();
        assert!((analysis.ratio - 1.0).abs() < 1e-9);
        assert_eq!(analysis.risk, WorkloadRisk::Optimal);
    }

    #[test]
    fn test_acute_spike_is_danger() {
        // 21 easy days then a week at double load: acute 200, chronic 125
        let mut loads = vec![100.0; 21];
        loads.extend(vec![200.0; 7]);
        let analysis = analyzer().acwr(&loads).unwrap();
        assert!(analysis.ratio > 1.5);
        assert_eq!(analysis.risk, WorkloadRisk::Danger);
    }

    #[test]
    fn test_doubled_ratio_classification() {
        assert_eq!(WorkloadRisk::from_ratio(2.0), WorkloadRisk::Danger);
        assert_eq!(WorkloadRisk::from_ratio(1.4), WorkloadRisk::Caution);
        assert_eq!(WorkloadRisk::from_ratio(0.6), WorkloadRisk::Caution);
        assert_eq!(WorkloadRisk::from_ratio(1.0), WorkloadRisk::Optimal);
        assert_eq!(WorkloadRisk::from_ratio(0.8), WorkloadRisk::Optimal);
        assert_eq!(WorkloadRisk::from_ratio(1.3), WorkloadRisk::Optimal);
        assert_eq!(WorkloadRisk::from_ratio(0.4), WorkloadRisk::Danger);
    }

    #[test]
    fn test_short_history_returns_neutral_default() {
        let loads = vec![150.0; 10];
        let analysis = analyzer().acwr(&loads).unwrap();
        assert_eq!(analysis.ratio, 1.0);
        assert_eq!(analysis.risk, WorkloadRisk::Optimal);
        assert_eq!(analysis.sample_days, 10);
    }

    #[test]
    fn test_zero_chronic_mean_guarded() {
        let loads = vec![0.0; 28];
        let analysis = analyzer().acwr(&loads).unwrap();
        assert_eq!(analysis.ratio, 1.0);
        assert_eq!(analysis.risk, WorkloadRisk::Optimal);
    }

    #[test]
    fn test_detraining_crash() {
        // Four hard weeks then a dead week
        let mut loads = vec![150.0; 21];
        loads.extend(vec![10.0; 7]);
        let analysis = analyzer().acwr(&loads).unwrap();
        assert!(analysis.ratio < 0.5);
        assert_eq!(analysis.risk, WorkloadRisk::Danger);
    }

    #[test]
    fn test_negative_load_rejected() {
        let mut loads = vec![100.0; 28];
        loads[5] = -10.0;
        assert!(analyzer().acwr(&loads).is_err());
    }

    #[test]
    fn test_nan_load_rejected() {
        let mut loads = vec![100.0; 28];
        loads[0] = f64::NAN;
        assert!(analyzer().acwr(&loads).is_err());
    }

    #[test]
    fn test_custom_windows() {
        let analyzer = TrainingLoadAnalyzer::with_config(
            LoadConfig {
                acute_days: 3,
                chronic_days: 9,
            },
            StressMultipliers::default(),
        );
        let mut loads = vec![50.0; 6];
        loads.extend(vec![100.0; 3]);
        let analysis = analyzer.acwr(&loads).unwrap();
        // acute 100, chronic (300 + 300) / 9 ≈ 66.7
        assert!(analysis.ratio > 1.4);
    }

    #[test]
    fn test_acute_window_wider_than_chronic_rejected() {
        let analyzer = TrainingLoadAnalyzer::with_config(
            LoadConfig {
                acute_days: 50,
                chronic_days: 9,
            },
            StressMultipliers::default(),
        );
        // Chronic window satisfied, acute window wider than the series
        assert!(analyzer.acwr(&vec![100.0; 10]).is_err());
    }

    #[test]
    fn test_zero_acute_window_rejected() {
        let analyzer = TrainingLoadAnalyzer::with_config(
            LoadConfig {
                acute_days: 0,
                chronic_days: 5,
            },
            StressMultipliers::default(),
        );
        // An empty acute slice would otherwise produce a NaN ratio
        assert!(analyzer.acwr(&vec![100.0; 10]).is_err());
    }

    #[test]
    fn test_training_stress_formula() {
        let analyzer = analyzer();
        // 60 min × 0.8 intensity × 1.5 sprint = 72
        assert_eq!(analyzer.training_stress(60.0, 8, "sprint").unwrap(), 72);
        // 45 min × 0.5 × 0.5 recovery = 11.25 → 11
        assert_eq!(analyzer.training_stress(45.0, 5, "recovery").unwrap(), 11);
        // Unknown type gets the neutral multiplier
        assert_eq!(analyzer.training_stress(60.0, 5, "yoga").unwrap(), 30);
    }

    #[test]
    fn test_training_stress_validation() {
        let analyzer = analyzer();
        assert!(analyzer.training_stress(-30.0, 5, "tempo").is_err());
        assert!(analyzer.training_stress(0.0, 5, "tempo").is_err());
        assert!(analyzer.training_stress(60.0, 0, "tempo").is_err());
        assert!(analyzer.training_stress(60.0, 11, "tempo").is_err());
        assert!(analyzer.training_stress(f64::NAN, 5, "tempo").is_err());
    }
}

//! Multi-factor injury risk scoring
//!
//! Combines workload, load-change, rest, sleep, and injury-history signals
//! into a single 0-100 risk score. Six independently capped factors sum to
//! at most exactly 100; each factor records its raw value, trigger
//! threshold, and an impact classification so a presentation layer can
//! explain the score rather than just display it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{CalculationError, Result};
use crate::models::ensure_finite;

/// Overall injury risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    /// Classify an aggregate score into a level
    pub fn from_score(score: u32) -> Self {
        if score >= 60 {
            RiskLevel::Critical
        } else if score >= 40 {
            RiskLevel::High
        } else if score >= 20 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Moderate => write!(f, "moderate"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Critical => write!(f, "critical"),
        }
    }
}

/// How a factor reads against its healthy range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorImpact {
    /// Actively contributing to risk
    Negative,
    /// Neither helping nor hurting
    Neutral,
    /// Protective
    Positive,
}

/// One scored risk factor with its explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryRiskFactor {
    /// Factor name ("Workload ratio", "Sleep quality", ...)
    pub name: String,

    /// Impact classification against the factor's healthy range
    pub impact: FactorImpact,

    /// Raw input value the factor was scored from
    pub value: f64,

    /// Boundary at which the factor starts contributing risk
    pub threshold: f64,

    /// Human-readable explanation
    pub description: String,
}

/// Snapshot of an athlete's recent training state
///
/// `age` is accepted for forward compatibility but does not currently
/// contribute to the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSnapshot {
    /// Acute:chronic workload ratio
    pub acwr: f64,

    /// Week-over-week load change in percent (positive = ramping up)
    pub weekly_load_change_pct: f64,

    /// Current streak of consecutive hard training days
    pub consecutive_hard_days: u32,

    /// Rest days taken in the last 14 days
    pub rest_days_last_14: u32,

    /// Count of previous injuries
    pub previous_injuries: u32,

    /// Average nightly sleep in hours
    pub avg_sleep_hours: f64,

    /// Athlete age in years
    pub age: Option<u8>,
}

/// Complete risk assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryRiskAssessment {
    /// Overall risk level
    pub level: RiskLevel,

    /// Aggregate score, 0-100
    pub score: u32,

    /// Individual factors in scoring order
    pub factors: Vec<InjuryRiskFactor>,

    /// Actionable recommendations, one per triggering factor
    pub recommendations: Vec<String>,

    /// When the assessment was generated
    pub generated_at: DateTime<Utc>,
}

/// Weighted multi-factor injury risk scorer
pub struct InjuryRiskScorer;

impl InjuryRiskScorer {
    /// Assess injury risk from a training snapshot
    ///
    /// # Algorithm
    ///
    /// Six factors score independently under fixed caps that sum to 100:
    /// workload ratio 25, load progression 20, consecutive hard days 20,
    /// rest frequency 15, sleep quality 10, injury history 10. The
    /// aggregate maps to a level at the 20/40/60 boundaries. Factors that
    /// contribute nothing leave the athlete at level low with generic
    /// maintenance guidance.
    pub fn assess(snapshot: &TrainingSnapshot) -> Result<InjuryRiskAssessment> {
        Self::validate(snapshot)?;

        let mut factors = Vec::with_capacity(6);
        let mut recommendations = Vec::new();
        let mut score = 0u32;

        let (workload, rec) = Self::workload_factor(snapshot.acwr);
        score += Self::push(&mut factors, &mut recommendations, workload, rec);

        let (progression, rec) = Self::progression_factor(snapshot.weekly_load_change_pct);
        score += Self::push(&mut factors, &mut recommendations, progression, rec);

        let (hard_days, rec) = Self::hard_days_factor(snapshot.consecutive_hard_days);
        score += Self::push(&mut factors, &mut recommendations, hard_days, rec);

        let (rest, rec) = Self::rest_factor(snapshot.rest_days_last_14);
        score += Self::push(&mut factors, &mut recommendations, rest, rec);

        let (sleep, rec) = Self::sleep_factor(snapshot.avg_sleep_hours);
        score += Self::push(&mut factors, &mut recommendations, sleep, rec);

        let (history, rec) = Self::history_factor(snapshot.previous_injuries);
        score += Self::push(&mut factors, &mut recommendations, history, rec);

        if recommendations.is_empty() {
            recommendations.push("Maintain current training approach".to_string());
            recommendations.push("Continue monitoring load and recovery".to_string());
        }

        let level = RiskLevel::from_score(score);
        debug!(score, %level, "assessed injury risk");

        Ok(InjuryRiskAssessment {
            level,
            score,
            factors,
            recommendations,
            generated_at: Utc::now(),
        })
    }

    fn push(
        factors: &mut Vec<InjuryRiskFactor>,
        recommendations: &mut Vec<String>,
        scored: (InjuryRiskFactor, u32),
        recommendation: Option<String>,
    ) -> u32 {
        let (factor, points) = scored;
        factors.push(factor);
        if let Some(rec) = recommendation {
            recommendations.push(rec);
        }
        points
    }

    /// Workload ratio, cap 25
    fn workload_factor(acwr: f64) -> ((InjuryRiskFactor, u32), Option<String>) {
        let (points, description, recommendation) = if acwr > 1.5 {
            (
                25,
                format!("Workload ratio of {:.2} is well above the safe ceiling", acwr),
                Some("Cut acute training load sharply until the ratio returns below 1.3".to_string()),
            )
        } else if acwr > 1.3 {
            (
                15,
                format!("Workload ratio of {:.2} is above the optimal band", acwr),
                Some("Hold or reduce load this week to let chronic fitness catch up".to_string()),
            )
        } else if acwr < 0.8 {
            (
                10,
                format!("Workload ratio of {:.2} indicates detraining", acwr),
                Some("Rebuild load gradually; large jumps after a lull carry risk".to_string()),
            )
        } else {
            (
                0,
                format!("Workload ratio of {:.2} is in the optimal band", acwr),
                None,
            )
        };

        let impact = if points > 0 {
            FactorImpact::Negative
        } else {
            FactorImpact::Positive
        };

        (
            (
                InjuryRiskFactor {
                    name: "Workload ratio".to_string(),
                    impact,
                    value: acwr,
                    threshold: 1.3,
                    description,
                },
                points,
            ),
            recommendation,
        )
    }

    /// Weekly load progression, cap 20
    fn progression_factor(change_pct: f64) -> ((InjuryRiskFactor, u32), Option<String>) {
        let (points, description, recommendation) = if change_pct > 30.0 {
            (
                20,
                format!("Weekly load jumped {:.0}%", change_pct),
                Some("Limit week-over-week load increases to about 10%".to_string()),
            )
        } else if change_pct > 20.0 {
            (
                12,
                format!("Weekly load rose {:.0}%", change_pct),
                Some("Slow the ramp; hold load steady for a week".to_string()),
            )
        } else if change_pct > 10.0 {
            (
                5,
                format!("Weekly load rose {:.0}%", change_pct),
                Some("Progression is slightly aggressive; watch for fatigue".to_string()),
            )
        } else {
            (
                0,
                format!("Weekly load change of {:.0}% is controlled", change_pct),
                None,
            )
        };

        let impact = if points > 0 {
            FactorImpact::Negative
        } else if change_pct < 0.0 {
            FactorImpact::Positive
        } else {
            FactorImpact::Neutral
        };

        (
            (
                InjuryRiskFactor {
                    name: "Load progression".to_string(),
                    impact,
                    value: change_pct,
                    threshold: 10.0,
                    description,
                },
                points,
            ),
            recommendation,
        )
    }

    /// Consecutive hard days, cap 20
    fn hard_days_factor(days: u32) -> ((InjuryRiskFactor, u32), Option<String>) {
        let (points, description, recommendation) = if days > 4 {
            (
                20,
                format!("{} consecutive hard days without relief", days),
                Some("Insert a recovery day immediately".to_string()),
            )
        } else if days > 3 {
            (
                12,
                format!("{} consecutive hard days", days),
                Some("Schedule an easy day within the next two days".to_string()),
            )
        } else if days > 2 {
            (
                5,
                format!("{} consecutive hard days", days),
                Some("Plan the next recovery day before extending the block".to_string()),
            )
        } else {
            (
                0,
                format!("{} consecutive hard days is sustainable", days),
                None,
            )
        };

        let impact = if points > 0 {
            FactorImpact::Negative
        } else if days <= 1 {
            FactorImpact::Positive
        } else {
            FactorImpact::Neutral
        };

        (
            (
                InjuryRiskFactor {
                    name: "Consecutive hard days".to_string(),
                    impact,
                    value: days as f64,
                    threshold: 2.0,
                    description,
                },
                points,
            ),
            recommendation,
        )
    }

    /// Rest frequency over the last 14 days, cap 15
    fn rest_factor(rest_days: u32) -> ((InjuryRiskFactor, u32), Option<String>) {
        let (points, description, recommendation) = if rest_days < 2 {
            (
                15,
                format!("Only {} rest day(s) in the last 14", rest_days),
                Some("Take at least two full rest days per fortnight".to_string()),
            )
        } else if rest_days < 3 {
            (
                8,
                format!("{} rest days in the last 14 is on the low side", rest_days),
                Some("Add one more rest day to the next two weeks".to_string()),
            )
        } else {
            (
                0,
                format!("{} rest days in the last 14", rest_days),
                None,
            )
        };

        let impact = if points > 0 {
            FactorImpact::Negative
        } else {
            FactorImpact::Positive
        };

        (
            (
                InjuryRiskFactor {
                    name: "Rest frequency".to_string(),
                    impact,
                    value: rest_days as f64,
                    threshold: 3.0,
                    description,
                },
                points,
            ),
            recommendation,
        )
    }

    /// Sleep quality, cap 10
    fn sleep_factor(hours: f64) -> ((InjuryRiskFactor, u32), Option<String>) {
        let (points, description, recommendation) = if hours < 6.0 {
            (
                10,
                format!("Averaging {:.1}h of sleep, well short of need", hours),
                Some("Prioritize sleep; target at least 8 hours nightly".to_string()),
            )
        } else if hours < 7.0 {
            (
                5,
                format!("Averaging {:.1}h of sleep, slightly short", hours),
                Some("Extend sleep toward 8 hours on training days".to_string()),
            )
        } else {
            (0, format!("Averaging {:.1}h of sleep", hours), None)
        };

        let impact = if points > 0 {
            FactorImpact::Negative
        } else if hours >= 8.0 {
            FactorImpact::Positive
        } else {
            FactorImpact::Neutral
        };

        (
            (
                InjuryRiskFactor {
                    name: "Sleep quality".to_string(),
                    impact,
                    value: hours,
                    threshold: 7.0,
                    description,
                },
                points,
            ),
            recommendation,
        )
    }

    /// Injury history, cap 10: three points per prior injury
    fn history_factor(previous_injuries: u32) -> ((InjuryRiskFactor, u32), Option<String>) {
        let points = (previous_injuries * 3).min(10);
        let (description, recommendation) = if points > 0 {
            (
                format!("{} previous injuries raise baseline risk", previous_injuries),
                Some("Keep up prehab work targeting previously injured areas".to_string()),
            )
        } else {
            ("No injury history on record".to_string(), None)
        };

        let impact = if points > 0 {
            FactorImpact::Negative
        } else {
            FactorImpact::Positive
        };

        (
            (
                InjuryRiskFactor {
                    name: "Injury history".to_string(),
                    impact,
                    value: previous_injuries as f64,
                    threshold: 1.0,
                    description,
                },
                points,
            ),
            recommendation,
        )
    }

    fn validate(snapshot: &TrainingSnapshot) -> Result<()> {
        ensure_finite(snapshot.acwr, "injury risk", "acwr")?;
        ensure_finite(
            snapshot.weekly_load_change_pct,
            "injury risk",
            "weekly_load_change_pct",
        )?;
        ensure_finite(snapshot.avg_sleep_hours, "injury risk", "avg_sleep_hours")?;

        if snapshot.acwr < 0.0 {
            return Err(
                CalculationError::invalid_parameter("injury risk", "acwr", snapshot.acwr).into(),
            );
        }
        if !(0.0..=24.0).contains(&snapshot.avg_sleep_hours) {
            return Err(CalculationError::invalid_parameter(
                "injury risk",
                "avg_sleep_hours",
                snapshot.avg_sleep_hours,
            )
            .into());
        }
        if snapshot.rest_days_last_14 > 14 {
            return Err(CalculationError::invalid_parameter(
                "injury risk",
                "rest_days_last_14",
                snapshot.rest_days_last_14,
            )
            .into());
        }
        Ok(())
    }
}

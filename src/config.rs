//! Injectable configuration for the ranking and analytics engine
//!
//! Threshold tables, training-stress multipliers, and recovery weights are
//! explicit, immutable data structures so tests and collaborators can
//! substitute alternates (a second gender's thresholds, a different stress
//! model) without touching the calculators. The built-in defaults cover the
//! male tables for eight track & field events; female tables are a known
//! configuration gap and must currently be injected.
//!
//! The core performs no I/O: TOML deserialization works on strings handed in
//! by the caller.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{RankRsError, Result};
use crate::models::{EventType, Gender};
use crate::tiers::{EventThresholds, Tier};

/// Full threshold configuration: one table per (event, gender) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// All configured tables
    pub tables: Vec<EventThresholds>,
}

impl ThresholdConfig {
    /// An empty configuration (every classification falls back to Rookie)
    pub fn empty() -> Self {
        ThresholdConfig { tables: Vec::new() }
    }

    /// Find the table for an (event, gender) pair
    pub fn lookup(&self, event: &str, gender: Gender) -> Option<&EventThresholds> {
        self.tables
            .iter()
            .find(|t| t.event == event && t.gender == gender)
    }

    /// Validate every table's monotonicity
    pub fn validate(&self) -> Result<()> {
        for table in &self.tables {
            table.validate()?;
        }
        Ok(())
    }

    /// Parse a configuration from TOML text and validate it
    ///
    /// Reading the text from disk or network is the caller's concern.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ThresholdConfig = toml::from_str(text)
            .map_err(|e| RankRsError::Configuration(format!("invalid threshold TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        default_male_thresholds()
    }
}

fn track_table(event: &str, boundaries: [i64; 8]) -> EventThresholds {
    tier_table(event, EventType::Track, boundaries)
}

fn field_table(event: &str, boundaries: [i64; 8]) -> EventThresholds {
    tier_table(event, EventType::Field, boundaries)
}

fn tier_table(event: &str, event_type: EventType, boundaries: [i64; 8]) -> EventThresholds {
    let pairs: Vec<(Tier, Decimal)> = Tier::ALL
        .iter()
        .zip(boundaries.iter())
        .map(|(&tier, &b)| (tier, Decimal::from(b)))
        .collect();
    EventThresholds::from_pairs(event, Gender::Male, event_type, &pairs)
}

/// Built-in male threshold tables
///
/// Track boundaries in milliseconds (Rookie slowest, Godspeed fastest),
/// field boundaries in centimeters (Rookie shortest, Godspeed farthest).
pub fn default_male_thresholds() -> ThresholdConfig {
    ThresholdConfig {
        tables: vec![
            track_table(
                "100m",
                [15000, 13500, 12500, 11800, 11200, 10800, 10500, 10200],
            ),
            track_table(
                "200m",
                [31000, 28000, 25500, 24000, 22800, 21800, 20800, 19500],
            ),
            track_table(
                "400m",
                [72000, 64000, 58000, 54000, 51000, 48500, 45500, 43500],
            ),
            track_table(
                "800m",
                [170000, 150000, 135000, 125000, 118000, 112000, 105000, 101000],
            ),
            track_table(
                "1600m",
                [420000, 370000, 330000, 300000, 280000, 262000, 238000, 226000],
            ),
            track_table(
                "110mH",
                [25000, 21500, 19000, 17200, 16000, 15000, 13600, 12900],
            ),
            field_table("long_jump", [360, 460, 550, 630, 690, 740, 810, 880]),
            field_table("shot_put", [700, 950, 1200, 1450, 1650, 1850, 2100, 2300]),
        ],
    }
}

/// Training-stress multipliers per workout type
///
/// Keys are lowercase workout-type names; unknown types score a neutral 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressMultipliers {
    multipliers: HashMap<String, f64>,
}

impl StressMultipliers {
    /// Multiplier for a workout type, 1.0 when the type is not configured
    pub fn multiplier_for(&self, workout_type: &str) -> f64 {
        self.multipliers
            .get(&workout_type.to_lowercase())
            .copied()
            .unwrap_or(1.0)
    }
}

impl Default for StressMultipliers {
    fn default() -> Self {
        let multipliers = [
            ("sprint", 1.5),
            ("interval", 1.4),
            ("plyometrics", 1.4),
            ("strength", 1.3),
            ("tempo", 1.2),
            ("easy", 0.8),
            ("recovery", 0.5),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        StressMultipliers { multipliers }
    }
}

/// Weights for blending optional recovery sub-metrics
///
/// The sum of all five weights is 1.0; scoring divides by the weight mass of
/// the metrics actually supplied, so a partial set still lands on 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryWeights {
    pub sleep: f64,
    pub hrv: f64,
    pub muscle: f64,
    pub mental: f64,
    pub hydration: f64,
}

impl Default for RecoveryWeights {
    fn default() -> Self {
        RecoveryWeights {
            sleep: 0.30,
            hrv: 0.25,
            muscle: 0.20,
            mental: 0.15,
            hydration: 0.10,
        }
    }
}

//! Competitive tier classification
//!
//! Maps a raw performance to one of eight ordered tiers using per-event,
//! per-gender threshold tables. Tiers carry an explicit numeric rank and a
//! baseline point value so ordering comparisons never fall back to string
//! matching.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::config::ThresholdConfig;
use crate::error::Result;
use crate::models::{ensure_positive_performance, EventType, Gender};

/// Ordered competitive tiers, lowest to highest
///
/// The derive order gives `Ord`, so `Tier::Godspeed > Tier::Rookie` holds by
/// construction. `min_points` values are strictly increasing with tier rank
/// and anchor the 0-1000 point scale.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Rookie,
    Jv,
    Varsity,
    Elite,
    AllState,
    National,
    WorldClass,
    Godspeed,
}

impl Tier {
    /// All tiers in ascending order
    pub const ALL: [Tier; 8] = [
        Tier::Rookie,
        Tier::Jv,
        Tier::Varsity,
        Tier::Elite,
        Tier::AllState,
        Tier::National,
        Tier::WorldClass,
        Tier::Godspeed,
    ];

    /// Numeric rank, 0 (Rookie) through 7 (Godspeed)
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Baseline point value for a performance that just reaches this tier
    pub fn min_points(&self) -> u32 {
        match self {
            Tier::Rookie => 0,
            Tier::Jv => 200,
            Tier::Varsity => 400,
            Tier::Elite => 600,
            Tier::AllState => 750,
            Tier::National => 875,
            Tier::WorldClass => 975,
            Tier::Godspeed => 995,
        }
    }

    /// The next-higher tier, or `None` for the top tier
    pub fn next(&self) -> Option<Tier> {
        let rank = self.rank() as usize;
        Tier::ALL.get(rank + 1).copied()
    }

    /// Presentation label
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Rookie => "Rookie",
            Tier::Jv => "JV",
            Tier::Varsity => "Varsity",
            Tier::Elite => "Elite",
            Tier::AllState => "All-State",
            Tier::National => "National",
            Tier::WorldClass => "World Class",
            Tier::Godspeed => "Godspeed",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Threshold table for one (event, gender) pair
///
/// The mapping is ordered by tier; `validate` checks that the boundary values
/// are monotonic in the direction of the event (times shrink toward the top
/// tier, distances grow).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventThresholds {
    /// Event identifier this table applies to
    pub event: String,

    /// Gender this table applies to
    pub gender: Gender,

    /// Event directionality
    pub event_type: EventType,

    /// Tier boundary values, milliseconds or centimeters
    pub thresholds: BTreeMap<Tier, Decimal>,
}

impl EventThresholds {
    /// Build a table from (tier, boundary) pairs
    pub fn from_pairs(
        event: impl Into<String>,
        gender: Gender,
        event_type: EventType,
        pairs: &[(Tier, Decimal)],
    ) -> Self {
        EventThresholds {
            event: event.into(),
            gender,
            event_type,
            thresholds: pairs.iter().copied().collect(),
        }
    }

    /// Boundary value for a tier, if the table defines one
    pub fn threshold_for(&self, tier: Tier) -> Option<Decimal> {
        self.thresholds.get(&tier).copied()
    }

    /// Check monotonicity: each higher tier must demand a strictly better
    /// performance than the tier below it
    pub fn validate(&self) -> Result<()> {
        let mut previous: Option<(Tier, Decimal)> = None;
        for (&tier, &boundary) in &self.thresholds {
            if let Some((prev_tier, prev_boundary)) = previous {
                if !self.event_type.is_better(boundary, prev_boundary) {
                    return Err(crate::error::RankRsError::Configuration(format!(
                        "threshold table {}/{}: {} boundary {} does not improve on {} boundary {}",
                        self.event, self.gender, tier, boundary, prev_tier, prev_boundary
                    )));
                }
            }
            previous = Some((tier, boundary));
        }
        Ok(())
    }
}

/// Classifies raw performances into tiers
///
/// Holds the injected threshold configuration; the default configuration
/// carries the built-in male tables.
#[derive(Debug, Clone, Default)]
pub struct TierClassifier {
    config: ThresholdConfig,
}

impl TierClassifier {
    /// Create a classifier over an injected threshold configuration
    pub fn new(config: ThresholdConfig) -> Self {
        TierClassifier { config }
    }

    /// The threshold configuration backing this classifier
    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Classify a performance into a tier
    ///
    /// # Algorithm
    ///
    /// Walks tiers from highest to lowest and returns the first tier whose
    /// boundary the performance meets (inclusive). A performance that meets
    /// no boundary, or an (event, gender) pair with no configured table,
    /// classifies as `Tier::Rookie`. The missing-table fallback is a
    /// documented default, not an error.
    pub fn classify(&self, event: &str, gender: Gender, performance: Decimal) -> Result<Tier> {
        ensure_positive_performance(performance, "tier classification")?;

        let table = match self.config.lookup(event, gender) {
            Some(table) => table,
            None => {
                debug!(event, %gender, "no threshold table configured, defaulting to Rookie");
                return Ok(Tier::Rookie);
            }
        };

        for tier in Tier::ALL.iter().rev() {
            if let Some(boundary) = table.threshold_for(*tier) {
                if table.event_type.meets(performance, boundary) {
                    return Ok(*tier);
                }
            }
        }

        Ok(Tier::Rookie)
    }
}

//! Leaderboard assembly and rank-change tracking
//!
//! Sorts a cohort's performances for one event, assigns contiguous 1-based
//! ranks, scores each entry through the tier/point engine, and computes the
//! movement of each athlete against an optional prior rank. Ties on raw
//! performance break alphabetically by athlete name so repeated builds over
//! the same cohort are deterministic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::config::ThresholdConfig;
use crate::error::Result;
use crate::models::{ensure_positive_performance, EventType, Gender};
use crate::points::RankPointEngine;
use crate::tiers::Tier;

/// Direction of movement against a prior leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankDirection {
    Up,
    Down,
    Same,
    New,
}

impl fmt::Display for RankDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankDirection::Up => write!(f, "up"),
            RankDirection::Down => write!(f, "down"),
            RankDirection::Same => write!(f, "same"),
            RankDirection::New => write!(f, "new"),
        }
    }
}

/// Movement of one athlete relative to their previous rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankChange {
    /// Movement direction
    pub direction: RankDirection,

    /// Signed places moved; positive means climbing. Zero for new entries.
    pub delta: i32,

    /// Display string mirroring the delta: "+3", "-2", "-", or "NEW"
    pub display: String,
}

impl RankChange {
    /// Compute movement from an optional previous rank to the current one
    pub fn from_ranks(previous_rank: Option<u32>, current_rank: u32) -> Self {
        match previous_rank {
            None => RankChange {
                direction: RankDirection::New,
                delta: 0,
                display: "NEW".to_string(),
            },
            Some(previous) => {
                let delta = previous as i32 - current_rank as i32;
                let (direction, display) = if delta > 0 {
                    (RankDirection::Up, format!("+{}", delta))
                } else if delta < 0 {
                    (RankDirection::Down, format!("{}", delta))
                } else {
                    (RankDirection::Same, "-".to_string())
                };
                RankChange {
                    direction,
                    delta,
                    display,
                }
            }
        }
    }
}

/// One athlete's submission into a leaderboard build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortEntry {
    /// Athlete identifier
    pub athlete_id: String,

    /// Display name, also the tie-break key
    pub name: String,

    /// School or club affiliation
    pub school: Option<String>,

    /// Raw performance: milliseconds for track, centimeters for field
    pub performance: Decimal,

    /// Rank on the previous leaderboard, if the athlete appeared on it
    pub previous_rank: Option<u32>,
}

/// A fully scored leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: u32,

    /// Athlete identifier
    pub athlete_id: String,

    /// Display name
    pub name: String,

    /// School or club affiliation
    pub school: Option<String>,

    /// Raw performance value
    pub performance: Decimal,

    /// Formatted performance for presentation ("10.45", "6.75m")
    pub display: String,

    /// Competitive tier of the performance
    pub tier: Tier,

    /// Normalized 0-1000 point score
    pub points: u32,

    /// Rank on the previous leaderboard
    pub previous_rank: Option<u32>,

    /// Movement against the previous leaderboard
    pub change: RankChange,
}

/// Assembles ranked leaderboards for one event and gender at a time
#[derive(Debug, Clone, Default)]
pub struct LeaderboardBuilder {
    engine: RankPointEngine,
}

impl LeaderboardBuilder {
    /// Create a builder over an injected threshold configuration
    pub fn new(config: ThresholdConfig) -> Self {
        LeaderboardBuilder {
            engine: RankPointEngine::new(config),
        }
    }

    /// Create a builder sharing an existing point engine
    pub fn with_engine(engine: RankPointEngine) -> Self {
        LeaderboardBuilder { engine }
    }

    /// Build a ranked leaderboard from a cohort of performances
    ///
    /// Entries sort ascending by performance for track events and descending
    /// for field events; equal performances order alphabetically by athlete
    /// name. Ranks are exactly 1..N. Inputs are not mutated.
    pub fn build(
        &self,
        entries: &[CohortEntry],
        event: &str,
        gender: Gender,
        event_type: EventType,
    ) -> Result<Vec<LeaderboardEntry>> {
        for entry in entries {
            ensure_positive_performance(entry.performance, "leaderboard build")?;
        }

        let mut sorted: Vec<&CohortEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| {
            let by_performance = if event_type.lower_is_better() {
                a.performance.cmp(&b.performance)
            } else {
                b.performance.cmp(&a.performance)
            };
            by_performance.then_with(|| a.name.cmp(&b.name))
        });

        let mut board = Vec::with_capacity(sorted.len());
        for (index, entry) in sorted.into_iter().enumerate() {
            let rank = index as u32 + 1;
            let tier = self
                .engine
                .classifier()
                .classify(event, gender, entry.performance)?;
            let points = self.engine.score(event, gender, entry.performance)?;

            board.push(LeaderboardEntry {
                rank,
                athlete_id: entry.athlete_id.clone(),
                name: entry.name.clone(),
                school: entry.school.clone(),
                performance: entry.performance,
                display: event_type.format_value(entry.performance),
                tier,
                points,
                previous_rank: entry.previous_rank,
                change: RankChange::from_ranks(entry.previous_rank, rank),
            });
        }

        debug!(event, %gender, entries = board.len(), "built leaderboard");
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(name: &str, performance: Decimal, previous_rank: Option<u32>) -> CohortEntry {
        CohortEntry {
            athlete_id: name.to_lowercase().replace(' ', "_"),
            name: name.to_string(),
            school: Some("Central HS".to_string()),
            performance,
            previous_rank,
        }
    }

    #[test]
    fn test_track_leaderboard_sorts_ascending() {
        let builder = LeaderboardBuilder::default();
        let entries = vec![
            entry("Carter", dec!(11250), Some(1)),
            entry("Avery", dec!(10980), Some(3)),
            entry("Blake", dec!(11900), None),
        ];

        let board = builder
            .build(&entries, "100m", Gender::Male, EventType::Track)
            .unwrap();

        assert_eq!(board.len(), 3);
        assert_eq!(board[0].name, "Avery");
        assert_eq!(board[1].name, "Carter");
        assert_eq!(board[2].name, "Blake");
        assert_eq!(
            board.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_field_leaderboard_sorts_descending() {
        let builder = LeaderboardBuilder::default();
        let entries = vec![
            entry("Drew", dec!(640), None),
            entry("Ellis", dec!(712), None),
        ];

        let board = builder
            .build(&entries, "long_jump", Gender::Male, EventType::Field)
            .unwrap();

        assert_eq!(board[0].name, "Ellis");
        assert_eq!(board[1].name, "Drew");
    }

    #[test]
    fn test_tie_breaks_alphabetically() {
        let builder = LeaderboardBuilder::default();
        let entries = vec![
            entry("Zane", dec!(11500), None),
            entry("Abel", dec!(11500), None),
        ];

        let board = builder
            .build(&entries, "100m", Gender::Male, EventType::Track)
            .unwrap();

        assert_eq!(board[0].name, "Abel");
        assert_eq!(board[1].name, "Zane");
    }

    #[test]
    fn test_rank_change_directions() {
        let change = RankChange::from_ranks(Some(5), 2);
        assert_eq!(change.direction, RankDirection::Up);
        assert_eq!(change.delta, 3);
        assert_eq!(change.display, "+3");

        let change = RankChange::from_ranks(Some(2), 4);
        assert_eq!(change.direction, RankDirection::Down);
        assert_eq!(change.delta, -2);
        assert_eq!(change.display, "-2");

        let change = RankChange::from_ranks(Some(3), 3);
        assert_eq!(change.direction, RankDirection::Same);
        assert_eq!(change.display, "-");

        let change = RankChange::from_ranks(None, 1);
        assert_eq!(change.direction, RankDirection::New);
        assert_eq!(change.display, "NEW");
    }

    #[test]
    fn test_entries_carry_tier_points_and_display() {
        let builder = LeaderboardBuilder::default();
        let entries = vec![entry("Avery", dec!(10450), Some(2))];

        let board = builder
            .build(&entries, "100m", Gender::Male, EventType::Track)
            .unwrap();

        assert_eq!(board[0].tier, Tier::WorldClass);
        assert_eq!(board[0].points, 978);
        assert_eq!(board[0].display, "10.45");
        assert_eq!(board[0].change.display, "+1");
    }

    #[test]
    fn test_input_not_mutated() {
        let builder = LeaderboardBuilder::default();
        let entries = vec![
            entry("Carter", dec!(11250), None),
            entry("Avery", dec!(10980), None),
        ];
        let snapshot = entries.clone();

        builder
            .build(&entries, "100m", Gender::Male, EventType::Track)
            .unwrap();

        assert_eq!(entries, snapshot);
    }

    #[test]
    fn test_invalid_performance_rejected() {
        let builder = LeaderboardBuilder::default();
        let entries = vec![entry("Avery", dec!(0), None)];
        assert!(builder
            .build(&entries, "100m", Gender::Male, EventType::Track)
            .is_err());
    }

    #[test]
    fn test_empty_cohort_builds_empty_board() {
        let builder = LeaderboardBuilder::default();
        let board = builder
            .build(&[], "100m", Gender::Male, EventType::Track)
            .unwrap();
        assert!(board.is_empty());
    }
}

// Library interface for the rankrs calculation engine
// Pure, stateless routines: tier classification, point scoring, leaderboard
// assembly, trend forecasting, and training/health analytics. Persistence,
// transport, and notification live in collaborating layers.

pub mod config;
pub mod error;
pub mod injury;
pub mod leaderboard;
pub mod load;
pub mod logging;
pub mod models;
pub mod percentile;
pub mod points;
pub mod recovery;
pub mod tiers;
pub mod trend;

// Re-export commonly used types for convenience
pub use config::{RecoveryWeights, StressMultipliers, ThresholdConfig};
pub use error::{RankRsError, Result};
pub use injury::{InjuryRiskAssessment, InjuryRiskScorer, RiskLevel, TrainingSnapshot};
pub use leaderboard::{CohortEntry, LeaderboardBuilder, LeaderboardEntry, RankChange};
pub use load::{TrainingLoadAnalyzer, WorkloadAnalysis, WorkloadRisk};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::{EventType, Gender, PerformanceRecord};
pub use percentile::PercentileCalculator;
pub use points::RankPointEngine;
pub use recovery::{RecoveryInputs, RecoveryScorer};
pub use tiers::{EventThresholds, Tier, TierClassifier};
pub use trend::{PerformanceForecast, TrendAnalyzer, TrendDirection, TrendPoint, TrendResult};

//! Rank point scoring
//!
//! Converts a classified tier plus in-tier interpolation progress into a
//! normalized 0-1000 point score. Interpolation runs on `Decimal` so boundary
//! cases land exactly where the threshold tables say they should; binary
//! floats would drop points on clean fractions like 50/300.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::trace;

use crate::config::ThresholdConfig;
use crate::error::Result;
use crate::models::{Gender, PerformanceRecord};
use crate::tiers::{Tier, TierClassifier};

/// Hard ceiling on the point scale
pub const MAX_POINTS: u32 = 1000;

/// Fraction of each tier band awarded through interpolation
///
/// Reserves the top of the band so a performance exactly on a tier boundary
/// never scores the full next tier's minimum.
const BAND_RESERVE: Decimal = dec!(0.9);

/// Tier-interpolated point scoring engine
#[derive(Debug, Clone, Default)]
pub struct RankPointEngine {
    classifier: TierClassifier,
}

impl RankPointEngine {
    /// Create an engine over an injected threshold configuration
    pub fn new(config: ThresholdConfig) -> Self {
        RankPointEngine {
            classifier: TierClassifier::new(config),
        }
    }

    /// Create an engine sharing an existing classifier
    pub fn with_classifier(classifier: TierClassifier) -> Self {
        RankPointEngine { classifier }
    }

    /// The classifier backing this engine
    pub fn classifier(&self) -> &TierClassifier {
        &self.classifier
    }

    /// Score a performance on the 0-1000 scale
    ///
    /// # Algorithm
    ///
    /// Base points come from the classified tier's `min_points`. Below the
    /// top tier, progress toward the next tier's boundary is interpolated,
    /// clamped to [0,1], and converted to a bonus:
    ///
    /// ```text
    /// bonus = floor(progress × (next.min_points − tier.min_points) × 0.9)
    /// ```
    ///
    /// The top tier has no next boundary to interpolate toward, so it scores
    /// a flat `min_points`. Unknown (event, gender) pairs classify as Rookie
    /// and score 0.
    pub fn score(&self, event: &str, gender: Gender, performance: Decimal) -> Result<u32> {
        let tier = self.classifier.classify(event, gender, performance)?;
        let base = tier.min_points();

        let table = match self.classifier.config().lookup(event, gender) {
            Some(table) => table,
            None => return Ok(base.min(MAX_POINTS)),
        };

        let next = match tier.next() {
            Some(next) => next,
            None => return Ok(base.min(MAX_POINTS)),
        };

        let (current_boundary, next_boundary) =
            match (table.threshold_for(tier), table.threshold_for(next)) {
                (Some(current), Some(next)) => (current, next),
                _ => return Ok(base.min(MAX_POINTS)),
            };

        let span = if table.event_type.lower_is_better() {
            current_boundary - next_boundary
        } else {
            next_boundary - current_boundary
        };
        if span <= Decimal::ZERO {
            return Ok(base.min(MAX_POINTS));
        }

        let gained = if table.event_type.lower_is_better() {
            current_boundary - performance
        } else {
            performance - current_boundary
        };

        let progress = (gained / span).clamp(Decimal::ZERO, Decimal::ONE);
        let band = Decimal::from(next.min_points() - base);
        let bonus = (progress * band * BAND_RESERVE)
            .floor()
            .to_u32()
            .unwrap_or(0);

        let points = (base + bonus).min(MAX_POINTS);
        trace!(event, %gender, %performance, ?tier, points, "scored performance");
        Ok(points)
    }

    /// Score a full performance record
    pub fn score_record(&self, record: &PerformanceRecord) -> Result<u32> {
        record.validate()?;
        self.score(&record.event, record.gender, record.value)
    }
}

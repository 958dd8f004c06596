//! Percentile rank within a reference distribution

use tracing::trace;

use crate::error::{CalculationError, Result};
use crate::models::ensure_finite;

/// Percentile rank calculator
pub struct PercentileCalculator;

impl PercentileCalculator {
    /// Rank of `value` within `distribution`, 0-100
    ///
    /// Sorts a copy of the distribution ascending and finds the first entry
    /// not below the value: `percentile = index / length × 100`. A value
    /// below every entry ranks 0; a value above every entry ranks 100. The
    /// distribution must be non-empty.
    pub fn percentile(value: f64, distribution: &[f64]) -> Result<f64> {
        ensure_finite(value, "percentile", "value")?;
        if distribution.is_empty() {
            return Err(CalculationError::insufficient_data(
                "percentile",
                "reference distribution is empty",
            )
            .into());
        }
        for &entry in distribution {
            ensure_finite(entry, "percentile", "distribution entry")?;
        }

        let mut sorted = distribution.to_vec();
        sorted.sort_by(f64::total_cmp);

        let percentile = match sorted.iter().position(|&entry| entry >= value) {
            Some(index) => (index as f64 / sorted.len() as f64) * 100.0,
            None => 100.0,
        };

        trace!(value, entries = sorted.len(), percentile, "computed percentile");
        Ok(percentile)
    }
}

//! Performance trend fitting and forecasting
//!
//! Fits an ordinary least-squares line to a chronologically ordered series of
//! timed performances (milliseconds, lower is better) and projects a future
//! value with a confidence figure that decays the further out the forecast
//! reaches. The sampling cadence is assumed at two performances per month
//! rather than derived from the actual dates; it is an explicit simplifying
//! constant carried through every projection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use tracing::debug;

use crate::error::{CalculationError, Result};
use crate::models::ensure_finite;

/// Slope magnitude below which a trend reads as stable
const SLOPE_EPSILON: f64 = 0.01;

/// Assumed sampling cadence for month conversions
const SAMPLES_PER_MONTH: f64 = 2.0;

/// Mean month length in days, used to convert a date gap into months
const DAYS_PER_MONTH: f64 = 30.44;

/// Confidence lost per month of forecast horizon
const CONFIDENCE_DECAY_PER_MONTH: f64 = 5.0;

/// Floor for any dated forecast confidence
const MIN_FORECAST_CONFIDENCE: f64 = 10.0;

/// A projection never implies more than this improvement over current best
const MAX_IMPROVEMENT_FRACTION: f64 = 0.10;

/// Fixed confidence for forecasts built from fewer than three points
const SHORT_SERIES_CONFIDENCE: f64 = 20.0;

/// Symmetric range half-width for short-series forecasts
const SHORT_SERIES_RANGE_FRACTION: f64 = 0.02;

/// One dated sample in a performance series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Date of the performance
    pub date: NaiveDate,
    /// Raw timed performance in milliseconds
    pub value: f64,
}

impl TrendPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        TrendPoint { date, value }
    }
}

/// Direction of a fitted performance trend
///
/// For timed events a negative slope means the athlete is getting faster,
/// which reads as improving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

/// Result of a trend fit over a performance series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Fitted direction
    pub direction: TrendDirection,

    /// Average improvement in milliseconds per month (positive = faster)
    pub average_improvement: f64,

    /// Value projected one month past the end of the series
    pub projected_value: f64,

    /// Fit confidence, 0-100 (R² of the regression)
    pub confidence: f64,
}

/// A dated performance forecast with an uncertainty band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceForecast {
    /// Date the forecast targets
    pub target_date: NaiveDate,

    /// Central predicted value in milliseconds
    pub predicted: f64,

    /// Lower bound of the uncertainty band (faster side)
    pub range_low: f64,

    /// Upper bound of the uncertainty band (slower side)
    pub range_high: f64,

    /// Forecast confidence, 0-100, decayed by horizon
    pub confidence: f64,
}

/// Least-squares trend analyzer for timed performance series
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    /// Fit a linear trend to a chronologically sorted series
    ///
    /// # Algorithm
    ///
    /// Ordinary least squares of value against sample index 0..n-1. The
    /// direction compares the slope against a 0.01 epsilon; confidence is
    /// R² × 100 clamped to [0,100], with a constant series pinned to 0.
    /// `average_improvement` converts the per-sample slope to a per-month
    /// figure at the assumed two samples per month. Fewer than two points
    /// returns a stable result with zero confidence.
    pub fn analyze(series: &[TrendPoint]) -> Result<TrendResult> {
        Self::validate_series(series)?;

        if series.len() < 2 {
            return Ok(TrendResult {
                direction: TrendDirection::Stable,
                average_improvement: 0.0,
                projected_value: series.first().map(|p| p.value).unwrap_or(0.0),
                confidence: 0.0,
            });
        }

        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        let (slope, _intercept, r_squared) = Self::regress(&values);

        let direction = if slope.abs() < SLOPE_EPSILON {
            TrendDirection::Stable
        } else if slope < 0.0 {
            TrendDirection::Improving
        } else {
            TrendDirection::Declining
        };

        let best = values.iter().copied().fold(f64::INFINITY, f64::min);
        let projected_value = Self::project(best, slope, 1.0);
        let confidence = (r_squared * 100.0).clamp(0.0, 100.0);

        debug!(
            samples = series.len(),
            slope, r_squared, ?direction, "fitted performance trend"
        );

        Ok(TrendResult {
            direction,
            average_improvement: -slope * SAMPLES_PER_MONTH,
            projected_value,
            confidence,
        })
    }

    /// Forecast a performance for a target date
    ///
    /// Extrapolates the fitted trend from the series' current best value at
    /// the assumed cadence. Confidence starts at the fit confidence and
    /// decays 5 points per forecast month, floored at 10. Series shorter
    /// than three points skip the regression entirely: they predict the
    /// current best with a fixed 20% confidence and a ±2% symmetric range.
    pub fn forecast(series: &[TrendPoint], target_date: NaiveDate) -> Result<PerformanceForecast> {
        Self::validate_series(series)?;

        if series.is_empty() {
            return Ok(PerformanceForecast {
                target_date,
                predicted: 0.0,
                range_low: 0.0,
                range_high: 0.0,
                confidence: 0.0,
            });
        }

        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        let best = values.iter().copied().fold(f64::INFINITY, f64::min);
        let last_date = series[series.len() - 1].date;
        let months_ahead =
            ((target_date - last_date).num_days() as f64 / DAYS_PER_MONTH).max(0.0);

        if series.len() < 3 {
            let half = best * SHORT_SERIES_RANGE_FRACTION;
            return Ok(PerformanceForecast {
                target_date,
                predicted: best,
                range_low: best - half,
                range_high: best + half,
                confidence: SHORT_SERIES_CONFIDENCE,
            });
        }

        let (slope, _intercept, r_squared) = Self::regress(&values);
        let predicted = Self::project(best, slope, months_ahead);

        let fit_confidence = (r_squared * 100.0).clamp(0.0, 100.0);
        let confidence = (fit_confidence - CONFIDENCE_DECAY_PER_MONTH * months_ahead)
            .max(MIN_FORECAST_CONFIDENCE);

        // Band widens as decayed confidence drops: zero width at full
        // confidence, up to ±9% at the floor.
        let half = predicted * (1.0 - confidence / 100.0) * 0.10;

        Ok(PerformanceForecast {
            target_date,
            predicted,
            range_low: predicted - half,
            range_high: predicted + half,
            confidence,
        })
    }

    /// Extrapolate from the current best at the assumed cadence, floored so
    /// the projection never implies more than a 10% improvement
    fn project(best: f64, slope: f64, months_ahead: f64) -> f64 {
        let raw = best + slope * months_ahead * SAMPLES_PER_MONTH;
        raw.max(best * (1.0 - MAX_IMPROVEMENT_FRACTION))
    }

    /// Ordinary least-squares fit of values against index, returning
    /// (slope, intercept, R²)
    fn regress(values: &[f64]) -> (f64, f64, f64) {
        let n = values.len();
        let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();

        let x_mean = xs.iter().mean();
        let y_mean = values.iter().mean();

        let mut ss_xy = 0.0;
        let mut ss_xx = 0.0;
        for (x, y) in xs.iter().zip(values.iter()) {
            ss_xy += (x - x_mean) * (y - y_mean);
            ss_xx += (x - x_mean) * (x - x_mean);
        }

        let slope = if ss_xx == 0.0 { 0.0 } else { ss_xy / ss_xx };
        let intercept = y_mean - slope * x_mean;

        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        for (x, y) in xs.iter().zip(values.iter()) {
            let fitted = intercept + slope * x;
            ss_res += (y - fitted) * (y - fitted);
            ss_tot += (y - y_mean) * (y - y_mean);
        }

        // A constant series carries no trend information; report zero fit
        // confidence rather than the conventional perfect fit.
        let r_squared = if ss_tot == 0.0 {
            0.0
        } else {
            1.0 - ss_res / ss_tot
        };

        (slope, intercept, r_squared)
    }

    /// Reject malformed series: non-finite or non-positive values, or dates
    /// out of chronological order
    fn validate_series(series: &[TrendPoint]) -> Result<()> {
        for point in series {
            ensure_finite(point.value, "trend analysis", "value")?;
            if point.value <= 0.0 {
                return Err(CalculationError::invalid_parameter(
                    "trend analysis",
                    "value",
                    point.value,
                )
                .into());
            }
        }
        for pair in series.windows(2) {
            if pair[1].date < pair[0].date {
                return Err(CalculationError::invalid_parameter(
                    "trend analysis",
                    "series",
                    "dates must be chronologically ordered",
                )
                .into());
            }
        }
        Ok(())
    }
}

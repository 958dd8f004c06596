use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CalculationError, Result};

/// Athlete gender, used to select the applicable threshold table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// Event directionality
///
/// Track events are timed in milliseconds and lower is better. Field events
/// are measured in centimeters and higher is better. Every comparison,
/// threshold walk, and sort order in the engine flows through this enum
/// rather than re-deriving direction from the event id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// Timed event, milliseconds, lower is better
    Track,
    /// Measured event, centimeters, higher is better
    Field,
}

impl EventType {
    /// True when a lower raw value represents a better performance
    pub fn lower_is_better(&self) -> bool {
        matches!(self, EventType::Track)
    }

    /// Is `a` a strictly better performance than `b` for this event type?
    pub fn is_better(&self, a: Decimal, b: Decimal) -> bool {
        match self {
            EventType::Track => a < b,
            EventType::Field => a > b,
        }
    }

    /// Does `performance` meet (reach or beat) `threshold`?
    ///
    /// Boundaries are inclusive: a time exactly on the threshold qualifies,
    /// as does a mark exactly on it.
    pub fn meets(&self, performance: Decimal, threshold: Decimal) -> bool {
        match self {
            EventType::Track => performance <= threshold,
            EventType::Field => performance >= threshold,
        }
    }

    /// Format a raw performance value for display
    ///
    /// Track values render in seconds ("10.45") or minutes ("4:52.10") once
    /// the time passes a minute. Field values render in meters ("6.75m").
    pub fn format_value(&self, value: Decimal) -> String {
        match self {
            EventType::Track => {
                let total_ms = value.to_f64().unwrap_or(0.0).max(0.0);
                // Round to centiseconds first so 59.996s rolls over to
                // "1:00.00" rather than rendering as "60.00"
                let total_cs = (total_ms / 10.0).round() as u64;
                let minutes = total_cs / 6000;
                let seconds = (total_cs % 6000) as f64 / 100.0;
                if minutes == 0 {
                    format!("{:.2}", seconds)
                } else {
                    format!("{}:{:05.2}", minutes, seconds)
                }
            }
            EventType::Field => {
                let cm = value.to_f64().unwrap_or(0.0);
                format!("{:.2}m", cm / 100.0)
            }
        }
    }
}

/// A single raw athletic performance, as supplied by the data-access layer
///
/// The engine enforces no schema beyond a positive numeric value, an event
/// id, and a gender; everything else is carried through for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// Athlete identifier
    pub athlete_id: String,

    /// Event identifier (e.g. "100m", "long_jump")
    pub event: String,

    /// Athlete gender
    pub gender: Gender,

    /// Raw performance value: milliseconds for track, centimeters for field
    pub value: Decimal,

    /// Date the performance was recorded
    pub date: NaiveDate,

    /// Meet or competition name, if known
    pub meet: Option<String>,

    /// True when this performance was a personal record at the time
    pub personal_record: Option<bool>,

    /// Free-form environmental conditions (wind, surface, altitude)
    pub conditions: Option<String>,
}

impl PerformanceRecord {
    /// Validate the raw value: performances must be strictly positive
    pub fn validate(&self) -> Result<()> {
        ensure_positive_performance(self.value, "performance record")?;
        Ok(())
    }
}

/// Reject non-positive performance values with an explicit error
///
/// Zero and negative times or distances are always malformed input, never a
/// legitimate performance; classification and scoring refuse them up front.
pub(crate) fn ensure_positive_performance(value: Decimal, calculation: &str) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(
            CalculationError::invalid_parameter(calculation, "performance", value).into(),
        );
    }
    Ok(())
}

/// Reject NaN and infinite floats in analytics input
pub(crate) fn ensure_finite(value: f64, calculation: &str, parameter: &str) -> Result<()> {
    if !value.is_finite() {
        return Err(CalculationError::invalid_parameter(calculation, parameter, value).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_event_type_direction() {
        assert!(EventType::Track.lower_is_better());
        assert!(!EventType::Field.lower_is_better());

        assert!(EventType::Track.is_better(dec!(10450), dec!(10500)));
        assert!(EventType::Field.is_better(dec!(700), dec!(650)));
    }

    #[test]
    fn test_meets_is_inclusive() {
        assert!(EventType::Track.meets(dec!(10500), dec!(10500)));
        assert!(EventType::Track.meets(dec!(10450), dec!(10500)));
        assert!(!EventType::Track.meets(dec!(10501), dec!(10500)));

        assert!(EventType::Field.meets(dec!(650), dec!(650)));
        assert!(EventType::Field.meets(dec!(651), dec!(650)));
        assert!(!EventType::Field.meets(dec!(649), dec!(650)));
    }

    #[test]
    fn test_track_formatting() {
        assert_eq!(EventType::Track.format_value(dec!(10450)), "10.45");
        assert_eq!(EventType::Track.format_value(dec!(59990)), "59.99");
        assert_eq!(EventType::Track.format_value(dec!(292100)), "4:52.10");
        assert_eq!(EventType::Track.format_value(dec!(60000)), "1:00.00");
    }

    #[test]
    fn test_track_formatting_minute_rollover() {
        // Values that round up to a full minute display as minutes
        assert_eq!(EventType::Track.format_value(dec!(59996)), "1:00.00");
        assert_eq!(EventType::Track.format_value(dec!(59994)), "59.99");
        assert_eq!(EventType::Track.format_value(dec!(119995)), "2:00.00");
    }

    #[test]
    fn test_field_formatting() {
        assert_eq!(EventType::Field.format_value(dec!(675)), "6.75m");
        assert_eq!(EventType::Field.format_value(dec!(1205)), "12.05m");
    }

    #[test]
    fn test_record_validation() {
        let record = PerformanceRecord {
            athlete_id: "a1".to_string(),
            event: "100m".to_string(),
            gender: Gender::Male,
            value: dec!(10450),
            date: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            meet: None,
            personal_record: Some(true),
            conditions: None,
        };
        assert!(record.validate().is_ok());

        let bad = PerformanceRecord {
            value: dec!(-1),
            ..record
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_gender_serde() {
        let json = serde_json::to_string(&Gender::Female).unwrap();
        assert_eq!(json, "\"female\"");
        let back: Gender = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Gender::Female);
    }
}

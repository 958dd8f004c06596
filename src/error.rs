//! Unified error hierarchy for rankrs
//!
//! Provides structured error information for configuration and calculation
//! failures, with integration into the tracing system. The calculation
//! routines favor documented fallbacks (missing threshold table, short data
//! series) over errors; these types cover genuinely malformed input.

use thiserror::Error;

/// Top-level error type for all rankrs operations
#[derive(Debug, Error)]
pub enum RankRsError {
    /// Calculation errors
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// Configuration errors (malformed threshold tables, weights, multipliers)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Calculation errors
#[derive(Debug, Error)]
pub enum CalculationError {
    /// Insufficient data for calculation
    #[error("Insufficient data for {calculation}: {reason}")]
    InsufficientData { calculation: String, reason: String },

    /// Invalid parameter
    #[error("Invalid parameter for {calculation}: {parameter}={value}")]
    InvalidParameter {
        calculation: String,
        parameter: String,
        value: String,
    },

    /// Division by zero
    #[error("Division by zero in {calculation}")]
    DivisionByZero { calculation: String },
}

impl CalculationError {
    /// Convenience constructor for invalid-parameter errors
    pub fn invalid_parameter(
        calculation: impl Into<String>,
        parameter: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        CalculationError::InvalidParameter {
            calculation: calculation.into(),
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Convenience constructor for insufficient-data errors
    pub fn insufficient_data(calculation: impl Into<String>, reason: impl Into<String>) -> Self {
        CalculationError::InsufficientData {
            calculation: calculation.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for rankrs operations
pub type Result<T> = std::result::Result<T, RankRsError>;

impl RankRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RankRsError::Calculation(_) => ErrorSeverity::Warning,
            RankRsError::Validation(_) => ErrorSeverity::Warning,
            RankRsError::Configuration(_) => ErrorSeverity::Error,
            RankRsError::Internal(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RankRsError::Calculation(CalculationError::InsufficientData {
                calculation, ..
            }) => {
                format!(
                    "Not enough data to calculate {}. Please supply a longer performance history.",
                    calculation
                )
            }
            RankRsError::Configuration(reason) => {
                format!("Threshold or scoring configuration is invalid: {}", reason)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
    /// Informational message
    Info,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
            ErrorSeverity::Info => tracing::Level::INFO,
        }
    }
}

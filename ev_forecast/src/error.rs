//! Error types for the ev_forecast crate

use forecast_math::MathError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Coarse classification used by callers to map errors onto a response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The request named something that does not exist or is malformed
    BadInput,
    /// A model, dataset or I/O failure inside the forecast run
    Internal,
}

/// Custom error types for the ev_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// No historical records match the requested segment
    #[error("No data found for segment: {0}")]
    UnknownSegment(String),

    /// Strategy name is not one of the supported strategies
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    /// The segment has data but no per-segment model was registered for it
    #[error("No segment model for segment: {0}")]
    SegmentModelMissing(String),

    /// No model was registered for a recognised strategy
    #[error("No model registered for strategy: {0}")]
    ModelUnavailable(String),

    /// A model returned a value that cannot be clamped or rounded
    #[error("Invalid prediction at step {step}: {value}")]
    InvalidPrediction { step: usize, value: f64 },

    /// Not enough history to seed the forecast state
    #[error("Insufficient history: {0}")]
    InsufficientHistory(String),

    /// Failure reported by a wrapped model
    #[error("Model error: {0}")]
    ModelError(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from forecasting math
    #[error("Math error: {0}")]
    MathError(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error writing CSV output
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from JSON (de)serialization
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ForecastError {
    /// Category of this error for the boundary layer
    pub fn category(&self) -> ErrorCategory {
        match self {
            ForecastError::UnknownSegment(_)
            | ForecastError::UnknownStrategy(_)
            | ForecastError::SegmentModelMissing(_)
            | ForecastError::InsufficientHistory(_)
            | ForecastError::InvalidParameter(_) => ErrorCategory::BadInput,
            _ => ErrorCategory::Internal,
        }
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

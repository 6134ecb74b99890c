//! # Forecast Math
//!
//! Numeric building blocks for recursive multi-step forecasting.
//! This crate provides the fixed-length state buffers, regression and
//! scaling primitives that forecast engines carry from step to step.

use thiserror::Error;

pub mod regression;
pub mod scaling;
pub mod stats;
pub mod window;

pub use regression::{least_squares_slope, LinearFit};
pub use scaling::{MinMaxScaler, Scaler};
pub use stats::{mean, pct_change};
pub use window::{CumulativeTrace, RollingWindow};

/// Errors that can occur in forecasting math
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for forecasting math operations
pub type Result<T> = std::result::Result<T, MathError>;

//! Small descriptive statistics used by feature derivation

use crate::{MathError, Result};

/// Arithmetic mean
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take the mean of an empty slice".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Relative change from `previous` to `current`.
///
/// A zero `previous` yields `0.0` rather than an error or a non-finite value.
pub fn pct_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous
    }
}

//! Least-squares line fitting over index positions
//!
//! Values are regressed against `0, 1, .., n-1`.

use crate::{MathError, Result};

/// Slope and intercept of a fitted line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit a line to the values against their index positions
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(MathError::InsufficientData(
                "Need at least 2 points for linear regression".to_string(),
            ));
        }

        let n = values.len() as f64;

        // Calculate means
        let x_mean = (values.len() - 1) as f64 / 2.0;
        let y_mean = values.iter().sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;

        for (i, &y) in values.iter().enumerate() {
            let x = i as f64;
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        if denominator.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        let slope = numerator / denominator;

        Ok(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    /// Value of the line at index `x`
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Least-squares slope of the values against their index positions
pub fn least_squares_slope(values: &[f64]) -> Result<f64> {
    LinearFit::fit(values).map(|fit| fit.slope)
}

//! Accuracy metrics for scoring a forecast against observed values

use crate::error::{ForecastError, Result};
use serde::Serialize;
use std::fmt;

/// Forecast accuracy metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error over the months with nonzero actuals
    pub mape: f64,
    /// Symmetric Mean Absolute Percentage Error
    pub smape: f64,
}

impl fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape)?;
        writeln!(f, "  SMAPE: {:.4}%", self.smape)?;
        Ok(())
    }
}

/// Calculate accuracy metrics for a forecast vs actual values
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(ForecastError::InvalidParameter(format!(
            "Forecast and actual values must have the same non-zero length, got {} and {}",
            forecast.len(),
            actual.len()
        )));
    }

    let n = forecast.len() as f64;

    let errors: Vec<f64> = forecast
        .iter()
        .zip(actual)
        .map(|(&f, &a)| a - f)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;
    let rmse = mse.sqrt();

    // Months with zero registrations carry no percentage error
    let (pct_sum, pct_count) = actual
        .iter()
        .zip(&errors)
        .filter(|(&a, _)| a != 0.0)
        .fold((0.0, 0usize), |(sum, count), (&a, &e)| {
            (sum + e.abs() / a.abs() * 100.0, count + 1)
        });
    let mape = if pct_count > 0 {
        pct_sum / pct_count as f64
    } else {
        0.0
    };

    let smape = actual
        .iter()
        .zip(forecast)
        .map(|(&a, &f)| {
            let denom = a.abs() + f.abs();
            if denom == 0.0 {
                0.0
            } else {
                200.0 * (a - f).abs() / denom
            }
        })
        .sum::<f64>()
        / n;

    Ok(ForecastAccuracy {
        mae,
        mse,
        rmse,
        mape,
        smape,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_forecast() {
        let values = [10.0, 20.0, 30.0];
        let accuracy = forecast_accuracy(&values, &values).unwrap();
        assert_eq!(accuracy.mae, 0.0);
        assert_eq!(accuracy.rmse, 0.0);
        assert_eq!(accuracy.mape, 0.0);
        assert_eq!(accuracy.smape, 0.0);
    }

    #[test]
    fn test_known_errors() {
        let accuracy = forecast_accuracy(&[12.0, 18.0], &[10.0, 20.0]).unwrap();
        assert!((accuracy.mae - 2.0).abs() < 1e-12);
        assert!((accuracy.mse - 4.0).abs() < 1e-12);
        assert!((accuracy.rmse - 2.0).abs() < 1e-12);
        // (20% + 10%) / 2
        assert!((accuracy.mape - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_actuals_skipped_in_mape() {
        let accuracy = forecast_accuracy(&[1.0, 11.0], &[0.0, 10.0]).unwrap();
        assert!((accuracy.mape - 10.0).abs() < 1e-12);
        assert!((accuracy.mae - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            forecast_accuracy(&[1.0, 2.0], &[1.0]),
            Err(ForecastError::InvalidParameter(_))
        ));
        assert!(forecast_accuracy(&[], &[]).is_err());
    }

    #[test]
    fn test_display() {
        let accuracy = forecast_accuracy(&[12.0], &[10.0]).unwrap();
        let text = accuracy.to_string();
        assert!(text.contains("MAE:   2.0000"));
        assert!(text.contains("MAPE:  20.0000%"));
    }
}

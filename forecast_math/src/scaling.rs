//! Value scaling for sequence models
//!
//! A sequence model is trained on scaled values and its outputs live in the
//! same scaled space. The `Scaler` trait is the seam a fitted scaler is passed
//! through; `MinMaxScaler` is the min-max implementation used for training.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Trait for value scaling/normalization.
pub trait Scaler: Send + Sync {
    /// Transform raw values into the scaled space.
    fn transform(&self, values: &[f64]) -> Result<Vec<f64>>;

    /// Inverse transform scaled values back to original units.
    fn inverse_transform(&self, values: &[f64]) -> Result<Vec<f64>>;

    /// Inverse transform a single scaled value.
    fn inverse_transform_one(&self, value: f64) -> Result<f64> {
        self.inverse_transform(&[value])?
            .first()
            .copied()
            .ok_or_else(|| MathError::CalculationError("Scaler returned no values".to_string()))
    }
}

/// Min-max scaler mapping `[data_min, data_max]` onto `[range_min, range_max]`.
///
/// A constant training series (zero data range) uses a unit range so that
/// transforms stay finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    data_min: f64,
    data_max: f64,
    range_min: f64,
    range_max: f64,
}

impl MinMaxScaler {
    /// Fit a scaler to `[0, 1]` from training values
    pub fn fit(values: &[f64]) -> Result<Self> {
        Self::fit_to_range(values, 0.0, 1.0)
    }

    /// Fit a scaler to a custom output range
    pub fn fit_to_range(values: &[f64], range_min: f64, range_max: f64) -> Result<Self> {
        if values.is_empty() {
            return Err(MathError::InsufficientData(
                "Cannot fit scaler on empty values".to_string(),
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(
                "Cannot fit scaler on non-finite values".to_string(),
            ));
        }

        let data_min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let data_max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self::from_params(data_min, data_max, range_min, range_max)
    }

    /// Rebuild a scaler from previously fitted parameters
    pub fn from_params(data_min: f64, data_max: f64, range_min: f64, range_max: f64) -> Result<Self> {
        if data_max < data_min {
            return Err(MathError::InvalidInput(format!(
                "data_max ({}) is smaller than data_min ({})",
                data_max, data_min
            )));
        }
        if range_max <= range_min {
            return Err(MathError::InvalidInput(
                "Output range must be increasing".to_string(),
            ));
        }

        Ok(Self {
            data_min,
            data_max,
            range_min,
            range_max,
        })
    }

    fn scale(&self) -> f64 {
        let data_range = self.data_max - self.data_min;
        let data_range = if data_range == 0.0 { 1.0 } else { data_range };
        (self.range_max - self.range_min) / data_range
    }

    fn offset(&self) -> f64 {
        self.range_min - self.data_min * self.scale()
    }

    pub fn data_min(&self) -> f64 {
        self.data_min
    }

    pub fn data_max(&self) -> f64 {
        self.data_max
    }
}

impl Scaler for MinMaxScaler {
    fn transform(&self, values: &[f64]) -> Result<Vec<f64>> {
        let (scale, offset) = (self.scale(), self.offset());
        Ok(values.iter().map(|v| v * scale + offset).collect())
    }

    fn inverse_transform(&self, values: &[f64]) -> Result<Vec<f64>> {
        let (scale, offset) = (self.scale(), self.offset());
        Ok(values.iter().map(|v| (v - offset) / scale).collect())
    }
}

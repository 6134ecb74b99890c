//! Fixed-length FIFO buffers used to carry recursive forecast state
//!
//! Contains:
//! - Rolling Window (most recent raw or scaled values)
//! - Cumulative Trace (running sums aligned with a rolling window)
//!
//! Both types are advanced by value: `advanced` returns a new buffer and
//! leaves the receiver untouched, so a state can never be shared mutably
//! between two forecast runs.

use crate::{MathError, Result};
use std::collections::VecDeque;

/// Fixed-length window of the most recent values, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow {
    values: VecDeque<f64>,
}

impl RollingWindow {
    /// Create a window from the given values; the length is fixed from here on
    pub fn new(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(MathError::InsufficientData(
                "Rolling window needs at least one value".to_string(),
            ));
        }

        Ok(Self {
            values: values.iter().copied().collect(),
        })
    }

    /// Create a window from the trailing `capacity` values of a series.
    ///
    /// Shorter series are taken whole.
    pub fn from_tail(series: &[f64], capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(MathError::InvalidInput(
                "Window capacity must be greater than zero".to_string(),
            ));
        }
        let start = series.len().saturating_sub(capacity);
        Self::new(&series[start..])
    }

    /// Return a copy of this window with `value` appended and the oldest value dropped
    pub fn advanced(&self, value: f64) -> Self {
        let mut values = self.values.clone();
        values.push_back(value);
        values.pop_front();
        Self { values }
    }

    /// Most recent value
    pub fn latest(&self) -> f64 {
        // Never empty: construction rejects empty input and advancing keeps the length
        self.values.back().copied().unwrap_or_default()
    }

    /// The `n` most recent values, most recent first
    pub fn lags(&self, n: usize) -> Result<Vec<f64>> {
        if self.values.len() < n {
            return Err(MathError::InsufficientData(format!(
                "Need {} values for lags, window holds {}",
                n,
                self.values.len()
            )));
        }

        Ok(self.values.iter().rev().take(n).copied().collect())
    }

    /// Values oldest first
    pub fn to_vec(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    /// Iterate over values oldest first
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }

    /// Number of values held (fixed for the lifetime of the window)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed window
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Running sums aligned with a rolling window.
///
/// The oldest entry is dropped on each advance without rebasing the remaining
/// sums, so absolute values drift away from a from-scratch cumulative sum.
/// Only the slope of the trace is meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeTrace {
    sums: VecDeque<f64>,
}

impl CumulativeTrace {
    /// Seed the trace with the running sum of the window's values
    pub fn from_window(window: &RollingWindow) -> Self {
        let mut total = 0.0;
        let sums = window
            .iter()
            .map(|v| {
                total += v;
                total
            })
            .collect();

        Self { sums }
    }

    /// Return a copy with `last + increment` appended and the oldest sum dropped
    pub fn advanced(&self, increment: f64) -> Self {
        let mut sums = self.sums.clone();
        let next = self.last() + increment;
        sums.push_back(next);
        sums.pop_front();
        Self { sums }
    }

    /// Most recent running sum
    pub fn last(&self) -> f64 {
        self.sums.back().copied().unwrap_or_default()
    }

    /// Sums oldest first
    pub fn to_vec(&self) -> Vec<f64> {
        self.sums.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }
}

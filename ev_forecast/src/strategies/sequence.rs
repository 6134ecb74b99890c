//! Sequence model adapter
//!
//! The recurrence runs entirely in scaled space: each scaled prediction is
//! appended to the window as-is, and only the emitted value is unscaled.

use crate::error::{ForecastError, Result};
use crate::models::SequenceBundle;
use crate::series::SeriesPoint;
use crate::strategies::finalize_count;
use crate::utils::{month_label, next_month};
use chrono::NaiveDate;
use forecast_math::{RollingWindow, Scaler};
use tracing::debug;

/// Scaled window carried between sequence steps
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceState {
    window: RollingWindow,
    date: NaiveDate,
}

impl SequenceState {
    /// Scale the trailing `window_size` values of the history
    pub fn seed(
        history: &[f64],
        last_date: NaiveDate,
        scaler: &dyn Scaler,
        window_size: usize,
    ) -> Result<Self> {
        if window_size == 0 || history.len() < window_size {
            return Err(ForecastError::InsufficientHistory(format!(
                "Sequence model needs {} observations, got {}",
                window_size,
                history.len()
            )));
        }

        let scaled = scaler.transform(&history[history.len() - window_size..])?;

        Ok(Self {
            window: RollingWindow::new(&scaled)?,
            date: last_date,
        })
    }

    /// Scaled values, oldest first
    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Forecast points plus the scaled state after the last step
#[derive(Debug, Clone)]
pub struct SequenceRun {
    pub points: Vec<SeriesPoint>,
    pub state: SequenceState,
}

/// Run `horizon` sequence steps from `state`
pub fn run(bundle: &SequenceBundle, mut state: SequenceState, horizon: usize) -> Result<SequenceRun> {
    let mut points = Vec::with_capacity(horizon);

    for step_index in 1..=horizon {
        let scaled = bundle.model.predict(&state.window.to_vec())?;
        if !scaled.is_finite() {
            return Err(ForecastError::InvalidPrediction {
                step: step_index,
                value: scaled,
            });
        }

        let raw = bundle.scaler.inverse_transform_one(scaled)?;
        let prediction = finalize_count(raw, step_index)?;
        let date = next_month(state.date)?;

        debug!(
            step = step_index,
            month = %month_label(date),
            scaled,
            prediction,
            "Sequence step"
        );

        points.push(SeriesPoint::forecast(month_label(date), prediction));
        state = SequenceState {
            window: state.window.advanced(scaled),
            date,
        };
    }

    Ok(SequenceRun { points, state })
}

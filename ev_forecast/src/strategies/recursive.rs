//! Recursive step engine for one-step models
//!
//! Every step builds a feature vector from the current state, asks the model
//! for one value, and advances the state with that value before the next
//! step. State is copied and advanced, never mutated through a shared handle.

use crate::data::SegmentContext;
use crate::error::{ForecastError, Result};
use crate::features::{derive_features, CalendarStep};
use crate::models::OneStepModel;
use crate::series::SeriesPoint;
use crate::strategies::finalize_count;
use crate::utils::{month_label, next_month};
use chrono::NaiveDate;
use forecast_math::{CumulativeTrace, RollingWindow};
use tracing::{debug, warn};

/// Rolling state carried between recursive steps
#[derive(Debug, Clone, PartialEq)]
pub struct RecursiveState {
    window: RollingWindow,
    trace: CumulativeTrace,
    date: NaiveDate,
    months_since_start: i64,
}

impl RecursiveState {
    /// Seed the state from the trailing `lag_window` historical values.
    ///
    /// `last_date` and `context.months_since_start` describe the latest
    /// observation; the first step predicts the month after it.
    pub fn seed(
        history: &[f64],
        last_date: NaiveDate,
        context: &SegmentContext,
        lag_window: usize,
    ) -> Result<Self> {
        if history.len() < 3 {
            return Err(ForecastError::InsufficientHistory(format!(
                "Recursive forecasting needs at least 3 observations, got {}",
                history.len()
            )));
        }

        if history.len() < lag_window {
            warn!(
                available = history.len(),
                lag_window, "Seeding a shorter rolling window than configured"
            );
        }

        let window = RollingWindow::from_tail(history, lag_window)?;
        let trace = CumulativeTrace::from_window(&window);

        Ok(Self {
            window,
            trace,
            date: last_date,
            months_since_start: context.months_since_start,
        })
    }

    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    pub fn trace(&self) -> &CumulativeTrace {
        &self.trace
    }

    /// Date of the most recent value in the window
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Calendar position of the next step
    fn next_step(&self) -> Result<CalendarStep> {
        Ok(CalendarStep {
            date: next_month(self.date)?,
            months_since_start: self.months_since_start + 1,
        })
    }

    /// State after folding in the prediction for `step`
    fn advanced(&self, step: &CalendarStep, prediction: f64) -> Self {
        Self {
            window: self.window.advanced(prediction),
            trace: self.trace.advanced(prediction),
            date: step.date,
            months_since_start: step.months_since_start,
        }
    }
}

/// Forecast points plus the state after the last step
#[derive(Debug, Clone)]
pub struct RecursiveRun {
    pub points: Vec<SeriesPoint>,
    pub state: RecursiveState,
}

/// Run `horizon` recursive steps from `state`.
///
/// A non-finite model output aborts the run; no partial forecast is returned.
pub fn run(
    model: &dyn OneStepModel,
    context: &SegmentContext,
    mut state: RecursiveState,
    horizon: usize,
) -> Result<RecursiveRun> {
    let mut points = Vec::with_capacity(horizon);

    for step_index in 1..=horizon {
        let step = state.next_step()?;
        let features = derive_features(&state.window, &state.trace, context, &step)?;

        let raw = model.predict(&features)?;
        let prediction = finalize_count(raw, step_index)?;

        debug!(
            step = step_index,
            month = %month_label(step.date),
            raw,
            prediction,
            "Recursive step"
        );

        points.push(SeriesPoint::forecast(month_label(step.date), prediction));
        state = state.advanced(&step, prediction);
    }

    Ok(RecursiveRun { points, state })
}

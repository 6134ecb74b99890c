//! Feature derivation for one-step (tree ensemble) models
//!
//! A feature vector is built fresh for every forecast step from the current
//! rolling window, the cumulative trace, the segment constants and the
//! calendar position of the step being predicted.

use crate::data::SegmentContext;
use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use forecast_math::{least_squares_slope, mean, pct_change, CumulativeTrace, RollingWindow};
use serde::Serialize;

/// Column order the tree models were trained with
pub const FEATURE_COLUMNS: [&str; 11] = [
    "months_since_start",
    "year",
    "month",
    "county_encoded",
    "ev_total_lag1",
    "ev_total_lag2",
    "ev_total_lag3",
    "ev_total_roll_mean_3",
    "ev_total_pct_change_1",
    "ev_total_pct_change_3",
    "ev_growth_slope",
];

/// Minimum trace length for a slope; shorter traces yield 0
const MIN_SLOPE_POINTS: usize = 3;

/// Calendar position of the step being predicted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarStep {
    pub date: NaiveDate,
    pub months_since_start: i64,
}

/// Model input for a single forecast step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    pub months_since_start: i64,
    pub year: i32,
    pub month: u32,
    pub county_encoded: i64,
    pub lag1: f64,
    pub lag2: f64,
    pub lag3: f64,
    pub roll_mean_3: f64,
    pub pct_change_1: f64,
    pub pct_change_3: f64,
    pub growth_slope: f64,
}

impl FeatureVector {
    /// Values in `FEATURE_COLUMNS` order
    pub fn to_array(&self) -> [f64; 11] {
        [
            self.months_since_start as f64,
            self.year as f64,
            self.month as f64,
            self.county_encoded as f64,
            self.lag1,
            self.lag2,
            self.lag3,
            self.roll_mean_3,
            self.pct_change_1,
            self.pct_change_3,
            self.growth_slope,
        ]
    }
}

/// Build the feature vector for one step.
///
/// The window must hold at least three values.
pub fn derive_features(
    window: &RollingWindow,
    trace: &CumulativeTrace,
    context: &SegmentContext,
    step: &CalendarStep,
) -> Result<FeatureVector> {
    let lags = window.lags(3).map_err(|_| {
        ForecastError::InsufficientHistory(format!(
            "Lag features need 3 values, window holds {}",
            window.len()
        ))
    })?;
    let (lag1, lag2, lag3) = (lags[0], lags[1], lags[2]);

    Ok(FeatureVector {
        months_since_start: step.months_since_start,
        year: step.date.year(),
        month: step.date.month(),
        county_encoded: context.segment_encoded_id,
        lag1,
        lag2,
        lag3,
        roll_mean_3: mean(&lags)?,
        pct_change_1: pct_change(lag1, lag2),
        pct_change_3: pct_change(lag1, lag3),
        growth_slope: trend_slope(trace)?,
    })
}

/// Least-squares slope of the trace, or 0 for fewer than three points
pub fn trend_slope(trace: &CumulativeTrace) -> Result<f64> {
    if trace.len() < MIN_SLOPE_POINTS {
        return Ok(0.0);
    }
    Ok(least_squares_slope(&trace.to_vec())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> SegmentContext {
        SegmentContext {
            segment_encoded_id: 7,
            months_since_start: 40,
        }
    }

    fn step() -> CalendarStep {
        CalendarStep {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            months_since_start: 41,
        }
    }

    #[test]
    fn test_lag_and_mean_features() {
        let window = RollingWindow::new(&[10.0, 12.0, 11.0, 13.0, 14.0, 16.0]).unwrap();
        let trace = CumulativeTrace::from_window(&window);
        let features = derive_features(&window, &trace, &context(), &step()).unwrap();

        assert_eq!(features.lag1, 16.0);
        assert_eq!(features.lag2, 14.0);
        assert_eq!(features.lag3, 13.0);
        assert_eq!(features.roll_mean_3, (16.0 + 14.0 + 13.0) / 3.0);
        assert_eq!(features.pct_change_1, (16.0 - 14.0) / 14.0);
        assert_eq!(features.pct_change_3, (16.0 - 13.0) / 13.0);
        assert_eq!(features.year, 2024);
        assert_eq!(features.month, 3);
        assert_eq!(features.county_encoded, 7);
        assert_eq!(features.months_since_start, 41);
    }

    #[test]
    fn test_zero_denominator_gives_zero_change() {
        let window = RollingWindow::new(&[0.0, 0.0, 5.0]).unwrap();
        let trace = CumulativeTrace::from_window(&window);
        let features = derive_features(&window, &trace, &context(), &step()).unwrap();

        assert_eq!(features.pct_change_1, 0.0);
        assert_eq!(features.pct_change_3, 0.0);
        assert!(features.to_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_short_trace_has_zero_slope() {
        let window = RollingWindow::new(&[3.0, 4.0, 5.0]).unwrap();
        let short = CumulativeTrace::from_window(&RollingWindow::new(&[1.0, 2.0]).unwrap());
        let features = derive_features(&window, &short, &context(), &step()).unwrap();
        assert_eq!(features.growth_slope, 0.0);
    }

    #[test]
    fn test_window_too_short() {
        let window = RollingWindow::new(&[3.0, 4.0]).unwrap();
        let trace = CumulativeTrace::from_window(&window);
        let err = derive_features(&window, &trace, &context(), &step()).unwrap_err();
        assert!(matches!(err, ForecastError::InsufficientHistory(_)));
    }

    #[test]
    fn test_array_follows_column_order() {
        let window = RollingWindow::new(&[1.0, 2.0, 4.0]).unwrap();
        let trace = CumulativeTrace::from_window(&window);
        let features = derive_features(&window, &trace, &context(), &step()).unwrap();
        let values = features.to_array();

        assert_eq!(values.len(), FEATURE_COLUMNS.len());
        assert_eq!(values[0], 41.0);
        assert_eq!(values[4], 4.0);
        // Trace [1, 3, 7]: slope over 0..3 is 3
        assert!((values[10] - 3.0).abs() < 1e-12);
    }
}

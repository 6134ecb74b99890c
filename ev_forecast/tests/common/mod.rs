#![allow(dead_code)]

use chrono::{Months, NaiveDate};
use ev_forecast::{
    Dataset, FeatureVector, FutureFrame, ModelRegistry, Observation, OneStepModel, Result,
    SegmentModel, SegmentPrediction, SequenceModel, Strategy,
};
use forecast_math::MinMaxScaler;
use std::sync::Arc;

/// Month-end date `offset` months after January 2022
pub fn month(offset: u32) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap() + Months::new(offset + 1);
    first.pred_opt().unwrap()
}

/// Observations for one segment, one per month from January 2022
pub fn observations(segment: &str, encoded: i64, values: &[f64]) -> Vec<Observation> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| Observation {
            date: month(i as u32),
            segment: segment.to_string(),
            value,
            segment_encoded_id: encoded,
            months_since_start: i as i64,
        })
        .collect()
}

/// King: 30 months of steady growth ending in [10, 12, 11, 13, 14, 16].
/// Pierce: 8 months.
pub fn sample_dataset() -> Dataset {
    let mut king: Vec<f64> = (0..24).map(|i| i as f64 * 0.25).collect();
    king.extend([10.0, 12.0, 11.0, 13.0, 14.0, 16.0]);

    let mut all = observations("King", 3, &king);
    all.extend(observations(
        "Pierce",
        7,
        &[40.0, 42.0, 45.0, 47.0, 50.0, 52.0, 55.0, 58.0],
    ));
    Dataset::from_observations(all).unwrap()
}

/// Always predicts the same value
pub struct Constant(pub f64);

impl OneStepModel for Constant {
    fn predict(&self, _features: &FeatureVector) -> Result<f64> {
        Ok(self.0)
    }
}

/// Predicts lag1 plus a fixed step
pub struct LagDrift(pub f64);

impl OneStepModel for LagDrift {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        Ok(features.lag1 + self.0)
    }
}

/// Linear trend over a training history ending at `last`
pub struct Trend {
    pub last: NaiveDate,
    pub history: u32,
    pub start: f64,
    pub slope: f64,
}

impl SegmentModel for Trend {
    fn future_frame(&self, periods: usize) -> Result<FutureFrame> {
        let first = self.last - Months::new(self.history - 1);
        let dates = (0..self.history + periods as u32)
            .map(|i| first + Months::new(i))
            .collect();
        Ok(FutureFrame { dates })
    }

    fn predict(&self, frame: &FutureFrame) -> Result<Vec<SegmentPrediction>> {
        Ok(frame
            .dates
            .iter()
            .enumerate()
            .map(|(i, &date)| SegmentPrediction {
                date,
                point_estimate: self.start + self.slope * i as f64,
            })
            .collect())
    }
}

/// Adds a fixed increment to the last scaled value
pub struct ScaledDrift(pub f64);

impl SequenceModel for ScaledDrift {
    fn predict(&self, window: &[f64]) -> Result<f64> {
        Ok(window[window.len() - 1] + self.0)
    }
}

/// Registry with every strategy backed by a stub
pub fn full_registry() -> ModelRegistry {
    ModelRegistry::new()
        .with_one_step(Strategy::XGBoost, Arc::new(Constant(20.4)))
        .unwrap()
        .with_one_step(Strategy::RandomForest, Arc::new(LagDrift(1.0)))
        .unwrap()
        .with_segment_model(
            "King",
            Arc::new(Trend {
                last: month(29),
                history: 30,
                start: 0.0,
                slope: 0.5,
            }),
        )
        .with_sequence_model(
            Arc::new(ScaledDrift(0.05)),
            Arc::new(MinMaxScaler::fit(&[0.0, 100.0]).unwrap()),
        )
}

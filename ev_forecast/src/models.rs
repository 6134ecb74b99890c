//! Model collaborators consumed by the forecast engines
//!
//! Trained models live outside this crate. They are handed in through the
//! traits below and collected in a `ModelRegistry` that is built once and
//! shared read-only between forecast runs.

use crate::error::{ForecastError, Result};
use crate::features::FeatureVector;
use crate::strategies::{Strategy, StrategyFamily};
use chrono::NaiveDate;
use forecast_math::Scaler;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Model that predicts one value from one feature vector (tree ensembles)
pub trait OneStepModel: Send + Sync {
    /// Predict the next value
    fn predict(&self, features: &FeatureVector) -> Result<f64>;
}

/// Dates a segment model is asked to predict for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FutureFrame {
    /// Training dates followed by the requested future months
    pub dates: Vec<NaiveDate>,
}

/// One predicted row of a segment model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPrediction {
    pub date: NaiveDate,
    pub point_estimate: f64,
}

/// Per-segment model that extrapolates a whole horizon in one call
pub trait SegmentModel: Send + Sync {
    /// Build a frame extending the model's history by `periods` months
    fn future_frame(&self, periods: usize) -> Result<FutureFrame>;

    /// Predict every row of the frame
    fn predict(&self, frame: &FutureFrame) -> Result<Vec<SegmentPrediction>>;
}

/// Recurrent model predicting the next scaled value from a scaled window
pub trait SequenceModel: Send + Sync {
    fn predict(&self, window: &[f64]) -> Result<f64>;
}

/// A sequence model together with the scaler it was trained with
#[derive(Clone)]
pub struct SequenceBundle {
    pub model: Arc<dyn SequenceModel>,
    pub scaler: Arc<dyn Scaler>,
}

/// Loaded models, keyed by strategy (and by segment for segment models)
#[derive(Clone, Default)]
pub struct ModelRegistry {
    one_step: HashMap<Strategy, Arc<dyn OneStepModel>>,
    segment_models: BTreeMap<String, Arc<dyn SegmentModel>>,
    sequence: Option<SequenceBundle>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a one-step model for a recursive strategy
    pub fn with_one_step(mut self, strategy: Strategy, model: Arc<dyn OneStepModel>) -> Result<Self> {
        if strategy.family() != StrategyFamily::RecursiveStep {
            return Err(ForecastError::InvalidParameter(format!(
                "{} is not a one-step strategy",
                strategy
            )));
        }
        self.one_step.insert(strategy, model);
        Ok(self)
    }

    /// Register the model for one segment
    pub fn with_segment_model(mut self, segment: &str, model: Arc<dyn SegmentModel>) -> Self {
        self.segment_models.insert(segment.to_string(), model);
        self
    }

    /// Register the sequence model and its scaler
    pub fn with_sequence_model(
        mut self,
        model: Arc<dyn SequenceModel>,
        scaler: Arc<dyn Scaler>,
    ) -> Self {
        self.sequence = Some(SequenceBundle { model, scaler });
        self
    }

    /// One-step model for a recursive strategy
    pub fn one_step(&self, strategy: Strategy) -> Result<&dyn OneStepModel> {
        self.one_step
            .get(&strategy)
            .map(|model| model.as_ref())
            .ok_or_else(|| ForecastError::ModelUnavailable(strategy.to_string()))
    }

    /// Case-insensitive segment model lookup
    pub fn segment_model(&self, segment: &str) -> Option<&dyn SegmentModel> {
        let wanted = segment.to_lowercase();
        self.segment_models
            .iter()
            .find(|(name, _)| name.to_lowercase() == wanted)
            .map(|(_, model)| model.as_ref())
    }

    /// The registered sequence model and scaler
    pub fn sequence(&self) -> Result<&SequenceBundle> {
        self.sequence
            .as_ref()
            .ok_or_else(|| ForecastError::ModelUnavailable(Strategy::Lstm.to_string()))
    }

    /// Segments that have a per-segment model
    pub fn segment_model_names(&self) -> Vec<&str> {
        self.segment_models.keys().map(String::as_str).collect()
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut one_step: Vec<&str> = self.one_step.keys().map(|s| s.name()).collect();
        one_step.sort_unstable();

        f.debug_struct("ModelRegistry")
            .field("one_step", &one_step)
            .field("segment_models", &self.segment_model_names())
            .field("sequence", &self.sequence.is_some())
            .finish()
    }
}

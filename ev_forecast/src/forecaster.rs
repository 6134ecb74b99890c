//! Series assembly: history window, strategy dispatch and output stitching

use crate::config::ForecastConfig;
use crate::data::{Dataset, SegmentHistory};
use crate::error::{ForecastError, Result};
use crate::metrics::{forecast_accuracy, ForecastAccuracy};
use crate::models::ModelRegistry;
use crate::series::{ForecastResult, SeriesPoint};
use crate::strategies::recursive::{self, RecursiveState};
use crate::strategies::sequence::{self, SequenceState};
use crate::strategies::{self, Strategy, StrategyFamily};
use crate::utils::month_label;
use tracing::info;

/// Produces forecast results from a dataset and a set of loaded models.
///
/// Holds no per-request state; one instance can serve any number of
/// forecasts, including concurrently.
#[derive(Debug, Clone)]
pub struct Forecaster<'a> {
    registry: &'a ModelRegistry,
    config: ForecastConfig,
}

impl<'a> Forecaster<'a> {
    /// Create a forecaster with the default configuration
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self {
            registry,
            config: ForecastConfig::default(),
        }
    }

    /// Create a forecaster with a validated custom configuration
    pub fn with_config(registry: &'a ModelRegistry, config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast `horizon` months for `segment` using the named strategy.
    ///
    /// Segment and strategy names are matched case-insensitively.
    pub fn forecast(
        &self,
        dataset: &Dataset,
        segment: &str,
        strategy: &str,
        horizon: usize,
    ) -> Result<ForecastResult> {
        let history = dataset.segment_history(segment)?;
        let strategy: Strategy = strategy.parse()?;
        self.forecast_history(&history, segment, strategy, horizon)
    }

    /// Forecast with the configured default horizon
    pub fn forecast_default(
        &self,
        dataset: &Dataset,
        segment: &str,
        strategy: &str,
    ) -> Result<ForecastResult> {
        self.forecast(dataset, segment, strategy, self.config.default_horizon)
    }

    /// Forecast from an already filtered segment history.
    ///
    /// `segment` is the caller's label, echoed into the result metadata and
    /// used for the segment model lookup.
    pub fn forecast_history(
        &self,
        history: &SegmentHistory,
        segment: &str,
        strategy: Strategy,
        horizon: usize,
    ) -> Result<ForecastResult> {
        self.config.check_horizon(horizon)?;

        info!(
            segment,
            strategy = %strategy,
            horizon,
            observations = history.len(),
            "Starting forecast"
        );

        let historical: Vec<SeriesPoint> = history
            .tail(self.config.history_window)
            .iter()
            .map(|o| SeriesPoint::historical(month_label(o.date), o.value))
            .collect();

        let forecast = if horizon == 0 {
            Vec::new()
        } else {
            self.forecast_segment(history, segment, strategy, horizon)?
        };

        let result =
            ForecastResult::assemble(historical, forecast, segment, strategy.name(), horizon);

        info!(
            segment,
            strategy = %strategy,
            history_points = result.meta().history_point_count,
            forecast_points = result.forecast_points().len(),
            "Forecast complete"
        );

        Ok(result)
    }

    /// Dispatch to the engine of the strategy's family
    fn forecast_segment(
        &self,
        history: &SegmentHistory,
        segment: &str,
        strategy: Strategy,
        horizon: usize,
    ) -> Result<Vec<SeriesPoint>> {
        let values = history.values();
        let last_date = history.last_date();

        match strategy.family() {
            StrategyFamily::RecursiveStep => {
                let model = self.registry.one_step(strategy)?;
                let context = history.context();
                let state =
                    RecursiveState::seed(&values, last_date, &context, self.config.lag_window)?;
                Ok(recursive::run(model, &context, state, horizon)?.points)
            }
            StrategyFamily::SegmentDelegate => {
                strategies::segment::run(self.registry, segment, horizon)
            }
            StrategyFamily::SequenceWindow => {
                let bundle = self.registry.sequence()?;
                let state = SequenceState::seed(
                    &values,
                    last_date,
                    bundle.scaler.as_ref(),
                    self.config.sequence_window,
                )?;
                Ok(sequence::run(bundle, state, horizon)?.points)
            }
        }
    }

    /// Score a strategy by forecasting the last `holdout` months of a segment
    /// from the history before them.
    ///
    /// Fails with `InvalidParameter` when the forecast months are not the
    /// withheld months.
    pub fn evaluate_holdout(
        &self,
        dataset: &Dataset,
        segment: &str,
        strategy: &str,
        holdout: usize,
    ) -> Result<ForecastAccuracy> {
        let history = dataset.segment_history(segment)?;
        let strategy: Strategy = strategy.parse()?;
        let (train, actual) = history.split_holdout(holdout)?;

        let withheld: Vec<String> = history
            .tail(holdout)
            .iter()
            .map(|o| month_label(o.date))
            .collect();

        let result = self.forecast_history(&train, segment, strategy, holdout)?;

        // Segment models extend their own training history, which may not end
        // where the truncated history does
        let forecast_months: Vec<&str> = result
            .forecast_points()
            .iter()
            .map(|p| p.date())
            .collect();
        if forecast_months != withheld {
            return Err(ForecastError::InvalidParameter(format!(
                "{} forecasts {:?} but the withheld months are {:?}",
                strategy, forecast_months, withheld
            )));
        }

        let accuracy = forecast_accuracy(&result.forecast_values(), &actual)?;

        info!(
            segment,
            strategy = %strategy,
            holdout,
            mae = accuracy.mae,
            rmse = accuracy.rmse,
            "Holdout evaluation"
        );

        Ok(accuracy)
    }
}

//! # EV Forecast
//!
//! Multi-month forecasting of county-level electric vehicle registrations.
//!
//! ## Features
//!
//! - Monthly observation loading from CSV (via polars)
//! - Per-step feature derivation for tree-ensemble models (lags, rolling mean,
//!   percent changes, cumulative growth slope)
//! - Three forecasting engines behind one entry point:
//!   - **Recursive step** for `xgboost` and `random_forest`
//!   - **Segment delegate** for `prophet`, one model per county
//!   - **Sequence window** for `lstm`, rolled forward in scaled space
//! - Historical + forecast series assembly with JSON and CSV export
//! - Deterministic insight summaries and holdout accuracy evaluation
//!
//! Trained models are not part of this crate. Callers register them in a
//! [`ModelRegistry`] through the [`OneStepModel`], [`SegmentModel`] and
//! [`SequenceModel`] traits.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ev_forecast::{DataLoader, FeatureVector, Forecaster, ModelRegistry, OneStepModel, Strategy};
//! use std::sync::Arc;
//!
//! struct LastValue;
//!
//! impl OneStepModel for LastValue {
//!     fn predict(&self, features: &FeatureVector) -> ev_forecast::Result<f64> {
//!         Ok(features.lag1)
//!     }
//! }
//!
//! fn main() -> ev_forecast::Result<()> {
//!     let dataset = DataLoader::from_csv("ev_monthly.csv")?;
//!     let registry = ModelRegistry::new().with_one_step(Strategy::XGBoost, Arc::new(LastValue))?;
//!
//!     let forecaster = Forecaster::new(&registry);
//!     let result = forecaster.forecast(&dataset, "King", "xgboost", 12)?;
//!
//!     println!("{}", result.to_json_pretty()?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod forecaster;
pub mod insights;
pub mod metrics;
pub mod models;
pub mod series;
pub mod strategies;
pub mod utils;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::data::{DataLoader, Dataset, Observation, SegmentContext, SegmentHistory};
pub use crate::error::{ErrorCategory, ForecastError, Result};
pub use crate::features::{derive_features, FeatureVector, FEATURE_COLUMNS};
pub use crate::forecaster::Forecaster;
pub use crate::insights::{summarize, GrowthTrend, Insights};
pub use crate::metrics::{forecast_accuracy, ForecastAccuracy};
pub use crate::models::{
    FutureFrame, ModelRegistry, OneStepModel, SegmentModel, SegmentPrediction, SequenceBundle,
    SequenceModel,
};
pub use crate::series::{ForecastMeta, ForecastResult, SeriesPoint};
pub use crate::strategies::{Strategy, StrategyFamily};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! # EV Forecast Workspace
//!
//! Facade over the workspace crates:
//!
//! - [`ev_forecast`]: data loading, forecasting engines, series assembly
//! - [`forecast_math`]: rolling windows, scaling and regression helpers
//!
//! ## Example
//!
//! ```
//! use ev_forecast_workspace::ev_forecast::Strategy;
//!
//! let strategy: Strategy = "Prophet".parse().unwrap();
//! assert_eq!(strategy.name(), "prophet");
//! ```

pub use ev_forecast;
pub use forecast_math;

pub use ev_forecast::{ForecastError, ForecastResult, Forecaster, ModelRegistry, Strategy};

//! Forecast strategies and the engines that run them
//!
//! Each supported strategy belongs to one of three families, and each family
//! has one engine producing the forecast segment of the output series:
//!
//! - **Recursive step** (`xgboost`, `random_forest`): one feature vector in,
//!   one value out; each prediction is fed back into the rolling state.
//! - **Segment delegate** (`prophet`): a per-segment model extrapolates the
//!   whole horizon itself.
//! - **Sequence window** (`lstm`): a recurrent model over a scaled window,
//!   rolled forward in scaled space.

use crate::error::{ForecastError, Result};
use std::fmt;
use std::str::FromStr;

pub mod recursive;
pub mod segment;
pub mod sequence;

/// Supported forecasting strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Gradient-boosted tree ensemble
    XGBoost,
    /// Random forest ensemble
    RandomForest,
    /// Per-county additive time-series model
    Prophet,
    /// Recurrent sequence model
    Lstm,
}

/// How a strategy produces its forecast segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyFamily {
    RecursiveStep,
    SegmentDelegate,
    SequenceWindow,
}

impl Strategy {
    /// All strategies, in catalog order
    pub const ALL: [Strategy; 4] = [
        Strategy::XGBoost,
        Strategy::RandomForest,
        Strategy::Prophet,
        Strategy::Lstm,
    ];

    /// Lowercase strategy name
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::XGBoost => "xgboost",
            Strategy::RandomForest => "random_forest",
            Strategy::Prophet => "prophet",
            Strategy::Lstm => "lstm",
        }
    }

    pub fn family(&self) -> StrategyFamily {
        match self {
            Strategy::XGBoost | Strategy::RandomForest => StrategyFamily::RecursiveStep,
            Strategy::Prophet => StrategyFamily::SegmentDelegate,
            Strategy::Lstm => StrategyFamily::SequenceWindow,
        }
    }

    /// Names of all strategies, in catalog order
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Strategy::name).collect()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ForecastError;

    /// Case-insensitive parse of a strategy name
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.name() == wanted)
            .ok_or_else(|| ForecastError::UnknownStrategy(s.to_string()))
    }
}

/// Clamp a count prediction to be non-negative and round it to an integer.
///
/// Ties round to even. Non-finite predictions are rejected.
pub(crate) fn finalize_count(value: f64, step: usize) -> Result<f64> {
    let value = finalize_level(value, step)?;
    Ok(value.round_ties_even())
}

/// Clamp a continuous prediction to be non-negative.
pub(crate) fn finalize_level(value: f64, step: usize) -> Result<f64> {
    if !value.is_finite() {
        return Err(ForecastError::InvalidPrediction { step, value });
    }
    Ok(value.max(0.0))
}

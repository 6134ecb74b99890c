//! Deterministic narrative summary of a forecast

use crate::error::{ForecastError, Result};
use crate::series::ForecastResult;
use serde::Serialize;
use std::fmt;

/// Ratio of last to first forecast above which growth counts as strong
const STRONG_GROWTH_RATIO: f64 = 1.2;

/// Direction of the forecast segment, first month against last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthTrend {
    StrongUpward,
    ModerateUpward,
    Stable,
}

impl GrowthTrend {
    /// Classify growth from the first and last forecast values
    pub fn classify(first: f64, last: f64) -> Self {
        if last > first * STRONG_GROWTH_RATIO {
            GrowthTrend::StrongUpward
        } else if last > first {
            GrowthTrend::ModerateUpward
        } else {
            GrowthTrend::Stable
        }
    }
}

impl fmt::Display for GrowthTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GrowthTrend::StrongUpward => "strong upward",
            GrowthTrend::ModerateUpward => "moderate upward",
            GrowthTrend::Stable => "stable",
        };
        f.write_str(label)
    }
}

/// Summary, observations and planning recommendations for one forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub peak_date: String,
    pub peak_value: f64,
    pub growth: GrowthTrend,
    pub summary: String,
    pub observations: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Summarize the forecast points of `result`.
///
/// Historical points are ignored. The earliest month wins a tie for the peak.
pub fn summarize(result: &ForecastResult) -> Result<Insights> {
    let points: Vec<(&str, f64)> = result
        .forecast_points()
        .iter()
        .filter_map(|p| p.forecast_value().map(|v| (p.date(), v)))
        .collect();

    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.1, last.1),
        _ => {
            return Err(ForecastError::DataError(
                "No forecast data available".to_string(),
            ))
        }
    };

    let (peak_date, peak_value) = points
        .iter()
        .skip(1)
        .fold(points[0], |peak, &point| if point.1 > peak.1 { point } else { peak });

    let growth = GrowthTrend::classify(first, last);
    let meta = result.meta();

    let summary = format!(
        "EV demand in {} is projected to follow a {} growth trajectory over the next {} months, \
         with peak demand expected around {}.",
        meta.segment, growth, meta.horizon, peak_date
    );

    let observations = vec![
        format!(
            "Peak forecasted EV demand reaches approximately {} vehicles.",
            (peak_value * 100.0).round() / 100.0
        ),
        format!(
            "The selected {} model captures consistent growth patterns.",
            meta.strategy
        ),
        "Demand growth remains steady without abrupt volatility.".to_string(),
    ];

    let recommendations = vec![
        "Align infrastructure expansion ahead of the projected peak period.".to_string(),
        "Use scenario analysis to stress-test aggressive adoption cases.".to_string(),
        "Update planning assumptions as new forecast data becomes available.".to_string(),
    ];

    Ok(Insights {
        peak_date: peak_date.to_string(),
        peak_value,
        growth,
        summary,
        observations,
        recommendations,
    })
}

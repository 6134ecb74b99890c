//! Output series: historical and forecast points stitched into one result

use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// One month of the output series.
///
/// Exactly one of `historical` / `forecast` is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    date: String,
    historical: Option<f64>,
    forecast: Option<f64>,
}

impl SeriesPoint {
    /// Observed value
    pub fn historical(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            historical: Some(value),
            forecast: None,
        }
    }

    /// Predicted value
    pub fn forecast(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            historical: None,
            forecast: Some(value),
        }
    }

    /// `YYYY-MM` label
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn historical_value(&self) -> Option<f64> {
        self.historical
    }

    pub fn forecast_value(&self) -> Option<f64> {
        self.forecast
    }

    pub fn is_forecast(&self) -> bool {
        self.forecast.is_some()
    }
}

/// Summary of a forecast request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastMeta {
    /// Segment as requested by the caller
    #[serde(rename = "county")]
    pub segment: String,
    /// Lowercase strategy name
    #[serde(rename = "model")]
    pub strategy: String,
    pub horizon: usize,
    /// Number of historical points at the head of the series
    #[serde(rename = "history_points")]
    pub history_point_count: usize,
}

/// Historical window followed by the forecast segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    series: Vec<SeriesPoint>,
    meta: ForecastMeta,
}

impl ForecastResult {
    /// Concatenate historical points (oldest first) and forecast points (earliest first)
    pub fn assemble(
        historical: Vec<SeriesPoint>,
        forecast: Vec<SeriesPoint>,
        segment: &str,
        strategy: &str,
        horizon: usize,
    ) -> Self {
        let meta = ForecastMeta {
            segment: segment.to_string(),
            strategy: strategy.to_string(),
            horizon,
            history_point_count: historical.len(),
        };

        let mut series = historical;
        series.extend(forecast);

        Self { series, meta }
    }

    pub fn series(&self) -> &[SeriesPoint] {
        &self.series
    }

    pub fn meta(&self) -> &ForecastMeta {
        &self.meta
    }

    /// The historical head of the series
    pub fn historical_points(&self) -> &[SeriesPoint] {
        &self.series[..self.meta.history_point_count]
    }

    /// The forecast tail of the series
    pub fn forecast_points(&self) -> &[SeriesPoint] {
        &self.series[self.meta.history_point_count..]
    }

    /// Forecast values in step order
    pub fn forecast_values(&self) -> Vec<f64> {
        self.forecast_points()
            .iter()
            .filter_map(SeriesPoint::forecast_value)
            .collect()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the series as CSV with a `date,historical,forecast` header.
    ///
    /// Absent values are written as empty fields.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for point in &self.series {
            csv_writer.serialize(point)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

//! Historical observations and dataset loading

use crate::error::{ForecastError, Result};
use crate::utils::parse_date;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Date column of the preprocessed dataset
pub const DATE_COLUMN: &str = "Date";
/// Segment (county) column
pub const SEGMENT_COLUMN: &str = "County";
/// Target column
pub const VALUE_COLUMN: &str = "Electric Vehicle (EV) Total";
/// Precomputed integer encoding of the segment
pub const ENCODED_COLUMN: &str = "county_encoded";
/// Precomputed month index from the start of the series
pub const MONTHS_COLUMN: &str = "months_since_start";

/// One monthly observation of a segment, with the per-segment constants
/// joined on by the dataset provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Month of the observation
    pub date: NaiveDate,
    /// Segment identifier (county name)
    pub segment: String,
    /// Observed count
    pub value: f64,
    /// Integer encoding of the segment
    pub segment_encoded_id: i64,
    /// Index of this observation from the series start
    pub months_since_start: i64,
}

/// Per-segment constants, fixed for the duration of a forecast run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentContext {
    pub segment_encoded_id: i64,
    /// Index of the latest known observation
    pub months_since_start: i64,
}

/// Date-ordered history of a single segment
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentHistory {
    segment: String,
    observations: Vec<Observation>,
}

impl SegmentHistory {
    fn new(segment: String, mut observations: Vec<Observation>) -> Result<Self> {
        if observations.is_empty() {
            return Err(ForecastError::UnknownSegment(segment));
        }
        observations.sort_by_key(|o| o.date);
        Ok(Self {
            segment,
            observations,
        })
    }

    /// Segment name as stored in the dataset
    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Observed values, oldest first
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// The trailing `n` observations (all of them when fewer exist)
    pub fn tail(&self, n: usize) -> &[Observation] {
        let start = self.observations.len().saturating_sub(n);
        &self.observations[start..]
    }

    /// Date of the latest observation
    pub fn last_date(&self) -> NaiveDate {
        // A history is never empty
        self.observations
            .last()
            .map(|o| o.date)
            .unwrap_or_default()
    }

    /// Segment constants derived from the full history
    pub fn context(&self) -> SegmentContext {
        SegmentContext {
            segment_encoded_id: self.observations[0].segment_encoded_id,
            months_since_start: self
                .observations
                .iter()
                .map(|o| o.months_since_start)
                .max()
                .unwrap_or_default(),
        }
    }

    /// Split off the last `holdout` observations.
    ///
    /// Returns the shortened history and the withheld values.
    pub fn split_holdout(&self, holdout: usize) -> Result<(SegmentHistory, Vec<f64>)> {
        if holdout == 0 || holdout >= self.observations.len() {
            return Err(ForecastError::InsufficientHistory(format!(
                "Cannot hold out {} of {} observations for {}",
                holdout,
                self.observations.len(),
                self.segment
            )));
        }

        let split = self.observations.len() - holdout;
        let actual = self.observations[split..].iter().map(|o| o.value).collect();
        let train = SegmentHistory {
            segment: self.segment.clone(),
            observations: self.observations[..split].to_vec(),
        };

        Ok((train, actual))
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Collection of observations across all segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    /// Build a dataset from in-memory observations
    pub fn from_observations(observations: Vec<Observation>) -> Result<Self> {
        if let Some(bad) = observations
            .iter()
            .find(|o| !o.value.is_finite() || o.value < 0.0)
        {
            return Err(ForecastError::DataError(format!(
                "Invalid value {} for {} on {}",
                bad.value, bad.segment, bad.date
            )));
        }

        Ok(Self { observations })
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Sorted, de-duplicated segment names
    pub fn segments(&self) -> Vec<String> {
        self.observations
            .iter()
            .map(|o| o.segment.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Case-insensitive, date-sorted history of one segment
    pub fn segment_history(&self, segment: &str) -> Result<SegmentHistory> {
        let wanted = segment.to_lowercase();
        let observations: Vec<Observation> = self
            .observations
            .iter()
            .filter(|o| o.segment.to_lowercase() == wanted)
            .cloned()
            .collect();

        let name = observations
            .first()
            .map(|o| o.segment.clone())
            .unwrap_or_else(|| segment.to_string());

        SegmentHistory::new(name, observations)
    }

    /// Segment constants for one segment
    pub fn segment_context(&self, segment: &str) -> Result<SegmentContext> {
        Ok(self.segment_history(segment)?.context())
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Data loader for the preprocessed dataset
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load the dataset from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
        let path = path.as_ref();
        let file = File::open(path)?;
        // Use polars DataFrame reader directly
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        info!(path = %path.display(), rows = df.height(), "Loaded dataset");

        Self::from_dataframe(&df)
    }

    /// Create a dataset from an existing DataFrame
    pub fn from_dataframe(df: &DataFrame) -> Result<Dataset> {
        let date_name = Self::find_column(df, DATE_COLUMN)?;
        let segment_name = Self::find_column(df, SEGMENT_COLUMN)?;
        let value_name = Self::find_column(df, VALUE_COLUMN)?;
        let encoded_name = Self::find_column(df, ENCODED_COLUMN)?;
        let months_name = Self::find_column(df, MONTHS_COLUMN)?;

        let dates = df.column(&date_name)?.cast(&DataType::Utf8)?;
        let segments = df.column(&segment_name)?.cast(&DataType::Utf8)?;
        let values = df.column(&value_name)?.cast(&DataType::Float64)?;
        let encoded = df.column(&encoded_name)?.cast(&DataType::Int64)?;
        let months = df.column(&months_name)?.cast(&DataType::Int64)?;

        let rows = dates
            .utf8()?
            .into_iter()
            .zip(segments.utf8()?.into_iter())
            .zip(values.f64()?.into_iter())
            .zip(encoded.i64()?.into_iter())
            .zip(months.i64()?.into_iter());

        let mut observations = Vec::with_capacity(df.height());
        for (row, ((((date, segment), value), encoded), months)) in rows.enumerate() {
            let missing = |column: &str| {
                ForecastError::DataError(format!("Missing {} in row {}", column, row + 1))
            };

            observations.push(Observation {
                date: parse_date(date.ok_or_else(|| missing(DATE_COLUMN))?)?,
                segment: segment.ok_or_else(|| missing(SEGMENT_COLUMN))?.to_string(),
                value: value.ok_or_else(|| missing(VALUE_COLUMN))?,
                segment_encoded_id: encoded.ok_or_else(|| missing(ENCODED_COLUMN))?,
                months_since_start: months.ok_or_else(|| missing(MONTHS_COLUMN))?,
            });
        }

        debug!(observations = observations.len(), "Parsed observations");

        Dataset::from_observations(observations)
    }

    /// Find a column by case-insensitive name
    fn find_column(df: &DataFrame, wanted: &str) -> Result<String> {
        df.get_column_names()
            .into_iter()
            .find(|name| name.eq_ignore_ascii_case(wanted))
            .map(|name| name.to_string())
            .ok_or_else(|| ForecastError::DataError(format!("Column '{}' not found", wanted)))
    }
}

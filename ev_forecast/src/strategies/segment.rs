//! Segment model adapter
//!
//! Per-segment models extrapolate the whole horizon internally, so the
//! adapter only resolves the model, asks for a future frame and keeps the
//! trailing `horizon` rows.

use crate::error::{ForecastError, Result};
use crate::models::ModelRegistry;
use crate::series::SeriesPoint;
use crate::strategies::finalize_level;
use crate::utils::month_label;
use tracing::debug;

/// Forecast `horizon` months for `segment` with its registered model
pub fn run(registry: &ModelRegistry, segment: &str, horizon: usize) -> Result<Vec<SeriesPoint>> {
    let model = registry
        .segment_model(segment)
        .ok_or_else(|| ForecastError::SegmentModelMissing(segment.to_string()))?;

    let frame = model.future_frame(horizon)?;
    let rows = model.predict(&frame)?;

    if rows.len() < horizon {
        return Err(ForecastError::ModelError(format!(
            "Segment model returned {} rows for a horizon of {}",
            rows.len(),
            horizon
        )));
    }

    debug!(segment, rows = rows.len(), horizon, "Segment model predicted");

    rows[rows.len() - horizon..]
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let value = finalize_level(row.point_estimate, i + 1)?;
            Ok(SeriesPoint::forecast(month_label(row.date), value))
        })
        .collect()
}

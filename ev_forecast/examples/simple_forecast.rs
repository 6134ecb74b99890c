use chrono::{Months, NaiveDate};
use ev_forecast::{
    summarize, Dataset, FeatureVector, Forecaster, ModelRegistry, Observation, OneStepModel,
    Strategy,
};
use std::sync::Arc;

/// Rolling mean plus the latest month-over-month change
struct MomentumMean;

impl OneStepModel for MomentumMean {
    fn predict(&self, features: &FeatureVector) -> ev_forecast::Result<f64> {
        Ok(features.roll_mean_3 + features.lag1 * features.pct_change_1)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    let start = NaiveDate::from_ymd_opt(2021, 1, 1).ok_or("bad start date")?;
    let observations = (0..36u32)
        .map(|i| Observation {
            date: start + Months::new(i),
            segment: "King".to_string(),
            value: 200.0 + 12.0 * i as f64,
            segment_encoded_id: 0,
            months_since_start: i as i64,
        })
        .collect();
    let dataset = Dataset::from_observations(observations)?;

    let registry = ModelRegistry::new().with_one_step(Strategy::XGBoost, Arc::new(MomentumMean))?;
    let forecaster = Forecaster::new(&registry);

    let result = forecaster.forecast(&dataset, "King", "xgboost", 12)?;
    for point in result.forecast_points() {
        println!("{}: {:?}", point.date(), point.forecast_value());
    }

    let insights = summarize(&result)?;
    println!("{}", insights.summary);

    Ok(())
}

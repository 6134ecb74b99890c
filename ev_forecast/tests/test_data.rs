mod common;

use chrono::NaiveDate;
use ev_forecast::data::{DataLoader, Dataset, Observation};
use ev_forecast::ForecastError;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_csv(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[test]
fn test_data_loader_from_csv() {
    let file = write_csv(&[
        "Date,County,Electric Vehicle (EV) Total,county_encoded,months_since_start",
        "2024-03-31,King,120,3,26",
        "2024-01-31,King,100,3,24",
        "2024-02-29,King,110,3,25",
        "2024-01-31,Pierce,40,7,24",
        "2024-02-29,Pierce,42,7,25",
    ]);

    let dataset = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(dataset.len(), 5);
    assert!(!dataset.is_empty());
    assert_eq!(dataset.segments(), vec!["King".to_string(), "Pierce".to_string()]);

    let king = dataset.segment_history("king").unwrap();
    assert_eq!(king.segment(), "King");
    assert_eq!(king.values(), vec![100.0, 110.0, 120.0]);
    assert_eq!(king.last_date(), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());

    let context = dataset.segment_context("KING").unwrap();
    assert_eq!(context.segment_encoded_id, 3);
    assert_eq!(context.months_since_start, 26);
}

#[test]
fn test_data_loader_error_handling() {
    assert!(DataLoader::from_csv("nonexistent_file.csv").is_err());

    let file = write_csv(&["Date,County,value", "2024-01-31,King,1"]);
    let err = DataLoader::from_csv(file.path()).unwrap_err();
    assert!(matches!(err, ForecastError::DataError(_)));

    let file = write_csv(&[
        "Date,County,Electric Vehicle (EV) Total,county_encoded,months_since_start",
        "2024-01-31,King,-5,3,24",
    ]);
    let err = DataLoader::from_csv(file.path()).unwrap_err();
    assert!(matches!(err, ForecastError::DataError(_)));
}

#[test]
fn test_unknown_segment_history() {
    let dataset = common::sample_dataset();
    let err = dataset.segment_history("Spokane").unwrap_err();
    assert!(matches!(err, ForecastError::UnknownSegment(_)));
}

#[test]
fn test_history_tail_and_holdout() {
    let dataset = common::sample_dataset();
    let pierce = dataset.segment_history("Pierce").unwrap();

    assert_eq!(pierce.tail(3).len(), 3);
    assert_eq!(pierce.tail(100).len(), 8);

    let (train, actual) = pierce.split_holdout(2).unwrap();
    assert_eq!(train.len(), 6);
    assert_eq!(actual, vec![55.0, 58.0]);
    // Context of the truncated history ends at its own last month
    assert_eq!(train.context().months_since_start, 5);

    assert!(pierce.split_holdout(0).is_err());
    assert!(pierce.split_holdout(8).is_err());
}

#[test]
fn test_non_finite_values_rejected() {
    let observations = vec![Observation {
        date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        segment: "King".to_string(),
        value: f64::NAN,
        segment_encoded_id: 3,
        months_since_start: 0,
    }];
    assert!(Dataset::from_observations(observations).is_err());
}

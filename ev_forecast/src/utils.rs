//! Utility functions for month-resolution calendars

use crate::error::{ForecastError, Result};
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month after `date`
pub fn next_month(date: NaiveDate) -> Result<NaiveDate> {
    month_start(date)
        .checked_add_months(Months::new(1))
        .ok_or_else(|| ForecastError::DataError(format!("Month after {} is out of range", date)))
}

/// `YYYY-MM` label for a date
pub fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Parse a dataset date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`,
/// `YYYY/MM/DD` and `YYYY-MM`.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(datetime.date());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y/%m/%d") {
        return Ok(date);
    }
    // Month-only labels carry no day
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d") {
        return Ok(date);
    }

    Err(ForecastError::DataError(format!("Unparseable date: {}", value)))
}

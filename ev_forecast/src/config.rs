//! Forecast configuration

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for a forecast run.
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Number of trailing historical points included in the output series
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Rolling window length for the recursive (tree model) strategies
    #[serde(default = "default_lag_window")]
    pub lag_window: usize,

    /// Scaled window length fed to the sequence model
    #[serde(default = "default_sequence_window")]
    pub sequence_window: usize,

    /// Horizon used when the caller does not supply one
    #[serde(default = "default_horizon")]
    pub default_horizon: usize,

    /// Optional upper bound on the requested horizon
    #[serde(default)]
    pub max_horizon: Option<usize>,
}

fn default_history_window() -> usize {
    24
}

fn default_lag_window() -> usize {
    6
}

fn default_sequence_window() -> usize {
    6
}

fn default_horizon() -> usize {
    36
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            lag_window: default_lag_window(),
            sequence_window: default_sequence_window(),
            default_horizon: default_horizon(),
            max_horizon: None,
        }
    }
}

impl ForecastConfig {
    /// Parse and validate a config from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check that the windows are large enough for feature derivation
    pub fn validate(&self) -> Result<()> {
        if self.history_window == 0 {
            return Err(ForecastError::InvalidParameter(
                "history_window must be positive".to_string(),
            ));
        }
        // lag1..lag3 and the 3-point rolling mean need three values
        if self.lag_window < 3 {
            return Err(ForecastError::InvalidParameter(format!(
                "lag_window must be at least 3, got {}",
                self.lag_window
            )));
        }
        if self.sequence_window == 0 {
            return Err(ForecastError::InvalidParameter(
                "sequence_window must be positive".to_string(),
            ));
        }
        if let Some(max) = self.max_horizon {
            if self.default_horizon > max {
                return Err(ForecastError::InvalidParameter(format!(
                    "default_horizon ({}) exceeds max_horizon ({})",
                    self.default_horizon, max
                )));
            }
        }
        Ok(())
    }

    /// Reject horizons above `max_horizon`, when one is configured
    pub fn check_horizon(&self, horizon: usize) -> Result<()> {
        match self.max_horizon {
            Some(max) if horizon > max => Err(ForecastError::InvalidParameter(format!(
                "horizon {} exceeds the maximum of {}",
                horizon, max
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ForecastConfig::default();
        assert_eq!(config.history_window, 24);
        assert_eq!(config.lag_window, 6);
        assert_eq!(config.sequence_window, 6);
        assert_eq!(config.default_horizon, 36);
        assert_eq!(config.max_horizon, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ForecastConfig::from_json_str(r#"{"history_window": 12, "max_horizon": 60}"#)
            .unwrap();
        assert_eq!(config.history_window, 12);
        assert_eq!(config.lag_window, 6);
        assert_eq!(config.max_horizon, Some(60));
    }

    #[test]
    fn test_invalid_windows_rejected() {
        assert!(matches!(
            ForecastConfig::from_json_str(r#"{"lag_window": 2}"#),
            Err(ForecastError::InvalidParameter(_))
        ));
        assert!(ForecastConfig::from_json_str(r#"{"history_window": 0}"#).is_err());
        assert!(ForecastConfig::from_json_str(r#"{"default_horizon": 48, "max_horizon": 24}"#)
            .is_err());
        assert!(matches!(
            ForecastConfig::from_json_str("not json"),
            Err(ForecastError::SerializationError(_))
        ));
    }

    #[test]
    fn test_check_horizon() {
        let config = ForecastConfig {
            max_horizon: Some(24),
            default_horizon: 12,
            ..ForecastConfig::default()
        };
        assert!(config.check_horizon(24).is_ok());
        assert!(config.check_horizon(25).is_err());
        assert!(ForecastConfig::default().check_horizon(1000).is_ok());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"sequence_window": 12}}"#).unwrap();

        let config = ForecastConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.sequence_window, 12);
    }
}

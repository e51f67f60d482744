//! Engine configuration and loading.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::metrics::{
    inception_date, DEFAULT_BASELINE, DEFAULT_NEUTRAL_BAND, DEFAULT_PADDING_FRACTION,
};
use crate::{Error, Result};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "NAV_METRICS_CONFIG";

/// Parameters shared by every metric computation.
///
/// Every field is optional in the TOML file:
///
/// ```toml
/// inception_date = "2019-11-13"
/// baseline = 100.0
/// padding_fraction = 0.2
/// neutral_band = 2.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Fund launch date, start of the annualization window
    pub inception_date: NaiveDate,
    /// Par value for the volatility proxy and excursions
    pub baseline: f64,
    /// Chart range padding as a fraction of the value spread
    pub padding_fraction: f64,
    /// Performance band (percent) shown as neutral
    pub neutral_band: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            inception_date: inception_date(),
            baseline: DEFAULT_BASELINE,
            padding_fraction: DEFAULT_PADDING_FRACTION,
            neutral_band: DEFAULT_NEUTRAL_BAND,
        }
    }
}

impl EngineConfig {
    /// Load the config from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path())
    }

    /// Load the config from the default path, falling back to defaults when
    /// the file is unreadable or invalid.
    pub fn load_or_default() -> Self {
        let path = Self::default_path();
        Self::load_from_path(&path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring invalid config");
            Self::default()
        })
    }

    /// Get the default config file path.
    ///
    /// Default path: `~/.nav-metrics/config.toml`
    /// Can be overridden with the `NAV_METRICS_CONFIG` environment variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".nav-metrics/config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Load the config from a specific path. A missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML config.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every numeric parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.baseline.is_finite() || self.baseline == 0.0 {
            return Err(Error::InvalidInput(format!(
                "baseline must be a non-zero number, got {}",
                self.baseline
            )));
        }

        if !self.padding_fraction.is_finite() || self.padding_fraction < 0.0 {
            return Err(Error::InvalidInput(format!(
                "padding_fraction must be a non-negative number, got {}",
                self.padding_fraction
            )));
        }

        if !self.neutral_band.is_finite() || self.neutral_band < 0.0 {
            return Err(Error::InvalidInput(format!(
                "neutral_band must be a non-negative number, got {}",
                self.neutral_band
            )));
        }

        Ok(())
    }
}

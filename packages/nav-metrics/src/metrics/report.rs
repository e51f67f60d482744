//! Everything a widget shows for one series, computed in one pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{baseline_excursions, compute_metrics, padded_range};
use crate::config::EngineConfig;
use crate::types::{nav_values, BaselineExcursions, MetricsResult, Observation, Trend, ValueRange};
use crate::{Error, Result};

/// Metrics plus the display hints derived from the same series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesReport {
    /// Most recent NAV in the series
    pub last_value: f64,
    /// Metrics for the series
    pub metrics: MetricsResult,
    /// Padded y-axis range for the chart
    pub chart_range: ValueRange,
    /// Extremes relative to the baseline
    pub excursions: BaselineExcursions,
    /// Indicator class for the total return, if defined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

impl SeriesReport {
    /// Build a report for a NAV series.
    pub fn from_values(values: &[f64], config: &EngineConfig, as_of: NaiveDate) -> Result<Self> {
        let metrics = compute_metrics(values, config, as_of)?;
        let chart_range = padded_range(values, config.padding_fraction)?;
        // A zero baseline is a config error here, not an undefined metric
        let excursions = baseline_excursions(values, config.baseline).map_err(|e| match e {
            Error::UndefinedMetric(reason) if config.baseline == 0.0 => Error::InvalidInput(reason),
            other => other,
        })?;
        let trend = metrics
            .total_return_pct
            .map(|pct| Trend::from_performance(pct, config.neutral_band));

        Ok(Self {
            last_value: values[values.len() - 1],
            metrics,
            chart_range,
            excursions,
            trend,
        })
    }

    /// Build a report for dated observations.
    pub fn from_observations(
        observations: &[Observation],
        config: &EngineConfig,
        as_of: NaiveDate,
    ) -> Result<Self> {
        Self::from_values(&nav_values(observations), config, as_of)
    }
}

//! Performance metrics engine.
//!
//! Pure functions over an ordered NAV series. Nothing here keeps state
//! between calls; the caller owns the series and gets fresh values back.

mod range;
mod report;
mod returns;
mod risk;

pub use range::padded_range;
pub use report::SeriesReport;
pub use returns::{annualized_return, annualized_return_since_inception, total_return_pct};
pub use risk::{baseline_excursions, max_drawdown, volatility_proxy};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::types::{nav_values, MetricsResult, Observation};
use crate::{Error, Result};

/// Par value of an index-normalized NAV.
pub const DEFAULT_BASELINE: f64 = 100.0;

/// Fraction of the value spread added above and below a chart range.
pub const DEFAULT_PADDING_FRACTION: f64 = 0.2;

/// Performance (in percent) below which a move is shown as neutral.
pub const DEFAULT_NEUTRAL_BAND: f64 = 2.0;

/// Launch date of the fund.
pub fn inception_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 11, 13).expect("2019-11-13 is a valid date")
}

/// Compute every metric for a series in one call.
///
/// `InvalidInput` aborts the call. A return metric that is undefined for this
/// series is reported as `None` and logged; the remaining metrics are still
/// computed.
pub fn compute_metrics(
    values: &[f64],
    config: &EngineConfig,
    as_of: NaiveDate,
) -> Result<MetricsResult> {
    ensure_series(values)?;

    let total_return_pct = defined(total_return_pct(values), "total return")?;
    let annualized_return_pct = defined(
        annualized_return(values, config.inception_date, as_of),
        "annualized return",
    )?
    .map(|fraction| fraction * 100.0);
    let volatility_pct = volatility_proxy(values, config.baseline)?;
    let drawdown = max_drawdown(values)?;

    debug!(
        samples = values.len(),
        total_return_pct = ?total_return_pct,
        annualized_return_pct = ?annualized_return_pct,
        volatility_pct,
        max_drawdown = drawdown.magnitude,
        "computed series metrics"
    );

    Ok(MetricsResult {
        total_return_pct,
        annualized_return_pct,
        volatility_pct,
        max_drawdown_abs: drawdown.magnitude,
        max_drawdown_days: drawdown.duration,
    })
}

/// Compute every metric for a series of dated observations.
pub fn compute_observation_metrics(
    observations: &[Observation],
    config: &EngineConfig,
    as_of: NaiveDate,
) -> Result<MetricsResult> {
    compute_metrics(&nav_values(observations), config, as_of)
}

/// Turn `UndefinedMetric` into `None`, passing every other error through.
fn defined(result: Result<f64>, metric: &str) -> Result<Option<f64>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Error::UndefinedMetric(reason)) => {
            warn!(metric, %reason, "metric undefined for series");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Check that a series has at least one sample and only finite values.
pub(crate) fn ensure_series(values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(Error::InvalidInput(
            "series must contain at least one observation".to_string(),
        ));
    }

    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(Error::InvalidInput(format!(
            "series value at index {index} is not finite"
        )));
    }

    Ok(())
}

/// Minimum and maximum of a non-empty series.
pub(crate) fn extremes(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
            (min.min(v), max.max(v))
        })
}

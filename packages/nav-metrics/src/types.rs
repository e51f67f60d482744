//! Core data types for the NAV metrics engine.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;

/// Key of the 3-year block in `risk_and_rating`.
const THREE_YEAR_KEY: &str = "3";

/// A single NAV sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    /// Valuation date
    pub date: NaiveDate,
    /// Net asset value per unit
    pub value: f64,
}

impl Observation {
    /// Create a new observation.
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Project a slice of observations onto their values, keeping caller order.
pub fn nav_values(observations: &[Observation]) -> Vec<f64> {
    observations.iter().map(|o| o.value).collect()
}

/// NAV chart payload as served by the fund data API.
///
/// Shape: `{"results": {"nav": [{"date": "2024-01-02", "value": 101.3}, ...]}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavChartResponse {
    pub results: NavChartResults,
}

/// Inner `results` object of a [`NavChartResponse`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NavChartResults {
    #[serde(default)]
    pub nav: Vec<Observation>,
}

/// Parse a NAV chart payload into its observations.
///
/// The observations are returned in payload order; nothing is re-sorted.
pub fn parse_nav_chart(json: &str) -> Result<Vec<Observation>> {
    let response: NavChartResponse = serde_json::from_str(json)?;
    Ok(response.results.nav)
}

/// Fund detail payload as served by the fund data API.
///
/// Only the fields behind the static metrics panel are modelled; everything
/// else in the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FundDetailResponse {
    #[serde(default)]
    pub results: Vec<FundDetail>,
}

/// One fund entry of a [`FundDetailResponse`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FundDetail {
    /// Return blocks keyed by share class; the first one is shown
    #[serde(default, deserialize_with = "first_entry")]
    pub returns_nav: Option<ReturnsNav>,
    #[serde(default)]
    pub trailing_return_month_end: Option<TrailingReturns>,
    /// Risk figures keyed by horizon in years
    #[serde(default)]
    pub risk_and_rating: Option<HashMap<String, Option<RiskAndRating>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReturnsNav {
    #[serde(default)]
    pub cumulative_total_return_since_inception: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrailingReturns {
    #[serde(default)]
    pub since_inception_pa: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RiskAndRating {
    #[serde(default)]
    pub volatility: Option<f64>,
    #[serde(default)]
    pub max_drawdown: Option<f64>,
}

/// Published figures for the fund metrics panel, all in percent.
///
/// Each field is `None` when the payload does not carry it; every field is
/// `None` when the payload has no fund entry at all.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct FundDetailMetrics {
    /// Cumulative total return since inception
    pub total_return_since_inception_pct: Option<f64>,
    /// Annualized return since inception, as of the last month end
    pub annualized_return_since_inception_pct: Option<f64>,
    /// 3-year volatility
    pub volatility_3y_pct: Option<f64>,
    /// 3-year maximum drawdown as a positive magnitude
    pub max_drawdown_3y_pct: Option<f64>,
}

impl FundDetail {
    /// Extract the metrics panel figures from this entry.
    pub fn metrics(&self) -> FundDetailMetrics {
        let three_year = self
            .risk_and_rating
            .as_ref()
            .and_then(|risk| risk.get(THREE_YEAR_KEY))
            .and_then(Option::as_ref);

        FundDetailMetrics {
            total_return_since_inception_pct: self
                .returns_nav
                .as_ref()
                .and_then(|r| r.cumulative_total_return_since_inception),
            annualized_return_since_inception_pct: self
                .trailing_return_month_end
                .as_ref()
                .and_then(|t| t.since_inception_pa),
            volatility_3y_pct: three_year.and_then(|r| r.volatility),
            max_drawdown_3y_pct: three_year.and_then(|r| r.max_drawdown).map(f64::abs),
        }
    }
}

/// Parse a fund detail payload into the metrics panel figures.
///
/// Only `results[0]` is read. An empty `results` array yields
/// [`FundDetailMetrics::default`].
pub fn parse_fund_detail(json: &str) -> Result<FundDetailMetrics> {
    let response: FundDetailResponse = serde_json::from_str(json)?;

    match response.results.first() {
        Some(fund) => Ok(fund.metrics()),
        None => {
            debug!("fund detail payload has no results");
            Ok(FundDetailMetrics::default())
        }
    }
}

/// Deserialize a map, keeping only the value of its first entry.
fn first_entry<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct FirstEntry<T>(std::marker::PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for FirstEntry<T> {
        type Value = Option<T>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map or null")
        }

        fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(
            self,
            deserializer: D2,
        ) -> std::result::Result<Self::Value, D2::Error> {
            deserializer.deserialize_map(self)
        }

        fn visit_map<A: MapAccess<'de>>(
            self,
            mut map: A,
        ) -> std::result::Result<Self::Value, A::Error> {
            let first = map.next_entry::<IgnoredAny, T>()?.map(|(_, value)| value);
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(first)
        }
    }

    deserializer.deserialize_option(FirstEntry(std::marker::PhantomData))
}

/// Maximum drawdown of a series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Drawdown {
    /// Largest peak-to-trough decline, floored to whole value units
    pub magnitude: u64,
    /// Samples between the running peak and the trough of the largest decline
    pub duration: usize,
}

/// Display range for a chart axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

/// Highest and lowest values of a series as percent deviation from a baseline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BaselineExcursions {
    /// `(max - baseline) / baseline * 100`
    pub max_pct: f64,
    /// `(min - baseline) / baseline * 100`
    pub min_pct: f64,
}

/// Metrics computed for one series.
///
/// Return metrics that are mathematically undefined for the input are `None`
/// and serialize as `null`, so they can never be mistaken for a real zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsResult {
    /// Total return over the series in percent
    pub total_return_pct: Option<f64>,
    /// Annualized return since inception in percent
    pub annualized_return_pct: Option<f64>,
    /// Volatility proxy in percent (largest excursion from the baseline)
    pub volatility_pct: f64,
    /// Maximum drawdown in whole value units
    pub max_drawdown_abs: u64,
    /// Samples under the running peak at the maximum drawdown
    pub max_drawdown_days: usize,
}

/// Direction indicator for a period's performance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Neutral,
    Negative,
}

impl Trend {
    /// Classify a performance figure (in percent).
    ///
    /// Moves smaller than `neutral_band` in either direction are neutral.
    pub fn from_performance(performance_pct: f64, neutral_band: f64) -> Self {
        if performance_pct.abs() < neutral_band {
            Trend::Neutral
        } else if performance_pct < 0.0 {
            Trend::Negative
        } else {
            Trend::Positive
        }
    }

    /// Lowercase name, as used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Positive => "positive",
            Trend::Neutral => "neutral",
            Trend::Negative => "negative",
        }
    }
}

//! NAV Metrics - Performance metrics engine for fund widgets.
//!
//! This crate turns an ordered series of NAV (net asset value) samples into
//! the figures shown on fund performance widgets:
//!
//! - **Returns**: total return over the series, annualized return since inception
//! - **Risk**: volatility proxy (largest excursion from par), max drawdown
//! - **Chart scaling**: padded value range for the y-axis
//! - **Periods**: month / year / all-time date ranges
//! - **Reports**: one [`SeriesReport`] per widget refresh
//! - **Fund detail**: published since-inception and 3-year figures
//!
//! Every metric is a pure function over the supplied series. Undefined
//! results (division by zero, non-finite powers) come back as
//! [`Error::UndefinedMetric`] instead of `NaN` or `Infinity`.
//!
//! # Example
//!
//! ```rust
//! use nav_metrics::metrics::{max_drawdown, total_return_pct};
//!
//! let nav = vec![100.0, 110.0, 90.0, 105.0];
//!
//! let total = total_return_pct(&nav).unwrap();
//! assert!((total - 5.0).abs() < 1e-9);
//!
//! let drawdown = max_drawdown(&nav).unwrap();
//! assert_eq!(drawdown.magnitude, 20);
//! ```

pub mod config;
pub mod format;
pub mod metrics;
pub mod period;
pub mod types;

// Re-export commonly used types
pub use config::EngineConfig;
pub use types::{
    BaselineExcursions, Drawdown, FundDetailMetrics, FundDetailResponse, MetricsResult,
    NavChartResponse, Observation, Trend, ValueRange,
};

// Re-export main functionality
pub use format::{format_date, format_metric, format_percent, format_percent_de, format_price};
pub use metrics::{
    annualized_return, annualized_return_since_inception, baseline_excursions, compute_metrics,
    compute_observation_metrics, inception_date, max_drawdown, padded_range, total_return_pct,
    volatility_proxy, SeriesReport, DEFAULT_BASELINE, DEFAULT_NEUTRAL_BAND,
    DEFAULT_PADDING_FRACTION,
};
pub use period::{DateRange, Period};
pub use types::{nav_values, parse_fund_detail, parse_nav_chart};

/// Error types for nav-metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Undefined metric: {0}")]
    UndefinedMetric(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown period: {0}")]
    UnknownPeriod(String),
}

/// Result type for nav-metrics operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Risk figures over a NAV series.
//!
//! Provides the volatility proxy, maximum drawdown, and baseline excursions.

use super::{ensure_series, extremes};
use crate::types::{BaselineExcursions, Drawdown};
use crate::{Error, Result};

/// Calculate the volatility proxy of a series.
///
/// This is not a standard deviation. It is the larger of the two deviations
/// of the series minimum and maximum from `baseline` (100 for an
/// index-normalized NAV):
///
/// ```text
/// max(|baseline - min|, |max - baseline|)
/// ```
///
/// # Errors
///
/// * `InvalidInput` if the series is empty or `baseline` is not finite
/// * `UndefinedMetric` if the deviation overflows
pub fn volatility_proxy(values: &[f64], baseline: f64) -> Result<f64> {
    ensure_series(values)?;
    ensure_baseline(baseline)?;

    let (min, max) = extremes(values);
    let proxy = (baseline - min).abs().max((max - baseline).abs());

    if !proxy.is_finite() {
        return Err(Error::UndefinedMetric(
            "volatility proxy overflows for this series".to_string(),
        ));
    }

    Ok(proxy)
}

/// Calculate the maximum drawdown of a series in value units.
///
/// Walks the series once with a running peak. The magnitude is the largest
/// `peak - value` seen, floored to whole units. The duration counts the
/// samples since that peak at the trough of the largest decline.
///
/// A single-sample series has no drawdown. A decline too large to be counted
/// in whole units is `UndefinedMetric`.
pub fn max_drawdown(values: &[f64]) -> Result<Drawdown> {
    ensure_series(values)?;

    let mut peak = values[0];
    let mut since_peak = 0usize;
    let mut max_drawdown = 0.0_f64;
    let mut duration = 0usize;

    for &value in &values[1..] {
        if value > peak {
            peak = value;
            since_peak = 0;
            continue;
        }

        since_peak += 1;
        let drawdown = peak - value;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
            duration = since_peak;
        }
    }

    let magnitude = max_drawdown.floor();
    if !magnitude.is_finite() || magnitude >= u64::MAX as f64 {
        return Err(Error::UndefinedMetric(format!(
            "drawdown of {max_drawdown} does not fit in whole units"
        )));
    }

    Ok(Drawdown {
        magnitude: magnitude as u64,
        duration,
    })
}

/// Express the series extremes as percent deviation from `baseline`.
///
/// # Errors
///
/// * `InvalidInput` if the series is empty or `baseline` is not finite
/// * `UndefinedMetric` if `baseline` is zero or a deviation overflows
pub fn baseline_excursions(values: &[f64], baseline: f64) -> Result<BaselineExcursions> {
    ensure_series(values)?;
    ensure_baseline(baseline)?;

    if baseline == 0.0 {
        return Err(Error::UndefinedMetric(
            "excursions are undefined for a zero baseline".to_string(),
        ));
    }

    let (min, max) = extremes(values);
    let max_pct = (max - baseline) / baseline * 100.0;
    let min_pct = (min - baseline) / baseline * 100.0;

    if !max_pct.is_finite() || !min_pct.is_finite() {
        return Err(Error::UndefinedMetric(format!(
            "excursions from baseline {baseline} overflow"
        )));
    }

    Ok(BaselineExcursions { max_pct, min_pct })
}

fn ensure_baseline(baseline: f64) -> Result<()> {
    if !baseline.is_finite() {
        return Err(Error::InvalidInput(format!(
            "baseline must be a finite number, got {baseline}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_volatility_proxy_upside() {
        // max deviation is above par: |112 - 100| = 12
        let proxy = volatility_proxy(&[100.0, 104.0, 112.0, 97.0], 100.0).unwrap();
        assert_relative_eq!(proxy, 12.0);
    }

    #[test]
    fn test_volatility_proxy_downside() {
        // max deviation is below par: |100 - 85| = 15
        let proxy = volatility_proxy(&[100.0, 85.0, 110.0], 100.0).unwrap();
        assert_relative_eq!(proxy, 15.0);
    }

    #[test]
    fn test_volatility_proxy_flat_at_par() {
        assert_eq!(volatility_proxy(&[100.0, 100.0, 100.0], 100.0).unwrap(), 0.0);
    }

    #[test]
    fn test_volatility_proxy_entirely_above_baseline() {
        // min above par still counts: |100 - 120| = 20 vs |130 - 100| = 30
        let proxy = volatility_proxy(&[120.0, 130.0], 100.0).unwrap();
        assert_relative_eq!(proxy, 30.0);
    }

    #[test]
    fn test_volatility_proxy_custom_baseline() {
        let proxy = volatility_proxy(&[9.0, 12.0], 10.0).unwrap();
        assert_relative_eq!(proxy, 2.0);
    }

    #[test]
    fn test_volatility_proxy_rejects_non_finite_baseline() {
        for baseline in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = volatility_proxy(&[100.0, 101.0], baseline);
            assert!(matches!(result, Err(Error::InvalidInput(_))));
        }
    }

    #[test]
    fn test_volatility_proxy_overflow_is_undefined() {
        let result = volatility_proxy(&[-1e308], 1e308);
        assert!(matches!(result, Err(Error::UndefinedMetric(_))));
    }

    #[test]
    fn test_max_drawdown() {
        // Peak 110 at index 1, trough 90 at index 2
        let dd = max_drawdown(&[100.0, 110.0, 90.0, 105.0]).unwrap();
        assert_eq!(dd.magnitude, 20);
        assert_eq!(dd.duration, 1);
    }

    #[test]
    fn test_max_drawdown_floors_magnitude() {
        let dd = max_drawdown(&[100.0, 87.6]).unwrap();
        assert_eq!(dd.magnitude, 12);
    }

    #[test]
    fn test_max_drawdown_duration_counts_samples_under_peak() {
        // Peak 120 at index 1; decline bottoms out at index 4 (three samples later)
        let dd = max_drawdown(&[100.0, 120.0, 115.0, 110.0, 101.0, 118.0]).unwrap();
        assert_eq!(dd.magnitude, 19);
        assert_eq!(dd.duration, 3);
    }

    #[test]
    fn test_max_drawdown_later_peak_resets_duration() {
        // First decline 10 over 1 sample, second decline 30 over 2 samples
        let dd = max_drawdown(&[100.0, 90.0, 150.0, 140.0, 120.0, 130.0]).unwrap();
        assert_eq!(dd.magnitude, 30);
        assert_eq!(dd.duration, 2);
    }

    #[test]
    fn test_max_drawdown_earliest_trough_wins_ties() {
        let dd = max_drawdown(&[100.0, 90.0, 100.0, 95.0, 90.0]).unwrap();
        assert_eq!(dd.magnitude, 10);
        assert_eq!(dd.duration, 1);
    }

    #[test]
    fn test_max_drawdown_no_loss() {
        let dd = max_drawdown(&[100.0, 101.0, 102.0, 105.0]).unwrap();
        assert_eq!(dd, Drawdown::default());
    }

    #[test]
    fn test_max_drawdown_single_value() {
        let dd = max_drawdown(&[100.0]).unwrap();
        assert_eq!(dd.magnitude, 0);
        assert_eq!(dd.duration, 0);
    }

    #[test]
    fn test_max_drawdown_overflow_is_undefined() {
        let result = max_drawdown(&[1e308, -1e308]);
        assert!(matches!(result, Err(Error::UndefinedMetric(_))));
    }

    #[test]
    fn test_max_drawdown_beyond_whole_units_is_undefined() {
        let result = max_drawdown(&[1e20, 0.0]);
        assert!(matches!(result, Err(Error::UndefinedMetric(_))));
    }

    #[test]
    fn test_max_drawdown_empty() {
        assert!(matches!(max_drawdown(&[]), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_baseline_excursions() {
        let ex = baseline_excursions(&[100.0, 125.0, 92.0], 100.0).unwrap();
        assert_relative_eq!(ex.max_pct, 25.0, epsilon = 1e-9);
        assert_relative_eq!(ex.min_pct, -8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_baseline_excursions_zero_baseline() {
        let result = baseline_excursions(&[1.0, 2.0], 0.0);
        assert!(matches!(result, Err(Error::UndefinedMetric(_))));
    }

    #[test]
    fn test_baseline_excursions_rejects_non_finite_baseline() {
        let result = baseline_excursions(&[1.0], f64::INFINITY);
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let result = baseline_excursions(&[1.0], f64::NAN);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_baseline_excursions_overflow_is_undefined() {
        // Subnormal baseline: the ratio exceeds f64::MAX
        let result = baseline_excursions(&[1.0], 1e-310);
        assert!(matches!(result, Err(Error::UndefinedMetric(_))));
    }
}

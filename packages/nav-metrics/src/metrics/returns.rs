//! Return calculations over a NAV series.

use chrono::NaiveDate;

use super::{ensure_series, inception_date};
use crate::{Error, Result};

/// Days per year used when converting elapsed days to years.
const DAYS_PER_YEAR: f64 = 365.25;

/// Calculate the total return of a series in percent.
///
/// `(last - first) / first * 100`
///
/// # Errors
///
/// * `InvalidInput` if the series is empty or holds a non-finite value
/// * `UndefinedMetric` if the first value is zero
pub fn total_return_pct(values: &[f64]) -> Result<f64> {
    ensure_series(values)?;

    let first = values[0];
    let last = values[values.len() - 1];

    if first == 0.0 {
        return Err(Error::UndefinedMetric(
            "total return is undefined for a zero starting value".to_string(),
        ));
    }

    let total = (last - first) / first * 100.0;
    if !total.is_finite() {
        return Err(Error::UndefinedMetric(format!(
            "total return is not finite ({first} -> {last})"
        )));
    }

    Ok(total)
}

/// Calculate the annualized return since `inception`, as a fraction.
///
/// The elapsed time always runs from `inception` to `as_of`, regardless of the
/// span the series covers:
///
/// ```text
/// years  = |as_of - inception| in days / 365.25
/// result = (last / first) ^ (1 / years) - 1
/// ```
///
/// # Errors
///
/// * `InvalidInput` if the series is empty or holds a non-finite value
/// * `UndefinedMetric` if no time has elapsed, the first value is zero, or the
///   power is not a finite number (negative growth ratio)
pub fn annualized_return(values: &[f64], inception: NaiveDate, as_of: NaiveDate) -> Result<f64> {
    ensure_series(values)?;

    let days = (as_of - inception).num_days().abs();
    if days == 0 {
        return Err(Error::UndefinedMetric(
            "annualized return is undefined when no time has elapsed since inception".to_string(),
        ));
    }
    let years = days as f64 / DAYS_PER_YEAR;

    let first = values[0];
    let last = values[values.len() - 1];

    if first == 0.0 {
        return Err(Error::UndefinedMetric(
            "annualized return is undefined for a zero starting value".to_string(),
        ));
    }

    let growth = last / first;
    let annualized = growth.powf(1.0 / years) - 1.0;
    if !annualized.is_finite() {
        return Err(Error::UndefinedMetric(format!(
            "annualized return is not finite (growth {growth} over {years:.4} years)"
        )));
    }

    Ok(annualized)
}

/// Annualized return measured from the fund's fixed inception date.
pub fn annualized_return_since_inception(values: &[f64], as_of: NaiveDate) -> Result<f64> {
    annualized_return(values, inception_date(), as_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_total_return() {
        let total = total_return_pct(&[100.0, 110.0, 90.0, 105.0]).unwrap();
        assert_relative_eq!(total, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_total_return_loss() {
        let total = total_return_pct(&[200.0, 150.0]).unwrap();
        assert_relative_eq!(total, -25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_total_return_single_value() {
        assert_eq!(total_return_pct(&[123.4]).unwrap(), 0.0);
    }

    #[test]
    fn test_total_return_zero_start() {
        let result = total_return_pct(&[0.0, 10.0]);
        assert!(matches!(result, Err(Error::UndefinedMetric(_))));
    }

    #[test]
    fn test_total_return_empty() {
        assert!(matches!(total_return_pct(&[]), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_annualized_return_two_years() {
        // 731 days = 2.0014 years; 21% growth compounds to ~10% a year
        let inception = date(2020, 1, 1);
        let as_of = date(2022, 1, 1);
        let annualized = annualized_return(&[100.0, 121.0], inception, as_of).unwrap();

        let years = 731.0 / 365.25;
        assert_relative_eq!(annualized, 1.21_f64.powf(1.0 / years) - 1.0, epsilon = 1e-12);
        assert!((annualized - 0.10).abs() < 0.001);
    }

    #[test]
    fn test_annualized_return_ignores_series_span() {
        // Same endpoints, different lengths: only inception/as_of matter
        let inception = date(2019, 11, 13);
        let as_of = date(2024, 11, 13);
        let short = annualized_return(&[100.0, 150.0], inception, as_of).unwrap();
        let long = annualized_return(&[100.0, 90.0, 120.0, 150.0], inception, as_of).unwrap();
        assert_eq!(short, long);
    }

    #[test]
    fn test_annualized_return_as_of_before_inception() {
        // Elapsed time is taken as an absolute value
        let inception = date(2020, 1, 1);
        let forward = annualized_return(&[100.0, 110.0], inception, date(2021, 1, 1)).unwrap();
        let backward = annualized_return(&[100.0, 110.0], date(2021, 1, 1), inception).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_annualized_return_zero_years() {
        let day = date(2019, 11, 13);
        let result = annualized_return(&[100.0, 110.0], day, day);
        assert!(matches!(result, Err(Error::UndefinedMetric(_))));
    }

    #[test]
    fn test_annualized_return_zero_start() {
        let result = annualized_return(&[0.0, 110.0], date(2020, 1, 1), date(2023, 1, 1));
        assert!(matches!(result, Err(Error::UndefinedMetric(_))));
    }

    #[test]
    fn test_annualized_return_negative_growth() {
        // Negative base with a fractional exponent
        let result = annualized_return(&[100.0, -10.0], date(2020, 1, 1), date(2023, 1, 1));
        assert!(matches!(result, Err(Error::UndefinedMetric(_))));
    }

    #[test]
    fn test_annualized_return_total_loss() {
        let annualized = annualized_return(&[100.0, 0.0], date(2020, 1, 1), date(2023, 1, 1)).unwrap();
        assert_eq!(annualized, -1.0);
    }

    #[test]
    fn test_annualized_return_since_inception() {
        let as_of = date(2023, 11, 13);
        let direct = annualized_return(&[100.0, 130.0], inception_date(), as_of).unwrap();
        let fixed = annualized_return_since_inception(&[100.0, 130.0], as_of).unwrap();
        assert_eq!(direct, fixed);
    }
}

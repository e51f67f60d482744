//! Chart axis range with proportional padding.

use super::{ensure_series, extremes};
use crate::types::ValueRange;
use crate::{Error, Result};

/// Calculate a display range around the series extremes.
///
/// Both ends are pushed outward by `(max - min) * padding_fraction`, which
/// makes small moves visible on a chart. A flat series yields `{v, v}`.
///
/// # Errors
///
/// * `InvalidInput` if the series is empty, or `padding_fraction` is negative
///   or not finite
/// * `UndefinedMetric` if the padded range overflows
pub fn padded_range(values: &[f64], padding_fraction: f64) -> Result<ValueRange> {
    ensure_series(values)?;

    if !padding_fraction.is_finite() || padding_fraction < 0.0 {
        return Err(Error::InvalidInput(format!(
            "padding fraction must be a non-negative number, got {padding_fraction}"
        )));
    }

    let (min, max) = extremes(values);
    let padding = (max - min) * padding_fraction;
    let range = ValueRange {
        min: min - padding,
        max: max + padding,
    };

    if !range.min.is_finite() || !range.max.is_finite() {
        return Err(Error::UndefinedMetric(
            "padded range overflows for this series".to_string(),
        ));
    }

    Ok(range)
}

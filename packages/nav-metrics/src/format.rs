//! Text formatting for metric values shown on the widgets.

use chrono::NaiveDate;

/// Text shown in place of a metric that could not be computed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a percentage with two decimals, e.g. `5.00%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Format a NAV price with two decimals, e.g. `105.00€`.
pub fn format_price(value: f64) -> String {
    format!("{value:.2}€")
}

/// Format a percentage in German notation, e.g. `1.234,50%`.
pub fn format_percent_de(value: f64) -> String {
    format!("{}%", format_decimal_de(value))
}

/// Format a metric that may be undefined, falling back to `N/A`.
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format_percent_de(v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Format a date as `DD.MM.YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Two decimals, `.` as thousands separator and `,` as decimal separator.
fn format_decimal_de(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped},{frac_part}")
}

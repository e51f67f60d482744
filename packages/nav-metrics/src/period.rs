//! Lookback periods and their date ranges.
//!
//! Widgets offer three fixed windows: the last month, the last year, and
//! everything since the fund's inception.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::format::format_date;
use crate::types::Observation;
use crate::{Error, Result};

/// Lookback window selectable on a widget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Month,
    Year,
    AllTime,
}

impl Period {
    /// All periods, in the order the widgets show them.
    pub const ALL: [Period; 3] = [Period::Month, Period::Year, Period::AllTime];

    /// Identifier used by the widget buttons and the fund API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Month => "month",
            Period::Year => "year",
            Period::AllTime => "alltime",
        }
    }

    /// Date range covered by this period, ending on `today`.
    ///
    /// * `Month` starts on the same day of the previous month. A day that does
    ///   not exist in that month rolls over into the next one, so March 31
    ///   maps to March 2 (or 3) rather than the end of February.
    /// * `Year` starts 365 days before `today`.
    /// * `AllTime` starts at `inception`.
    pub fn date_range(&self, today: NaiveDate, inception: NaiveDate) -> Result<DateRange> {
        let from = match self {
            Period::Month => one_month_before(today)?,
            Period::Year => today
                .checked_sub_days(Days::new(365))
                .ok_or_else(|| out_of_range(today))?,
            Period::AllTime => inception,
        };

        Ok(DateRange { from, to: today })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "alltime" => Ok(Period::AllTime),
            _ => Err(Error::UnknownPeriod(s.to_string())),
        }
    }
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Whether `date` falls inside the range (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Observations dated inside the range, in the order given.
    pub fn select(&self, observations: &[Observation]) -> Vec<Observation> {
        observations
            .iter()
            .filter(|o| self.contains(o.date))
            .copied()
            .collect()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zeitraum: {} bis {}",
            format_date(self.from),
            format_date(self.to)
        )
    }
}

/// Same day-of-month in the previous month, overflowing forward.
fn one_month_before(date: NaiveDate) -> Result<NaiveDate> {
    let first_of_month = date.with_day(1).ok_or_else(|| out_of_range(date))?;
    let first_of_previous = first_of_month
        .checked_sub_months(Months::new(1))
        .ok_or_else(|| out_of_range(date))?;

    first_of_previous
        .checked_add_days(Days::new(u64::from(date.day() - 1)))
        .ok_or_else(|| out_of_range(date))
}

fn out_of_range(date: NaiveDate) -> Error {
    Error::InvalidInput(format!("date range before {date} is out of range"))
}

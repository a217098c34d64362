//! Historical windows selected by range code

use chrono::{Datelike, Days, Months, NaiveDate};
use std::fmt::Display;

use super::error::RateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RangeCode {
    FiveDays,
    #[default]
    OneMonth,
    SixMonths,
    YearToDate,
}

impl Display for RangeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RangeCode::FiveDays => "5D",
                RangeCode::OneMonth => "1M",
                RangeCode::SixMonths => "6M",
                RangeCode::YearToDate => "YTD",
            }
        )
    }
}

/// Unknown codes fall back to one month, so parsing never fails.
impl From<&str> for RangeCode {
    fn from(s: &str) -> Self {
        match s {
            "5D" => RangeCode::FiveDays,
            "6M" => RangeCode::SixMonths,
            "YTD" => RangeCode::YearToDate,
            _ => RangeCode::OneMonth,
        }
    }
}

/// Inclusive calendar date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RateError> {
        if start > end {
            return Err(RateError::InvalidArgument(format!(
                "start date {start} cannot be after end date {end}"
            )));
        }
        Ok(DateRange { start, end })
    }

    /// Resolves `code` to a window ending on `today`.
    pub fn ending_on(code: RangeCode, today: NaiveDate) -> Result<Self, RateError> {
        let start = match code {
            RangeCode::FiveDays => today.checked_sub_days(Days::new(5)),
            RangeCode::OneMonth => today.checked_sub_months(Months::new(1)),
            RangeCode::SixMonths => today.checked_sub_months(Months::new(6)),
            RangeCode::YearToDate => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        }
        .ok_or_else(|| RateError::InvalidArgument(format!("range {code} before {today}")))?;

        DateRange::new(start, today)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

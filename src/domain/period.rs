//! Lookback period selector handed to the data port.

use chrono::{Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    OneMonth,
    ThreeMonths,
    SixMonths,
    #[default]
    OneYear,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
    ];

    pub fn days(self) -> i64 {
        match self {
            Period::OneMonth => 30,
            Period::ThreeMonths => 91,
            Period::SixMonths => 182,
            Period::OneYear => 365,
        }
    }

    /// First date (inclusive) of the window ending at `end`.
    pub fn start_date(self, end: NaiveDate) -> NaiveDate {
        end - Duration::days(self.days())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown period '{0}' (expected one of 1mo, 3mo, 6mo, 1y)")]
pub struct ParsePeriodError(pub String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1mo" => Ok(Period::OneMonth),
            "3mo" => Ok(Period::ThreeMonths),
            "6mo" => Ok(Period::SixMonths),
            "1y" => Ok(Period::OneYear),
            other => Err(ParsePeriodError(other.to_string())),
        }
    }
}

//! TimeRange: the UI-facing trailing window token.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Trailing window selected per panel.
///
/// Parses from `"1Y"`, `"5Y"`, `"10Y"`, `"MAX"`; `"ALL"` is accepted as an
/// alias of `MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "5Y")]
    FiveYears,
    #[serde(rename = "10Y")]
    TenYears,
    #[default]
    #[serde(rename = "MAX", alias = "ALL")]
    Max,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time range '{0}' (expected 1Y, 5Y, 10Y or MAX)")]
pub struct RangeParseError(pub String);

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::OneYear,
        TimeRange::FiveYears,
        TimeRange::TenYears,
        TimeRange::Max,
    ];

    /// Length of the window in calendar years; `None` for the full history.
    pub fn years(self) -> Option<u32> {
        match self {
            TimeRange::OneYear => Some(1),
            TimeRange::FiveYears => Some(5),
            TimeRange::TenYears => Some(10),
            TimeRange::Max => None,
        }
    }

    /// First date inside the window ending at `today`.
    ///
    /// Calendar subtraction: 2024-02-29 minus one year is 2023-02-28.
    /// `None` means no lower bound.
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        let years = self.years()?;
        today.checked_sub_months(Months::new(years * 12))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::OneYear => "1Y",
            TimeRange::FiveYears => "5Y",
            TimeRange::TenYears => "10Y",
            TimeRange::Max => "MAX",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1Y" => Ok(TimeRange::OneYear),
            "5Y" => Ok(TimeRange::FiveYears),
            "10Y" => Ok(TimeRange::TenYears),
            "MAX" | "ALL" => Ok(TimeRange::Max),
            _ => Err(RangeParseError(s.to_string())),
        }
    }
}

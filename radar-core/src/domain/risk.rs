//! RiskPoint: gold/silver ratio against the S&P 500 level, on one date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::point::Dated;

/// Paired dual-axis observation.
///
/// A missing or non-finite field is `None`, never a dropped row: the chart
/// draws a gap there unless the consumer explicitly asks to connect nulls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPoint {
    pub date: NaiveDate,
    pub sp500: Option<f64>,
    pub ratio: Option<f64>,
}

impl RiskPoint {
    /// Both axes have a value.
    pub fn is_complete(&self) -> bool {
        self.sp500.is_some() && self.ratio.is_some()
    }
}

impl Dated for RiskPoint {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

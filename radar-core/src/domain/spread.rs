//! SpreadPoint: a base rate, a comparison rate and their difference.
//!
//! Funding spreads use the policy rate as `base_rate` and the overnight call
//! rate as `call_rate`. Credit spreads reuse the same shape with the
//! corporate yield as `base_rate` and the government yield as `call_rate`.
//! Either way `spread == base_rate - call_rate`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::point::{Dated, Observation};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadPoint {
    pub date: NaiveDate,
    pub base_rate: f64,
    pub call_rate: f64,
    pub spread: f64,
}

impl SpreadPoint {
    /// Build a point with the spread computed from its legs.
    pub fn new(date: NaiveDate, base_rate: f64, call_rate: f64) -> Self {
        Self {
            date,
            base_rate,
            call_rate,
            spread: base_rate - call_rate,
        }
    }
}

impl Dated for SpreadPoint {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Observation for SpreadPoint {
    fn value(&self) -> f64 {
        self.spread
    }
}

//! Yield gap readings: equity earnings yield minus the 10Y government yield.

use serde::{Deserialize, Serialize};

use crate::classify::ThresholdTable;

/// One market's yield gap, current and 5-year average, in percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketValuation {
    pub current: f64,
    pub avg: f64,
    /// Upstream's own judgment label, kept verbatim for display.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub pe: f64,
    #[serde(rename = "yield", default)]
    pub bond_yield: f64,
}

impl MarketValuation {
    /// Distance of the current gap from its 5-year average.
    pub fn deviation(&self) -> f64 {
        self.current - self.avg
    }

    /// Classify [`deviation`](Self::deviation) with a valuation table.
    pub fn judge<T: Copy>(&self, table: &ThresholdTable<T>) -> T {
        table.classify(self.deviation())
    }

    pub fn is_sane(&self) -> bool {
        self.current.is_finite() && self.avg.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldGap {
    pub us: MarketValuation,
    pub kr: MarketValuation,
}

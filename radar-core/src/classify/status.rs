//! Latest-value status badge: current reading, change and tier transition.

use serde::Serialize;

use super::threshold::ThresholdTable;
use crate::domain::Observation;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierStatus<T> {
    pub current: f64,
    /// `current - previous`; zero for a single-point series.
    pub change: f64,
    pub tier: T,
    /// Tier of the previous point, `None` for a single-point series.
    pub previous_tier: Option<T>,
}

impl<T: Copy + PartialEq> TierStatus<T> {
    /// Status of the last observation of a raw (undownsampled) series.
    ///
    /// `None` for an empty series.
    pub fn latest<P: Observation>(series: &[P], table: &ThresholdTable<T>) -> Option<Self> {
        let last = series.last()?;
        let current = last.value();
        let previous = series.len().checked_sub(2).map(|i| series[i].value());

        Some(Self {
            current,
            change: previous.map_or(0.0, |p| current - p),
            tier: table.classify(current),
            previous_tier: previous.map(|p| table.classify(p)),
        })
    }

    /// The latest point moved into a different tier.
    pub fn changed_tier(&self) -> bool {
        self.previous_tier.is_some_and(|p| p != self.tier)
    }
}

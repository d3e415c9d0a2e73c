//! ThresholdTable: ordered boundary → tier configuration and the single
//! classification function every status badge goes through.

use serde::{Deserialize, Serialize};

/// How a value is compared against a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// `value >= boundary`
    AtLeast,
    /// `value > boundary`
    Above,
}

impl Comparison {
    pub fn matches(self, value: f64, boundary: f64) -> bool {
        match self {
            Comparison::AtLeast => value >= boundary,
            Comparison::Above => value > boundary,
        }
    }
}

/// One row of a threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold<T> {
    pub boundary: f64,
    pub comparison: Comparison,
    pub tier: T,
}

impl<T> Threshold<T> {
    pub fn at_least(boundary: f64, tier: T) -> Self {
        Self {
            boundary,
            comparison: Comparison::AtLeast,
            tier,
        }
    }

    pub fn above(boundary: f64, tier: T) -> Self {
        Self {
            boundary,
            comparison: Comparison::Above,
            tier,
        }
    }
}

/// Ordered thresholds plus the tier returned when none matches.
///
/// Rows are kept in descending boundary order; the first row the value
/// satisfies decides the tier. NaN satisfies no row and gets the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTable<T>")]
pub struct ThresholdTable<T> {
    thresholds: Vec<Threshold<T>>,
    default: T,
}

#[derive(Deserialize)]
struct RawTable<T> {
    thresholds: Vec<Threshold<T>>,
    default: T,
}

impl<T> From<RawTable<T>> for ThresholdTable<T> {
    fn from(raw: RawTable<T>) -> Self {
        ThresholdTable::new(raw.thresholds, raw.default)
    }
}

impl<T> ThresholdTable<T> {
    /// Build a table; rows are sorted by descending boundary.
    pub fn new(mut thresholds: Vec<Threshold<T>>, default: T) -> Self {
        thresholds.sort_by(|a, b| b.boundary.total_cmp(&a.boundary));
        Self {
            thresholds,
            default,
        }
    }

    pub fn thresholds(&self) -> &[Threshold<T>] {
        &self.thresholds
    }

    pub fn default_tier(&self) -> &T {
        &self.default
    }
}

impl<T: Copy> ThresholdTable<T> {
    /// Tier of `value`. Deterministic and total.
    pub fn classify(&self, value: f64) -> T {
        self.thresholds
            .iter()
            .find(|t| t.comparison.matches(value, t.boundary))
            .map(|t| t.tier)
            .unwrap_or(self.default)
    }

    /// Per-point tiers, e.g. for colouring every bar of a chart.
    pub fn classify_series<I>(&self, values: I) -> Vec<T>
    where
        I: IntoIterator<Item = f64>,
    {
        values.into_iter().map(|v| self.classify(v)).collect()
    }
}

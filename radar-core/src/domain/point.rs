//! MetricPoint, one dated scalar observation, and the traits the series
//! functions are generic over.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Anything that sits on a calendar axis.
///
/// Windowing and downsampling only need the date, so they work on every
/// point type (metric points, spread rows, dual-axis risk rows).
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// A dated point with a single plottable value.
///
/// Gradient splitting and tier classification read `value()`. After ingest
/// the value is always finite.
pub trait Observation: Dated {
    fn value(&self) -> f64;
}

/// One observation of a metric on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Ordered observations of one metric, strictly increasing by date after ingest.
pub type Series = Vec<MetricPoint>;

impl MetricPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

impl Dated for MetricPoint {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Observation for MetricPoint {
    fn value(&self) -> f64 {
        self.value
    }
}

impl<T: Dated> Dated for &T {
    fn date(&self) -> NaiveDate {
        (**self).date()
    }
}

impl<T: Observation> Observation for &T {
    fn value(&self) -> f64 {
        (**self).value()
    }
}

//! MacroSeries: one named macro indicator (CPI YoY, unemployment rate).

use serde::{Deserialize, Serialize};

use super::point::{MetricPoint, Series};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroSeries {
    #[serde(default)]
    pub title: String,
    pub data: Series,
}

impl MacroSeries {
    pub fn new(title: impl Into<String>, data: Series) -> Self {
        Self {
            title: title.into(),
            data,
        }
    }

    /// Most recent observation, if any.
    pub fn latest(&self) -> Option<&MetricPoint> {
        self.data.last()
    }
}

//! PulseItem: one quoted instrument in the market pulse strip.

use serde::{Deserialize, Serialize};

use super::point::Series;

/// Snapshot of one instrument: latest price, day change and a short history.
///
/// Lives for one fetch cycle; the whole list is replaced on the next
/// successful pulse fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseItem {
    /// Unique key within one pulse payload (e.g. `^GSPC`, `KRW=X`).
    pub ticker: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    #[serde(default)]
    pub history: Series,
}

impl PulseItem {
    /// Derive price and day change from the last two observations of `history`.
    ///
    /// Returns `None` when fewer than two observations are available.
    pub fn from_history(ticker: impl Into<String>, name: impl Into<String>, history: Series) -> Option<Self> {
        let n = history.len();
        if n < 2 {
            return None;
        }
        let current = history[n - 1].value;
        let prev = history[n - 2].value;
        let change = current - prev;
        let change_percent = if prev != 0.0 { change / prev * 100.0 } else { 0.0 };

        Some(Self {
            ticker: ticker.into(),
            name: name.into(),
            price: current,
            change,
            change_percent,
            history,
        })
    }

    /// All scalar fields are finite.
    pub fn is_sane(&self) -> bool {
        self.price.is_finite() && self.change.is_finite() && self.change_percent.is_finite()
    }
}

//! Domain types: observations, quotes, macro series, spreads, valuations.

pub mod indicator;
pub mod payload;
pub mod point;
pub mod pulse;
pub mod risk;
pub mod spread;
pub mod valuation;

pub use indicator::MacroSeries;
pub use payload::{Payload, PayloadKind};
pub use point::{Dated, MetricPoint, Observation, Series};
pub use pulse::PulseItem;
pub use risk::RiskPoint;
pub use spread::SpreadPoint;
pub use valuation::{MarketValuation, YieldGap};

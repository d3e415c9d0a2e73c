//! Threshold classification: tables as data, one classify function.

pub mod status;
pub mod threshold;
pub mod tiers;

pub use status::TierStatus;
pub use threshold::{Comparison, Threshold, ThresholdTable};
pub use tiers::{
    credit_spread_tiers, funding_spread_tiers, kr_valuation_tiers, us_valuation_tiers, CreditTier,
    FundingTier, KrValuation, UsValuation, CREDIT_DANGER_LINE,
};

//! Domain tier tags and their default threshold tables.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::threshold::{Threshold, ThresholdTable};

/// Credit spread (corporate AA- 3Y minus government 3Y) risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditTier {
    Stable,
    Caution,
    Danger,
}

/// Short-term funding spread (policy rate minus call rate) tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingTier {
    Danger,
    Warning,
    Good,
    Safe,
}

/// US yield-gap judgment relative to the 5-year average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsValuation {
    Overvalued,
    Fair,
    Undervalued,
}

/// KR yield-gap judgment relative to the 5-year average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KrValuation {
    Sell,
    Hold,
    StrongBuy,
}

/// Boundary at which the credit spread chart switches to the danger band.
pub const CREDIT_DANGER_LINE: f64 = 1.3;

/// `>= 1.3` danger, `>= 1.0` caution, else stable.
pub fn credit_spread_tiers() -> ThresholdTable<CreditTier> {
    ThresholdTable::new(
        vec![
            Threshold::at_least(CREDIT_DANGER_LINE, CreditTier::Danger),
            Threshold::at_least(1.0, CreditTier::Caution),
        ],
        CreditTier::Stable,
    )
}

/// `>= 0.10` safe, `> 0.05` good, `> 0.02` warning, else danger.
///
/// The top row is inclusive and the middle rows are strict. Historical
/// classifications depend on exactly this mix.
pub fn funding_spread_tiers() -> ThresholdTable<FundingTier> {
    ThresholdTable::new(
        vec![
            Threshold::at_least(0.10, FundingTier::Safe),
            Threshold::above(0.05, FundingTier::Good),
            Threshold::above(0.02, FundingTier::Warning),
        ],
        FundingTier::Danger,
    )
}

/// Over `current - avg`: `> 0.5` undervalued, `< -0.5` overvalued, else fair.
pub fn us_valuation_tiers() -> ThresholdTable<UsValuation> {
    ThresholdTable::new(
        vec![
            Threshold::above(0.5, UsValuation::Undervalued),
            Threshold::at_least(-0.5, UsValuation::Fair),
        ],
        UsValuation::Overvalued,
    )
}

/// Over `current - avg`: `> 1.0` strong buy, `< -0.5` sell, else hold.
pub fn kr_valuation_tiers() -> ThresholdTable<KrValuation> {
    ThresholdTable::new(
        vec![
            Threshold::above(1.0, KrValuation::StrongBuy),
            Threshold::at_least(-0.5, KrValuation::Hold),
        ],
        KrValuation::Sell,
    )
}

impl fmt::Display for CreditTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CreditTier::Stable => "stable",
            CreditTier::Caution => "caution",
            CreditTier::Danger => "danger",
        })
    }
}

impl fmt::Display for FundingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FundingTier::Danger => "danger",
            FundingTier::Warning => "warning",
            FundingTier::Good => "good",
            FundingTier::Safe => "safe",
        })
    }
}

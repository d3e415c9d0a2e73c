//! Payload: the decoded body of one source, tagged by shape.

use serde::{Deserialize, Serialize};

use super::indicator::MacroSeries;
use super::pulse::PulseItem;
use super::risk::RiskPoint;
use super::spread::SpreadPoint;
use super::valuation::YieldGap;

/// Expected JSON shape of a source. Drives decoding and ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    Pulse,
    Macro,
    Risk,
    Spread,
    YieldGap,
}

/// Last-known-good data of one snapshot slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Payload {
    Pulse(Vec<PulseItem>),
    Macro(MacroSeries),
    Risk(Vec<RiskPoint>),
    Spread(Vec<SpreadPoint>),
    YieldGap(YieldGap),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Pulse(_) => PayloadKind::Pulse,
            Payload::Macro(_) => PayloadKind::Macro,
            Payload::Risk(_) => PayloadKind::Risk,
            Payload::Spread(_) => PayloadKind::Spread,
            Payload::YieldGap(_) => PayloadKind::YieldGap,
        }
    }

    pub fn as_pulse(&self) -> Option<&[PulseItem]> {
        match self {
            Payload::Pulse(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_macro(&self) -> Option<&MacroSeries> {
        match self {
            Payload::Macro(series) => Some(series),
            _ => None,
        }
    }

    pub fn as_risk(&self) -> Option<&[RiskPoint]> {
        match self {
            Payload::Risk(points) => Some(points),
            _ => None,
        }
    }

    pub fn as_spread(&self) -> Option<&[SpreadPoint]> {
        match self {
            Payload::Spread(points) => Some(points),
            _ => None,
        }
    }

    pub fn as_yield_gap(&self) -> Option<&YieldGap> {
        match self {
            Payload::YieldGap(gap) => Some(gap),
            _ => None,
        }
    }
}

//! DashboardSnapshot: last-known-good payload per slot plus refresh state.

use chrono::{DateTime, Utc};
use radar_core::domain::{MacroSeries, Payload, PulseItem, RiskPoint, SpreadPoint, YieldGap};
use serde::Serialize;
use std::collections::BTreeMap;

/// Fetch history of one slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlotState {
    pub last_success: Option<DateTime<Utc>>,
    /// Error of the most recent attempt; cleared by the next success.
    pub last_error: Option<String>,
}

/// What every panel reads.
///
/// A slot missing from `slots` has never been fetched successfully. A slot
/// whose latest fetch failed keeps its previous payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Slot holding the pulse strip.
    pub pulse_slot: String,
    pub slots: BTreeMap<String, Payload>,
    pub status: BTreeMap<String, SlotState>,
    pub loading: bool,
    pub last_updated: Option<DateTime<Utc>>,
    /// Set when the latest pulse fetch failed.
    pub pulse_error: Option<String>,
}

impl DashboardSnapshot {
    pub fn new(pulse_slot: impl Into<String>) -> Self {
        Self {
            pulse_slot: pulse_slot.into(),
            ..Self::default()
        }
    }

    pub fn slot(&self, name: &str) -> Option<&Payload> {
        self.slots.get(name)
    }

    pub fn slot_state(&self, name: &str) -> Option<&SlotState> {
        self.status.get(name)
    }

    pub fn pulse(&self) -> Option<&[PulseItem]> {
        self.slot(&self.pulse_slot).and_then(Payload::as_pulse)
    }

    pub fn macro_series(&self, name: &str) -> Option<&MacroSeries> {
        self.slot(name).and_then(Payload::as_macro)
    }

    pub fn risk(&self, name: &str) -> Option<&[RiskPoint]> {
        self.slot(name).and_then(Payload::as_risk)
    }

    pub fn spreads(&self, name: &str) -> Option<&[SpreadPoint]> {
        self.slot(name).and_then(Payload::as_spread)
    }

    pub fn yield_gap(&self, name: &str) -> Option<&YieldGap> {
        self.slot(name).and_then(Payload::as_yield_gap)
    }

    /// Replace the slot payload wholesale.
    pub(crate) fn record_success(&mut self, name: &str, payload: Payload, at: DateTime<Utc>) {
        self.slots.insert(name.to_string(), payload);
        let state = self.status.entry(name.to_string()).or_default();
        state.last_success = Some(at);
        state.last_error = None;
    }

    /// Leave the payload untouched, remember the error.
    pub(crate) fn record_failure(&mut self, name: &str, error: String) {
        self.status.entry(name.to_string()).or_default().last_error = Some(error);
    }
}

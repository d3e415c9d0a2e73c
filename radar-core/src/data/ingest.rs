//! Ingest: decode a source body and sanitize it before it reaches the series
//! functions.
//!
//! Windowing, downsampling and gradient splitting assume date-ordered,
//! duplicate-free, finite series. Ingest establishes that:
//! - unparseable dates are dropped
//! - non-finite values are dropped (metric series, spread legs)
//! - non-finite risk fields become `None` (the row stays)
//! - rows are stably sorted by date, then same-date duplicates keep the first
//! - spreads are recomputed from their legs at upstream precision
//! - pulse items with non-finite scalars or a repeated ticker are dropped

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::fetcher::FetchError;
use crate::domain::{
    Dated, MacroSeries, MetricPoint, Payload, PayloadKind, PulseItem, RiskPoint, Series,
    SpreadPoint, YieldGap,
};

/// Disagreement allowed between an upstream spread and `base - call`.
///
/// Upstream rounds each of the three columns to 2 decimals independently.
pub const SPREAD_TOLERANCE: f64 = 0.015 + 1e-9;

/// Decimal places upstream publishes spreads with.
pub const SPREAD_DECIMALS: i32 = 2;

/// Round to upstream precision so `4.50 - 4.40` is exactly `0.10` again.
fn round_spread(value: f64) -> f64 {
    let scale = 10f64.powi(SPREAD_DECIMALS);
    (value * scale).round() / scale
}

/// What ingest had to repair in one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Top-level rows received.
    pub received: usize,
    /// Top-level rows kept.
    pub accepted: usize,
    pub invalid_dates: usize,
    pub non_finite: usize,
    pub duplicates: usize,
    pub reordered: bool,
    /// Risk fields replaced by `None`.
    pub nulled_fields: usize,
    /// Upstream spreads that disagreed with `base - call`.
    pub spread_mismatches: usize,
}

impl IngestReport {
    /// Nothing was repaired or dropped.
    pub fn is_clean(&self) -> bool {
        self.invalid_dates == 0
            && self.non_finite == 0
            && self.duplicates == 0
            && !self.reordered
            && self.nulled_fields == 0
            && self.spread_mismatches == 0
    }
}

// ── Raw upstream shapes ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawPoint {
    date: String,
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawMacro {
    #[serde(default)]
    title: String,
    data: Vec<RawPoint>,
}

#[derive(Debug, Deserialize)]
struct RawPulseItem {
    ticker: String,
    #[serde(default)]
    name: String,
    price: Option<f64>,
    change: Option<f64>,
    #[serde(alias = "changePercent")]
    change_percent: Option<f64>,
    #[serde(default)]
    history: Vec<RawPoint>,
}

#[derive(Debug, Deserialize)]
struct RawRiskPoint {
    date: String,
    sp500: Option<f64>,
    ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawSpreadPoint {
    date: String,
    #[serde(alias = "corp")]
    base_rate: Option<f64>,
    #[serde(alias = "gov")]
    call_rate: Option<f64>,
    spread: Option<f64>,
}

/// Parse an upstream date: `YYYY-MM-DD` (optionally followed by a time),
/// `YYYYMMDD`, or `YYYY-MM` (first of the month).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Some(day) = s.get(..10) {
        if let Ok(d) = NaiveDate::parse_from_str(day, "%Y-%m-%d") {
            return Some(d);
        }
    }
    if s.len() == 7 {
        return NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok();
    }
    NaiveDate::parse_from_str(s, "%Y%m%d").ok()
}

fn dated(raw: &str, report: &mut IngestReport) -> Option<NaiveDate> {
    let date = parse_date(raw);
    if date.is_none() {
        report.invalid_dates += 1;
    }
    date
}

fn raw_points(raw: Vec<RawPoint>, report: &mut IngestReport) -> Vec<MetricPoint> {
    raw.into_iter()
        .filter_map(|p| {
            let date = dated(&p.date, report)?;
            Some(MetricPoint::new(date, p.value.unwrap_or(f64::NAN)))
        })
        .collect()
}

// ── Sanitizers ───────────────────────────────────────────────────────

/// Stable-sort by date when out of order, then drop same-date repeats.
fn canonicalize<T: Dated>(mut points: Vec<T>, report: &mut IngestReport) -> Vec<T> {
    if !points.windows(2).all(|w| w[0].date() <= w[1].date()) {
        points.sort_by_key(|p| p.date());
        report.reordered = true;
    }
    let before = points.len();
    points.dedup_by_key(|p| p.date());
    report.duplicates += before - points.len();
    points
}

/// Drop non-finite observations and canonicalize order.
pub fn sanitize_series(points: Vec<MetricPoint>, report: &mut IngestReport) -> Series {
    let before = points.len();
    let finite: Vec<MetricPoint> = points.into_iter().filter(|p| p.value.is_finite()).collect();
    report.non_finite += before - finite.len();
    canonicalize(finite, report)
}

/// Null out non-finite fields (rows are kept) and canonicalize order.
pub fn sanitize_risk(points: Vec<RiskPoint>, report: &mut IngestReport) -> Vec<RiskPoint> {
    let points = points
        .into_iter()
        .map(|mut p| {
            for field in [&mut p.sp500, &mut p.ratio] {
                if field.is_some_and(|v| !v.is_finite()) {
                    *field = None;
                    report.nulled_fields += 1;
                }
            }
            p
        })
        .collect();
    canonicalize(points, report)
}

/// Drop rows with a non-finite leg, recompute every spread from its legs and
/// round it to [`SPREAD_DECIMALS`].
///
/// A finite upstream spread further than [`SPREAD_TOLERANCE`] from
/// `base - call` is counted as a mismatch; the recomputed value wins either way.
pub fn sanitize_spreads(points: Vec<SpreadPoint>, report: &mut IngestReport) -> Vec<SpreadPoint> {
    let before = points.len();
    let rows: Vec<SpreadPoint> = points
        .into_iter()
        .filter(|p| p.base_rate.is_finite() && p.call_rate.is_finite())
        .map(|p| {
            let mut recomputed = SpreadPoint::new(p.date, p.base_rate, p.call_rate);
            recomputed.spread = round_spread(recomputed.spread);
            if p.spread.is_finite() && (p.spread - recomputed.spread).abs() > SPREAD_TOLERANCE {
                report.spread_mismatches += 1;
            }
            recomputed
        })
        .collect();
    report.non_finite += before - rows.len();
    canonicalize(rows, report)
}

/// Drop items with non-finite scalars or an already-seen ticker; sanitize
/// each history.
pub fn sanitize_pulse(items: Vec<PulseItem>, report: &mut IngestReport) -> Vec<PulseItem> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for mut item in items {
        if !item.is_sane() {
            report.non_finite += 1;
            continue;
        }
        if !seen.insert(item.ticker.clone()) {
            report.duplicates += 1;
            continue;
        }
        item.history = sanitize_series(std::mem::take(&mut item.history), report);
        out.push(item);
    }
    out
}

// ── Decoding ─────────────────────────────────────────────────────────

fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::ResponseFormatChanged(e.to_string()))
}

/// Decode a JSON body of the given shape and sanitize it.
///
/// A body that does not match the shape is a [`FetchError::ResponseFormatChanged`];
/// individual bad rows inside a well-formed body are repaired or dropped
/// and counted in the report.
pub fn decode(kind: PayloadKind, body: &[u8]) -> Result<(Payload, IngestReport), FetchError> {
    let mut report = IngestReport::default();

    let payload = match kind {
        PayloadKind::Pulse => {
            let raw: Vec<RawPulseItem> = parse(body)?;
            report.received = raw.len();
            let items = raw
                .into_iter()
                .map(|r| PulseItem {
                    ticker: r.ticker,
                    name: r.name,
                    price: r.price.unwrap_or(f64::NAN),
                    change: r.change.unwrap_or(f64::NAN),
                    change_percent: r.change_percent.unwrap_or(f64::NAN),
                    history: raw_points(r.history, &mut report),
                })
                .collect();
            let items = sanitize_pulse(items, &mut report);
            report.accepted = items.len();
            Payload::Pulse(items)
        }
        PayloadKind::Macro => {
            let raw: RawMacro = parse(body)?;
            report.received = raw.data.len();
            let points = raw_points(raw.data, &mut report);
            let data = sanitize_series(points, &mut report);
            report.accepted = data.len();
            Payload::Macro(MacroSeries::new(raw.title, data))
        }
        PayloadKind::Risk => {
            let raw: Vec<RawRiskPoint> = parse(body)?;
            report.received = raw.len();
            let points = raw
                .into_iter()
                .filter_map(|r| {
                    Some(RiskPoint {
                        date: dated(&r.date, &mut report)?,
                        sp500: r.sp500,
                        ratio: r.ratio,
                    })
                })
                .collect();
            let points = sanitize_risk(points, &mut report);
            report.accepted = points.len();
            Payload::Risk(points)
        }
        PayloadKind::Spread => {
            let raw: Vec<RawSpreadPoint> = parse(body)?;
            report.received = raw.len();
            let points = raw
                .into_iter()
                .filter_map(|r| {
                    Some(SpreadPoint {
                        date: dated(&r.date, &mut report)?,
                        base_rate: r.base_rate.unwrap_or(f64::NAN),
                        call_rate: r.call_rate.unwrap_or(f64::NAN),
                        spread: r.spread.unwrap_or(f64::NAN),
                    })
                })
                .collect();
            let points = sanitize_spreads(points, &mut report);
            report.accepted = points.len();
            Payload::Spread(points)
        }
        PayloadKind::YieldGap => {
            let gap: YieldGap = parse(body)?;
            if !gap.us.is_sane() || !gap.kr.is_sane() {
                return Err(FetchError::ResponseFormatChanged(
                    "yield gap has non-finite readings".into(),
                ));
            }
            report.received = 1;
            report.accepted = 1;
            Payload::YieldGap(gap)
        }
    };

    Ok((payload, report))
}

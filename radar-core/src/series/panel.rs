//! Panel preparation: the per-panel pipeline the presentation layer runs on
//! every window change.
//!
//! raw series → window → (split offset over the window) → downsample.
//! The current value always comes from the raw series.

use chrono::NaiveDate;

use super::downsample::downsample;
use super::gradient::split_offset;
use super::range::TimeRange;
use super::window::window;
use crate::domain::{Dated, Observation};

/// Render-ready view of one series under one window selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel<T> {
    pub range: TimeRange,
    /// Windowed and downsampled points, in date order.
    pub points: Vec<T>,
    /// Number of points in the window before downsampling.
    pub windowed_len: usize,
    /// Fill split for the boundary, when the panel has one.
    pub split_offset: Option<f64>,
    /// Latest raw observation, independent of window and downsampling.
    pub current: Option<T>,
}

impl<T> Panel<T> {
    /// The window selected no data; render the empty state.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Prepare a panel without a threshold band (e.g. the dual-axis risk chart).
pub fn prepare_panel<T>(raw: &[T], range: TimeRange, max_points: usize, today: NaiveDate) -> Panel<T>
where
    T: Dated + Clone,
{
    let windowed = window(raw, range, today);
    Panel {
        range,
        points: downsample(&windowed, max_points).into_owned(),
        windowed_len: windowed.len(),
        split_offset: None,
        current: raw.last().cloned(),
    }
}

/// Prepare a panel filled in two bands around `boundary`.
///
/// The split is computed on the full window, before decimation, so a spike
/// that downsampling drops still moves the band edge.
pub fn prepare_split_panel<T>(
    raw: &[T],
    range: TimeRange,
    max_points: usize,
    boundary: f64,
    today: NaiveDate,
) -> Panel<T>
where
    T: Observation + Clone,
{
    let windowed = window(raw, range, today);
    Panel {
        range,
        points: downsample(&windowed, max_points).into_owned(),
        windowed_len: windowed.len(),
        split_offset: Some(split_offset(&windowed, boundary)),
        current: raw.last().cloned(),
    }
}

//! Stride decimation for rendering long histories.
//!
//! Nearest-neighbour: every `stride`-th point from index 0, no averaging.
//! Intra-stride extremes are lost and the final point may be skipped, so
//! current-value displays must read the raw series, not this output.

use std::borrow::Cow;

/// Default point budget of one rendered panel.
pub const DEFAULT_MAX_POINTS: usize = 500;

/// Reduce `series` to at most `max_points` points.
///
/// Series already within budget are borrowed unchanged. Otherwise
/// `stride = ceil(len / max_points)` and the output keeps indices
/// `0, stride, 2*stride, ...`, so the first point is always present.
pub fn downsample<T: Clone>(series: &[T], max_points: usize) -> Cow<'_, [T]> {
    if series.len() <= max_points {
        return Cow::Borrowed(series);
    }
    if max_points == 0 {
        return Cow::Owned(Vec::new());
    }
    let stride = series.len().div_ceil(max_points);
    Cow::Owned(series.iter().step_by(stride).cloned().collect())
}

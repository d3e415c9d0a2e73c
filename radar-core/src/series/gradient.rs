//! Split offset for two-band area fills around a boundary.
//!
//! The offset is the fraction of the vertical range, measured from the top
//! (the series maximum), at which the fill switches from the "above" band to
//! the "below" band. Computed over the windowed data only, so callers
//! recompute it whenever the window changes.

use crate::domain::Observation;

/// Split offset of `boundary` within the observed range of `series`.
///
/// - empty series (or only non-finite values) → `0.0`
/// - `max <= boundary` → `0.0` (everything below)
/// - `min >= boundary` → `1.0` (everything above)
/// - otherwise `(max - boundary) / (max - min)`
///
/// A flat series (`max == min`) always lands in one of the first two
/// branches, so the division never sees a zero range.
pub fn split_offset<T: Observation>(series: &[T], boundary: f64) -> f64 {
    split_offset_by(series, boundary, |p| p.value())
}

/// [`split_offset`] over a projected value, e.g. one leg of a spread row.
pub fn split_offset_by<T, F>(series: &[T], boundary: f64, value: F) -> f64
where
    F: Fn(&T) -> f64,
{
    if boundary.is_nan() {
        return 0.0;
    }

    let mut values = series.iter().map(value).filter(|v| v.is_finite());
    let Some(first) = values.next() else {
        return 0.0;
    };
    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if max <= boundary {
        0.0
    } else if min >= boundary {
        1.0
    } else {
        ((max - boundary) / (max - min)).clamp(0.0, 1.0)
    }
}

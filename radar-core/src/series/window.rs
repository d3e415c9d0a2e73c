//! Trailing-window selection over dated series.

use chrono::NaiveDate;
use std::borrow::Cow;

use super::range::TimeRange;
use crate::domain::Dated;

/// Keep the points of `series` dated on or after `today - range`.
///
/// `Max` borrows the input unchanged. Other ranges return the matching
/// subsequence in its original order, possibly empty. The input is never
/// modified.
pub fn window<T>(series: &[T], range: TimeRange, today: NaiveDate) -> Cow<'_, [T]>
where
    T: Dated + Clone,
{
    let Some(cutoff) = range.cutoff(today) else {
        return Cow::Borrowed(series);
    };
    Cow::Owned(
        series
            .iter()
            .filter(|p| p.date() >= cutoff)
            .cloned()
            .collect(),
    )
}

/// [`window`] anchored at the local calendar date.
pub fn window_from_today<T>(series: &[T], range: TimeRange) -> Cow<'_, [T]>
where
    T: Dated + Clone,
{
    window(series, range, chrono::Local::now().date_naive())
}

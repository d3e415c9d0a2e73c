//! Series processing: windowing, downsampling, gradient split, panel prep.
//!
//! Every function here is pure. Inputs are borrowed and never mutated;
//! outputs borrow the input where nothing had to change.

pub mod downsample;
pub mod gradient;
pub mod panel;
pub mod range;
pub mod window;

pub use downsample::{downsample, DEFAULT_MAX_POINTS};
pub use gradient::{split_offset, split_offset_by};
pub use panel::{prepare_panel, prepare_split_panel, Panel};
pub use range::{RangeParseError, TimeRange};
pub use window::{window, window_from_today};

//! Data sources: the bounded series store and read-time transforms.
//!
//! The store is written by one owner (the UI thread in a plotter) and read
//! by the renderer through index windows.

mod smooth;
mod store;

pub use smooth::{SMOOTHING_SUBDIVISIONS, catmull_rom};
pub use store::SeriesStore;

use crate::view::Range;

/// Outcome of a single ingest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Names seen for the first time, in line order.
    pub new_series: Vec<String>,
    /// Samples dropped from the front to honor the retention limit.
    pub evicted: usize,
}

/// Indices needed to draw a fractional X window.
///
/// The slice reaches the nearest sample at or beyond each bound, so segments
/// crossing the plot edges are drawn too.
fn index_range(range: Range, len: usize) -> std::ops::Range<usize> {
    if len == 0 || !range.is_finite() {
        return 0..0;
    }
    let min = range.min.floor();
    let max = range.max.ceil();
    if max < 0.0 || min > max {
        return 0..0;
    }
    let start = min.max(0.0) as usize;
    let end = (max as usize).saturating_add(1).min(len);
    start.min(end)..end
}

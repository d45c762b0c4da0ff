//! Y axis auto-scaling.

use crate::datasource::SeriesStore;
use crate::view::Range;

/// Fraction of the value span added above and below the data.
pub const Y_PADDING_FRAC: f64 = 0.1;

/// Compute the padded Y range over every retained value of visible series.
///
/// The whole retained history is scanned, not only the X window, so the
/// axis stays still while the user pans. Returns `None` when no visible
/// series holds data. A flat signal gets a unit span around its value.
pub fn y_range(store: &SeriesStore, is_visible: impl Fn(&str) -> bool) -> Option<Range> {
    let mut range: Option<Range> = None;
    for (name, values) in store.iter() {
        if !is_visible(name) {
            continue;
        }
        for value in values.iter().copied().filter(|value| value.is_finite()) {
            range = Some(match range {
                None => Range::new(value, value),
                Some(mut existing) => {
                    existing.expand_to_include(value);
                    existing
                }
            });
        }
    }
    let range = range?.padded(Y_PADDING_FRAC);
    if range.span() > 0.0 {
        Some(range)
    } else {
        Some(range.with_min_span(1.0))
    }
}

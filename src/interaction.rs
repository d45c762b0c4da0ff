//! Interaction math for panning and wheel zooming.
//!
//! These helpers are pure functions over X windows; the viewport controller
//! decides when to apply them and which mode transitions follow.

use crate::view::Range;

/// Scale applied per wheel unit.
pub(crate) const WHEEL_ZOOM_STEP: f64 = 0.12;
/// Smallest zoom factor produced by a single wheel event.
pub(crate) const MIN_ZOOM_FACTOR: f64 = 0.2;
/// Largest zoom factor produced by a single wheel event.
pub(crate) const MAX_ZOOM_FACTOR: f64 = 5.0;
/// Narrowest X window a zoom may produce, in samples.
pub(crate) const MIN_ZOOM_SPAN: f64 = 10.0;

/// Convert wheel rotation into a zoom factor.
///
/// Negative rotation (scrolling up) zooms in.
pub(crate) fn zoom_factor_from_wheel(delta: f64) -> f64 {
    (1.0 + delta * WHEEL_ZOOM_STEP).clamp(MIN_ZOOM_FACTOR, MAX_ZOOM_FACTOR)
}

/// Scale a window around its midpoint.
pub(crate) fn zoom_window(window: Range, factor: f64) -> Range {
    let span = window.span().max(1.0);
    let center = window.min + span * 0.5;
    let new_span = (span * factor).max(MIN_ZOOM_SPAN);
    Range::new(center - new_span * 0.5, center + new_span * 0.5)
}

/// Shift a window by a pixel drag.
///
/// Returns `None` when the pixel scale cannot be inverted.
pub(crate) fn pan_window(window: Range, delta_pixels: f64, pixels_per_unit: f64) -> Option<Range> {
    if !pixels_per_unit.is_finite() || pixels_per_unit <= 0.0 || !delta_pixels.is_finite() {
        return None;
    }
    let shift = -delta_pixels / pixels_per_unit;
    Some(Range::new(window.min + shift, window.max + shift))
}

//! View models, X windows, and the viewport state machine.

use crate::config::MIN_WINDOW_SIZE;
use crate::interaction::{pan_window, zoom_factor_from_wheel, zoom_window};

/// Default distance from the newest sample that still counts as the right edge.
pub const DEFAULT_EDGE_TOLERANCE: f64 = 1.0;

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the range.
    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Check whether a value lies inside the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Add a fraction of the span on both sides.
    pub fn padded(&self, frac: f64) -> Self {
        let padding = self.span().abs() * frac;
        Self {
            min: self.min - padding,
            max: self.max + padding,
        }
    }

    /// Ensure the range has at least the given span.
    pub fn with_min_span(&self, min_span: f64) -> Self {
        if self.span() >= min_span {
            return *self;
        }
        let center = self.center();
        let half = min_span * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

/// The active X view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Always show the newest `window_size` samples (default).
    #[default]
    AutoFollow,
    /// Keep the window set by the last pan, zoom, or scroll.
    Manual,
}

/// Scrollbar geometry for an external horizontal scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarModel {
    /// Thumb position, in samples.
    pub value: usize,
    /// Thumb length, in samples.
    pub visible_amount: usize,
    /// Scrollbar extent, in samples.
    pub maximum: usize,
    /// Whether there is anything to scroll.
    pub visible: bool,
}

/// Tracks the visible X window over the store's sample indices.
///
/// The controller never reads the store itself; callers report the current
/// sample count through [`ViewportController::sync`] after every ingest.
#[derive(Debug, Clone)]
pub struct ViewportController {
    view: View,
    window: Range,
    window_size: usize,
    default_window_size: usize,
    count: usize,
}

impl ViewportController {
    /// Create a controller following the newest `window_size` samples.
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(MIN_WINDOW_SIZE);
        Self {
            view: View::AutoFollow,
            window: Range::new(0.0, window_size as f64),
            window_size,
            default_window_size: window_size,
            count: 0,
        }
    }

    /// Access the active view mode.
    pub fn view(&self) -> View {
        self.view
    }

    /// Check whether the window tracks the newest data.
    pub fn is_auto_follow(&self) -> bool {
        self.view == View::AutoFollow
    }

    /// Access the visible X window.
    pub fn window(&self) -> Range {
        self.window
    }

    /// Current visible sample count.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Window size restored by [`ViewportController::reset_view`].
    pub fn default_window_size(&self) -> usize {
        self.default_window_size
    }

    /// Sample count reported by the last sync.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Recompute the window for a new sample count.
    pub fn sync(&mut self, count: usize) {
        self.count = count;
        match self.view {
            View::AutoFollow => self.window = follow_window(count, self.window_size),
            View::Manual => self.clamp_manual(),
        }
    }

    /// Show an explicit window and leave auto-follow.
    pub fn set_window(&mut self, min: f64, max: f64) {
        let window = Range::new(min, max);
        if !window.is_finite() {
            return;
        }
        self.window_size = (window.span().round() as usize).max(MIN_WINDOW_SIZE);
        self.apply_manual(window);
    }

    /// Zoom around the window midpoint by wheel rotation.
    ///
    /// Negative deltas zoom in.
    pub fn zoom(&mut self, delta: f64) {
        if delta == 0.0 || !delta.is_finite() {
            return;
        }
        let window = zoom_window(self.window, zoom_factor_from_wheel(delta));
        self.window_size = (window.span().round() as usize).max(MIN_WINDOW_SIZE);
        self.apply_manual(window);
    }

    /// Pan by a pixel drag; `pixels_per_unit` is the rendered width of one sample.
    pub fn pan(&mut self, delta_pixels: f64, pixels_per_unit: f64) {
        if let Some(window) = pan_window(self.window, delta_pixels, pixels_per_unit) {
            self.apply_manual(window);
        }
    }

    /// Move the window to start at `start`, as a scrollbar drag does.
    ///
    /// Landing within [`DEFAULT_EDGE_TOLERANCE`] of the rightmost scroll
    /// position re-enters auto-follow.
    pub fn scroll_to(&mut self, start: f64) {
        if !start.is_finite() {
            return;
        }
        let start = start.max(0.0);
        let rightmost = self.count.saturating_sub(self.window_size) as f64;
        self.window = Range::new(start, start + self.window_size as f64);
        if start + DEFAULT_EDGE_TOLERANCE >= rightmost {
            self.set_view(View::AutoFollow);
            self.sync(self.count);
        } else {
            self.apply_manual(self.window);
        }
    }

    /// Return to auto-follow with the configured window size.
    pub fn reset_view(&mut self) {
        self.window_size = self.default_window_size;
        self.set_view(View::AutoFollow);
        self.sync(self.count);
    }

    /// Replace the configured window size.
    ///
    /// The active window size follows immediately; a manual window keeps its
    /// bounds until the next reset.
    pub fn set_default_window_size(&mut self, size: usize) {
        self.default_window_size = size.max(MIN_WINDOW_SIZE);
        self.window_size = self.default_window_size;
        self.sync(self.count);
    }

    /// Check whether the window ends within `tolerance` of the newest sample.
    pub fn is_at_right_edge(&self, tolerance: f64) -> bool {
        self.window.max >= self.count as f64 - tolerance
    }

    /// Geometry for an external scrollbar.
    pub fn scrollbar(&self) -> ScrollbarModel {
        let window = (self.window.span() as usize).max(1);
        let max_value = self.count.saturating_sub(window);
        let value = match self.view {
            View::AutoFollow => max_value,
            View::Manual => (self.window.min.max(0.0) as usize).min(max_value),
        };
        ScrollbarModel {
            value,
            visible_amount: window,
            maximum: max_value + window,
            visible: self.count > window,
        }
    }

    fn apply_manual(&mut self, window: Range) {
        self.set_view(View::Manual);
        self.window = window;
        self.clamp_manual();
    }

    fn set_view(&mut self, view: View) {
        if self.view != view {
            tracing::debug!(from = ?self.view, to = ?view, "viewport mode changed");
            self.view = view;
        }
    }

    fn clamp_manual(&mut self) {
        let mut min = self.window.min.max(0.0);
        let mut max = self.window.max;
        if max < min + 1.0 {
            max = min + 1.0;
        }
        let count = self.count as f64;
        if self.count > 0 && max > count {
            let shift = max - count;
            min = (min - shift).max(0.0);
            max = count;
        }
        self.window = Range::new(min, max);
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(crate::config::PlotterConfig::default().window_size())
    }
}

fn follow_window(count: usize, window_size: usize) -> Range {
    if count == 0 {
        return Range::new(0.0, window_size as f64);
    }
    Range::new(count.saturating_sub(window_size) as f64, count as f64)
}

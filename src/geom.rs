//! Geometric primitives handed to renderers.

/// A point in data space.
///
/// `x` is a (possibly fractional) sample index, `y` the series value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Sample index.
    pub x: f64,
    /// Series value.
    pub y: f64,
}

impl Point {
    /// Create a new data point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

//! Catmull-Rom presentation smoothing.

use crate::geom::Point;

/// Interpolated points inserted between each pair of samples.
pub const SMOOTHING_SUBDIVISIONS: usize = 3;

/// Interpolate values with a uniform Catmull-Rom spline.
///
/// Point `i` of the input sits at `x = x_offset + i`. Fewer than three values
/// are returned unchanged. Missing control points at either end repeat the
/// first or last value.
pub fn catmull_rom(values: &[f64], x_offset: f64) -> Vec<Point> {
    let raw = values
        .iter()
        .enumerate()
        .map(|(index, value)| Point::new(x_offset + index as f64, *value));
    if values.len() < 3 {
        return raw.collect();
    }

    let steps = SMOOTHING_SUBDIVISIONS + 1;
    let mut out = Vec::with_capacity((values.len() - 1) * steps + 1);
    let last = values.len() - 1;
    for segment in 0..last {
        let p0 = values[segment.saturating_sub(1)];
        let p1 = values[segment];
        let p2 = values[segment + 1];
        let p3 = values[(segment + 2).min(last)];
        let x = x_offset + segment as f64;
        out.push(Point::new(x, p1));
        for step in 1..steps {
            let t = step as f64 / steps as f64;
            out.push(Point::new(x + t, interpolate(p0, p1, p2, p3, t)));
        }
    }
    out.push(Point::new(x_offset + last as f64, values[last]));
    out
}

fn interpolate(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (2.0 * p1
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_series_pass_through() {
        let points = catmull_rom(&[1.0, 2.0], 0.0);
        assert_eq!(points, vec![Point::new(0.0, 1.0), Point::new(1.0, 2.0)]);
        assert!(catmull_rom(&[], 0.0).is_empty());
    }

    #[test]
    fn interpolates_between_samples() {
        let values = [0.0, 1.0, 4.0];
        let points = catmull_rom(&values, 0.0);
        assert_eq!(points.len(), (values.len() - 1) * (SMOOTHING_SUBDIVISIONS + 1) + 1);
        assert_eq!(points.first().unwrap().x, 0.0);
        assert_eq!(points.last().unwrap().x, 2.0);

        for point in &points {
            if point.x.fract() == 0.0 {
                assert_eq!(point.y, values[point.x as usize]);
            } else {
                assert!(point.y > 0.0 && point.y < 4.0, "{point:?}");
            }
        }
        assert!((points[2].y - 0.3125).abs() < 1e-12);
    }

    #[test]
    fn straight_line_stays_straight_inside() {
        let points = catmull_rom(&[0.0, 1.0, 2.0, 3.0], 10.0);
        let middle = &points[4..8];
        for point in middle {
            assert!((point.y - (point.x - 10.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn x_is_monotonic() {
        let points = catmull_rom(&[3.0, -1.0, 2.0, 8.0, 0.0], 5.0);
        assert!(points.windows(2).all(|pair| pair[0].x < pair[1].x));
    }
}

//! Plain geometry behind the SVG charts: scales, ticks and path strings.

use std::f64::consts::PI;

/// Drawing area inside the SVG viewBox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Frame {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            left: 56.0,
            right: 16.0,
            top: 16.0,
            bottom: 32.0,
        }
    }

    pub fn plot_width(&self) -> f64 {
        (self.width - self.left - self.right).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.top - self.bottom).max(0.0)
    }

    /// Baseline y of the plot
    pub fn baseline(&self) -> f64 {
        self.top + self.plot_height()
    }

    /// Maps `value` in `0..=max` to an SVG y coordinate
    pub fn y_of(&self, value: f64, max: f64) -> f64 {
        if max <= 0.0 {
            return self.baseline();
        }
        self.baseline() - (value.max(0.0) / max).min(1.0) * self.plot_height()
    }

    /// Horizontal slot of item `index` out of `count`: (start x, slot width)
    pub fn slot(&self, index: usize, count: usize) -> (f64, f64) {
        let width = if count == 0 {
            0.0
        } else {
            self.plot_width() / count as f64
        };
        (self.left + width * index as f64, width)
    }
}

/// Rounds `max` up to 1, 2, 2.5 or 5 times a power of ten so axis ticks land on round numbers.
pub fn nice_max(max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return 1.0;
    }
    let mut magnitude = 10f64.powi(max.log10().floor() as i32);
    if max / magnitude >= 10.0 {
        magnitude *= 10.0;
    } else if max / magnitude < 1.0 {
        magnitude /= 10.0;
    }
    let normalized = max / magnitude;
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|s| normalized <= *s + 1e-9)
        .unwrap_or(10.0);
    step * magnitude
}

/// `count + 1` evenly spaced tick values from 0 to `max`
pub fn ticks(max: f64, count: usize) -> Vec<f64> {
    let count = count.max(1);
    (0..=count).map(|i| max * i as f64 / count as f64).collect()
}

/// Point on a circle, angle in degrees clockwise from 12 o'clock
pub fn polar(cx: f64, cy: f64, r: f64, angle_deg: f64) -> (f64, f64) {
    let rad = (angle_deg - 90.0) * PI / 180.0;
    (cx + r * rad.cos(), cy + r * rad.sin())
}

/// Stroke path of an arc between two angles. A full turn is drawn as two halves
/// since a single SVG arc with equal endpoints renders nothing.
pub fn arc_path(cx: f64, cy: f64, r: f64, start_deg: f64, end_deg: f64) -> String {
    let sweep = end_deg - start_deg;
    if sweep >= 359.99 {
        let (x1, y1) = polar(cx, cy, r, 0.0);
        let (x2, y2) = polar(cx, cy, r, 180.0);
        return format!(
            "M {:.2} {:.2} A {r:.2} {r:.2} 0 1 1 {:.2} {:.2} A {r:.2} {r:.2} 0 1 1 {:.2} {:.2}",
            x1, y1, x2, y2, x1, y1
        );
    }
    let (x1, y1) = polar(cx, cy, r, start_deg);
    let (x2, y2) = polar(cx, cy, r, end_deg);
    let large_arc = if sweep > 180.0 { 1 } else { 0 };
    format!(
        "M {:.2} {:.2} A {r:.2} {r:.2} 0 {} 1 {:.2} {:.2}",
        x1, y1, large_arc, x2, y2
    )
}

/// Polyline through `points`
pub fn line_path(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, (x, y))| {
            let cmd = if i == 0 { "M" } else { "L" };
            format!("{} {:.2} {:.2}", cmd, x, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Start/end angles of each slice; non-positive values get an empty slice
pub fn slice_angles(values: &[f64]) -> Vec<(f64, f64)> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    let mut start = 0.0;
    values
        .iter()
        .map(|v| {
            let sweep = if total > 0.0 && *v > 0.0 {
                v / total * 360.0
            } else {
                0.0
            };
            let range = (start, start + sweep);
            start += sweep;
            range
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_max() {
        assert_eq!(nice_max(0.0), 1.0);
        assert_eq!(nice_max(7.0), 10.0);
        assert_eq!(nice_max(180.0), 200.0);
        assert_eq!(nice_max(230.0), 250.0);
        assert_eq!(nice_max(4_100_000.0), 5_000_000.0);
        assert_eq!(nice_max(1000.0), 1000.0);
    }

    #[test]
    fn test_y_scale() {
        let frame = Frame::new(400.0, 248.0);
        assert_eq!(frame.plot_height(), 200.0);
        assert_eq!(frame.y_of(0.0, 100.0), 216.0);
        assert_eq!(frame.y_of(100.0, 100.0), 16.0);
        assert_eq!(frame.y_of(50.0, 100.0), 116.0);
        assert_eq!(frame.y_of(10.0, 0.0), frame.baseline());
    }

    #[test]
    fn test_slices_cover_full_turn() {
        let angles = slice_angles(&[1.0, 1.0, 2.0, -5.0]);
        assert_eq!(angles[0], (0.0, 90.0));
        assert_eq!(angles[1], (90.0, 180.0));
        assert_eq!(angles[2], (180.0, 360.0));
        assert_eq!(angles[3].0, angles[3].1);
    }

    #[test]
    fn test_arc_paths() {
        assert_eq!(
            arc_path(50.0, 50.0, 40.0, 0.0, 90.0),
            "M 50.00 10.00 A 40.00 40.00 0 0 1 90.00 50.00"
        );
        // full circle needs two arc commands
        assert_eq!(arc_path(50.0, 50.0, 40.0, 0.0, 360.0).matches('A').count(), 2);
    }

    #[test]
    fn test_line_path() {
        assert_eq!(line_path(&[]), "");
        assert_eq!(line_path(&[(0.0, 1.0), (2.0, 3.5)]), "M 0.00 1.00 L 2.00 3.50");
    }
}

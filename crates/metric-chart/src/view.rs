// File: crates/metric-chart/src/view.rs
// Summary: Data extents across all lines, used to derive axis ranges.

use crate::scale::degenerate_pad;
use crate::scene::LinePrimitive;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DataBounds {
    /// Extents of every point, with 2% headroom on Y.
    /// Degenerate spans are widened; no data at all gives the unit square.
    /// The result always stays within the finite f64 range.
    pub fn from_lines(lines: &[LinePrimitive]) -> Self {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for &(x, y) in lines.iter().flat_map(|l| l.points.iter()) {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
            return Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
        }
        if (x_max - x_min).abs() < 1e-9 {
            x_max = clamp_finite(x_min + 2.0 * degenerate_pad(x_min));
        }
        if (y_max - y_min).abs() < 1e-9 {
            let pad = degenerate_pad(y_min);
            y_min = clamp_finite(y_min - pad);
            y_max = clamp_finite(y_max + pad);
        }
        // Scaled before subtracting so the span itself cannot overflow.
        let ym = y_max * 0.02 - y_min * 0.02;
        Self { x_min, x_max, y_min: clamp_finite(y_min - ym), y_max: clamp_finite(y_max + ym) }
    }
}

fn clamp_finite(v: f64) -> f64 {
    v.clamp(f64::MIN, f64::MAX)
}

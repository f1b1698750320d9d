// File: crates/metric-chart/src/scale.rs
// Summary: Linear data-to-canvas transform used for both axes.

/// Half-width used to open up a zero-length span around `v`: 0.5 for
/// ordinary values, growing with the magnitude so that `v ± pad` stays a
/// different number even near `f64::MAX`.
pub fn degenerate_pad(v: f64) -> f64 {
    (v.abs() * 1e-12).max(0.5)
}

/// Maps a data interval onto a canvas interval (in points). The canvas
/// interval may be reversed, which is how the Y axis grows upwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub d0: f64,
    pub d1: f64,
    pub r0: f32,
    pub r1: f32,
}

impl LinearScale {
    pub fn new(d0: f64, d1: f64, r0: f32, r1: f32) -> Self {
        let mut s = Self { d0, d1, r0, r1 };
        if (s.d1 - s.d0).abs() < 1e-12 {
            let widened = s.d0 + 2.0 * degenerate_pad(s.d0);
            if widened.is_finite() {
                s.d1 = widened;
            } else {
                s.d0 = s.d1 - 2.0 * degenerate_pad(s.d1);
            }
        }
        s
    }
    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        // Halved operands keep the differences finite across the whole f64 range.
        let t = (v * 0.5 - self.d0 * 0.5) / (self.d1 * 0.5 - self.d0 * 0.5);
        self.r0 + t as f32 * (self.r1 - self.r0)
    }
}

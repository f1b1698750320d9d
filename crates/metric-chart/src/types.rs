// File: crates/metric-chart/src/types.rs
// Summary: Shared units and constants (lengths, canvas size, margins).

/// Typographic points per inch. Every layout length is expressed in points.
pub const POINTS_PER_INCH: f32 = 72.0;
/// Resolution used when rasterizing (PNG/JPEG).
pub const DEFAULT_DPI: f32 = 96.0;

/// A physical length, stored in points (1/72 inch).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Length(pub f32);

impl Length {
    pub const fn points(pt: f32) -> Self {
        Self(pt)
    }

    pub fn inches(v: f32) -> Self {
        Self(v * POINTS_PER_INCH)
    }

    pub fn cm(v: f32) -> Self {
        Self::inches(v / 2.54)
    }

    pub fn mm(v: f32) -> Self {
        Self::cm(v / 10.0)
    }

    /// Value in points.
    pub const fn pt(self) -> f32 {
        self.0
    }

    /// Device pixels at `dpi`, rounded to the nearest whole pixel.
    pub fn to_pixels(self, dpi: f32) -> i32 {
        (self.0 * dpi / POINTS_PER_INCH).round() as i32
    }
}

/// Default canvas width (24 cm).
pub fn default_width() -> Length {
    Length::cm(24.0)
}

/// Default canvas height (20 cm).
pub fn default_height() -> Length {
    Length::cm(20.0)
}

/// Margins around the drawable area, in points.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Same inset on all four sides; negative lengths clamp to zero.
    pub fn uniform(margin: Length) -> Self {
        let m = margin.pt().max(0.0);
        Self::new(m, m, m, m)
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::uniform(Length::mm(6.0))
    }
}

// File: crates/metric-chart/src/geometry.rs
// Summary: Lightweight rectangle helpers for layout math (points, y grows downwards).

use crate::types::Insets;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn from_wh(width: f32, height: f32) -> Self {
        Self::from_ltrb(0.0, 0.0, width, height)
    }
    pub fn center_x(&self) -> f32 { (self.left + self.right) * 0.5 }

    /// Shrink by `insets`; never inverts.
    pub fn inset(&self, insets: &Insets) -> Self {
        let left = self.left + insets.left;
        let top = self.top + insets.top;
        Self {
            left,
            top,
            right: (self.right - insets.right).max(left),
            bottom: (self.bottom - insets.bottom).max(top),
        }
    }
}

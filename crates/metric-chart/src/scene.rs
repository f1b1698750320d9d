// File: crates/metric-chart/src/scene.rs
// Summary: Backend-independent description of one composed chart.

use skia_safe as skia;

use crate::axis::Axis;
use crate::legend::LegendEntry;
use crate::theme::Theme;
use crate::types::Length;

/// Which face a piece of text is set in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextRole {
    /// Bold heading face.
    Title,
    /// Regular face for ticks and legend.
    Body,
}

/// One series drawn as a polyline in data coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct LinePrimitive {
    pub series_index: usize,
    pub color: skia::Color,
    pub width: Length,
    pub points: Vec<(f64, f64)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    /// How far the legend is raised above the plot area's top edge.
    pub y_offset: Length,
}

impl Legend {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything a backend needs to draw: sizes, text, axes, lines and legend.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: Length,
    pub height: Length,
    pub margin: Length,
    pub title: String,
    pub title_size: Length,
    pub title_padding: Length,
    pub text_size: Length,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub lines: Vec<LinePrimitive>,
    pub legend: Legend,
    pub theme: Theme,
    pub grid: bool,
}

impl Scene {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn legend_entries(&self) -> &[LegendEntry] {
        &self.legend.entries
    }

    /// Font size in points for `role`.
    pub fn text_size_for(&self, role: TextRole) -> f32 {
        match role {
            TextRole::Title => self.title_size.pt(),
            TextRole::Body => self.text_size.pt(),
        }
    }
}

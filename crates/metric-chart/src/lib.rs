// File: crates/metric-chart/src/lib.rs
// Summary: Core library entry point; builds time-series line charts and encodes them to image bytes.

pub mod axis;
pub mod backend;
pub mod chart;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod legend;
pub mod palette;
pub mod scale;
pub mod scene;
pub mod series;
pub mod text;
pub mod theme;
pub mod types;
pub mod view;

use std::path::Path;

pub use axis::{Axis, Tick};
pub use backend::{ImageFormat, RenderBackend, SkiaBackend};
pub use chart::{Chart, ChartBuilder, ChartConfig};
pub use error::{ChartError, ErrorKind, Result};
pub use legend::{LabelExtractor, LegendEntry};
pub use palette::Palette;
pub use scene::{LinePrimitive, Scene};
pub use series::{Sample, Series, SeriesLabel};
pub use theme::Theme;
pub use types::Length;

/// Build a chart with the default configuration.
pub fn build_chart(series: &[Series], title: &str, format: &str) -> Result<Chart> {
    ChartBuilder::new(ChartConfig::default())?.build(series, title, format)
}

/// Build a chart with the default configuration and write it to `path`.
pub fn build_chart_to_path(series: &[Series], title: &str, format: &str, path: impl AsRef<Path>) -> Result<()> {
    ChartBuilder::new(ChartConfig::default())?.build_to_path(series, title, format, path)
}

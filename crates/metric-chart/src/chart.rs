// File: crates/metric-chart/src/chart.rs
// Summary: ChartBuilder pipeline (parse, color, legend, compose, encode) and the encoded Chart artifact.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use log::{debug, trace};

use crate::axis::{Axis, DEFAULT_TIME_FORMAT};
use crate::backend::{ImageFormat, RenderBackend, SkiaBackend};
use crate::error::{ChartError, Result};
use crate::legend::{derive_entries, LabelExtractor, DEFAULT_LABEL_PATTERN};
use crate::palette::{Palette, DEFAULT_PALETTE, DEFAULT_PALETTE_SIZE};
use crate::scene::{Legend, LinePrimitive, Scene};
use crate::series::Series;
use crate::text::{default_text_families, default_title_families};
use crate::theme::Theme;
use crate::types::{default_height, default_width, Length, DEFAULT_DPI};
use crate::view::DataBounds;

/// Layout, styling and labelling knobs. `Default` gives the standard chart.
#[derive(Clone, Debug)]
pub struct ChartConfig {
    pub width: Length,
    pub height: Length,
    pub margin: Length,
    pub title_size: Length,
    pub title_padding: Length,
    pub text_size: Length,
    /// Legend is raised this far above the plot area's top edge.
    pub legend_offset: Length,
    pub line_width: Length,
    /// Resolution for raster formats; vector formats ignore it.
    pub dpi: f32,
    pub theme: Theme,
    pub grid: bool,
    pub palette: String,
    pub palette_size: usize,
    pub title_fonts: Vec<String>,
    pub text_fonts: Vec<String>,
    /// Regex whose first capture group becomes the legend text.
    pub label_pattern: String,
    /// strftime pattern for X tick labels (UTC).
    pub time_format: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin: Length::mm(6.0),
            title_size: Length::cm(1.0),
            title_padding: Length::cm(2.0),
            text_size: Length::mm(3.0),
            legend_offset: Length::mm(15.0),
            line_width: Length::points(1.0),
            dpi: DEFAULT_DPI,
            theme: Theme::light(),
            grid: true,
            palette: DEFAULT_PALETTE.to_string(),
            palette_size: DEFAULT_PALETTE_SIZE,
            title_fonts: default_title_families(),
            text_fonts: default_text_families(),
            label_pattern: DEFAULT_LABEL_PATTERN.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl ChartConfig {
    pub fn with_label_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.label_pattern = pattern.into();
        self
    }

    pub fn with_palette(mut self, name: impl Into<String>, size: usize) -> Self {
        self.palette = name.into();
        self.palette_size = size;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    fn validate(&self) -> Result<()> {
        let invalid = |field: &'static str, reason: &str| Err(ChartError::InvalidConfig { field, reason: reason.to_string() });
        if !(self.dpi > 0.0) {
            return invalid("dpi", "must be positive");
        }
        if !(self.width.pt() > 0.0 && self.height.pt() > 0.0) {
            return invalid("canvas size", "width and height must be positive");
        }
        if StrftimeItems::new(&self.time_format).any(|item| matches!(item, Item::Error)) {
            return invalid("time format", "unrecognized strftime specifier");
        }
        Ok(())
    }
}

/// Builds charts with one frozen configuration. Holds no per-call state, so
/// one builder can serve any number of independent calls.
#[derive(Clone, Debug)]
pub struct ChartBuilder {
    config: ChartConfig,
    extractor: LabelExtractor,
}

impl ChartBuilder {
    pub fn new(config: ChartConfig) -> Result<Self> {
        config.validate()?;
        let extractor = LabelExtractor::new(&config.label_pattern)?;
        debug!("chart builder ready: palette {} x{}, legend pattern {:?}", config.palette, config.palette_size, extractor.as_str());
        Ok(Self { config, extractor })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Compose and encode `series` with the Skia backend.
    /// Format, fonts and palette are checked before any series is touched.
    pub fn build(&self, series: &[Series], title: &str, format: &str) -> Result<Chart> {
        let format: ImageFormat = format.parse()?;
        let backend = SkiaBackend::new(&self.config)?;
        self.build_with(&backend, series, title, format)
    }

    /// Same as [`build`](Self::build) with a caller-supplied backend.
    pub fn build_with(&self, backend: &dyn RenderBackend, series: &[Series], title: &str, format: ImageFormat) -> Result<Chart> {
        let scene = self.compose(series, title)?;
        let bytes = backend.encode(&scene, format)?;
        debug!("encoded {} chart: {} bytes, {} lines", format, bytes.len(), scene.line_count());
        Ok(Chart { format, bytes, scene })
    }

    /// Build, then write to `path` (created or truncated). Nothing is
    /// written when the build fails.
    pub fn build_to_path(&self, series: &[Series], title: &str, format: &str, path: impl AsRef<Path>) -> Result<()> {
        let chart = self.build(series, title, format)?;
        let path = path.as_ref();
        let sink_failed = |source: io::Error| ChartError::SinkWriteFailed { path: path.to_path_buf(), source };
        let mut file = File::create(path).map_err(sink_failed)?;
        chart.write_to(&mut file).map_err(sink_failed)?;
        file.flush().map_err(sink_failed)?;
        debug!("wrote {} bytes to {}", chart.len(), path.display());
        Ok(())
    }

    /// Turn series into a backend-independent [`Scene`].
    pub fn compose(&self, series: &[Series], title: &str) -> Result<Scene> {
        let palette = Palette::resolve(&self.config.palette, self.config.palette_size)?;
        debug!("composing {} series with palette {} ({} colors)", series.len(), palette.name(), palette.len());

        let mut lines = Vec::with_capacity(series.len());
        for (index, s) in series.iter().enumerate() {
            let points = s.points()?;
            trace!("series #{index} {}: {} points", s.label, points.len());
            lines.push(LinePrimitive {
                series_index: index,
                color: palette.color(index),
                width: self.config.line_width,
                points,
            });
        }

        let entries = derive_entries(&self.extractor, series, &palette);
        let bounds = DataBounds::from_lines(&lines);
        Ok(Scene {
            width: self.config.width,
            height: self.config.height,
            margin: self.config.margin,
            title: title.to_string(),
            title_size: self.config.title_size,
            title_padding: self.config.title_padding,
            text_size: self.config.text_size,
            x_axis: Axis::time(bounds.x_min, bounds.x_max, &self.config.time_format),
            y_axis: Axis::value(bounds.y_min, bounds.y_max),
            lines,
            legend: Legend { entries, y_offset: self.config.legend_offset },
            theme: self.config.theme,
            grid: self.config.grid,
        })
    }
}

/// An encoded chart. Owns its bytes; persisting them is up to the caller.
#[derive(Clone, Debug)]
pub struct Chart {
    format: ImageFormat,
    bytes: Vec<u8>,
    scene: Scene,
}

impl Chart {
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// The scene the bytes were rendered from.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the encoded bytes to `sink`, returning how many were written.
    pub fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<u64> {
        sink.write_all(&self.bytes)?;
        Ok(self.bytes.len() as u64)
    }
}

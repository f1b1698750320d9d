// File: crates/metric-chart/src/backend.rs
// Summary: Output formats and the Skia backend that draws a Scene onto raster, SVG or PDF canvases.

use std::fmt;
use std::str::FromStr;

use log::debug;
use skia_safe as skia;

use crate::chart::ChartConfig;
use crate::error::{ChartError, Result};
use crate::layout::{Layout, LegendLayout, LABEL_GAP, LEGEND_SWATCH, TICK_LENGTH};
use crate::scene::{Scene, TextRole};
use crate::text::TextShaper;
use crate::types::{Length, POINTS_PER_INCH};

/// Encodings a chart can be written in. Tokens are case-sensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Svg,
    Pdf,
}

impl ImageFormat {
    pub fn token(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
        }
    }

    /// Leading bytes every encoding of this format starts with.
    pub fn signature(&self) -> &'static [u8] {
        match self {
            ImageFormat::Png => &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'],
            ImageFormat::Jpeg => &[0xff, 0xd8, 0xff],
            ImageFormat::Svg => b"<?xml",
            ImageFormat::Pdf => b"%PDF-",
        }
    }

    pub fn is_raster(&self) -> bool {
        matches!(self, ImageFormat::Png | ImageFormat::Jpeg)
    }
}

impl FromStr for ImageFormat {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "svg" => Ok(ImageFormat::Svg),
            "pdf" => Ok(ImageFormat::Pdf),
            other => Err(ChartError::UnsupportedFormat { format: other.to_string() }),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Turns a composed scene into encoded bytes.
pub trait RenderBackend {
    fn encode(&self, scene: &Scene, format: ImageFormat) -> Result<Vec<u8>>;
}

/// Skia CPU raster surfaces for PNG/JPEG, the SVG canvas, and the PDF document backend.
pub struct SkiaBackend {
    shaper: TextShaper,
    dpi: f32,
}

impl SkiaBackend {
    /// Resolves fonts immediately so a missing face fails before any drawing.
    pub fn new(config: &ChartConfig) -> Result<Self> {
        let shaper = TextShaper::new(&config.title_fonts, &config.text_fonts)?;
        Ok(Self { shaper, dpi: config.dpi })
    }

    fn encode_raster(&self, scene: &Scene, layout: &Layout, format: ImageFormat) -> Result<Vec<u8>> {
        let failed = |reason: &str| ChartError::CanvasCreationFailed { format: format.to_string(), reason: reason.to_string() };
        let size = (scene.width.to_pixels(self.dpi), scene.height.to_pixels(self.dpi));
        let mut surface = skia::surfaces::raster_n32_premul(size).ok_or_else(|| failed("failed to create raster surface"))?;
        let canvas = surface.canvas();
        let s = self.dpi / POINTS_PER_INCH;
        canvas.scale((s, s));
        self.paint(canvas, scene, layout);

        let encoded = match format {
            ImageFormat::Png => skia::EncodedImageFormat::PNG,
            _ => skia::EncodedImageFormat::JPEG,
        };
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image.encode_to_data(encoded).ok_or_else(|| failed("encoder produced no data"))?;
        Ok(data.as_bytes().to_vec())
    }

    fn encode_svg(&self, scene: &Scene, layout: &Layout) -> Vec<u8> {
        let bounds = skia::Rect::from_wh(scene.width.pt(), scene.height.pt());
        let canvas = skia::svg::Canvas::new(bounds, None);
        self.paint(&canvas, scene, layout);
        canvas.end().as_bytes().to_vec()
    }

    fn encode_pdf(&self, scene: &Scene, layout: &Layout) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let document = skia::pdf::new_document(&mut out, None);
            let mut page = document.begin_page((scene.width.pt(), scene.height.pt()), None);
            self.paint(page.canvas(), scene, layout);
            page.end_page().close();
        }
        out
    }

    /// Draws the whole scene in point coordinates.
    fn paint(&self, canvas: &skia::Canvas, scene: &Scene, layout: &Layout) {
        canvas.clear(scene.theme.background);
        if let Some(title) = &layout.title {
            let size = scene.text_size_for(TextRole::Title);
            self.shaper.draw_centered(canvas, &scene.title, title.center_x, title.top, TextRole::Title, size, scene.theme.title);
        }
        if scene.grid {
            draw_grid(canvas, scene, layout);
        }
        self.draw_axes(canvas, scene, layout);
        draw_lines(canvas, scene, layout);
        if let Some(legend) = &layout.legend {
            self.draw_legend(canvas, scene, legend);
        }
    }

    fn draw_axes(&self, canvas: &skia::Canvas, scene: &Scene, layout: &Layout) {
        let p = &layout.plot;
        let mut axis_paint = skia::Paint::default();
        axis_paint.set_color(scene.theme.axis_line);
        axis_paint.set_anti_alias(true);
        axis_paint.set_stroke_width(0.5);

        // X and Y axis lines
        canvas.draw_line((p.left, p.bottom), (p.right, p.bottom), &axis_paint);
        canvas.draw_line((p.left, p.top), (p.left, p.bottom), &axis_paint);

        let size = scene.text_size_for(TextRole::Body);
        let color = scene.theme.tick_label;
        for tick in &scene.x_axis.ticks {
            let x = layout.x_scale.to_px(tick.value);
            canvas.draw_line((x, p.bottom), (x, p.bottom + TICK_LENGTH), &axis_paint);
            let top = p.bottom + TICK_LENGTH + LABEL_GAP;
            self.shaper.draw_centered(canvas, &tick.label, x, top, TextRole::Body, size, color);
        }
        for tick in &scene.y_axis.ticks {
            let y = layout.y_scale.to_px(tick.value);
            canvas.draw_line((p.left - TICK_LENGTH, y), (p.left, y), &axis_paint);
            let right = p.left - TICK_LENGTH - LABEL_GAP;
            // Center the label's single line on the tick.
            self.shaper.draw_right(canvas, &tick.label, right, y - size * 0.6, TextRole::Body, size, color);
        }
    }

    fn draw_legend(&self, canvas: &skia::Canvas, scene: &Scene, legend: &LegendLayout) {
        let size = scene.text_size_for(TextRole::Body);
        let mut stroke = skia::Paint::default();
        stroke.set_anti_alias(true);
        stroke.set_style(skia::paint::Style::Stroke);
        for (i, entry) in scene.legend.entries.iter().enumerate() {
            let top = legend.row_top(i);
            let mid = top + legend.row_height * 0.5;
            let width = scene
                .lines
                .get(entry.series_index)
                .map_or(Length::points(1.0), |l| l.width);
            stroke.set_color(entry.color);
            stroke.set_stroke_width(width.pt());
            canvas.draw_line((legend.left, mid), (legend.left + LEGEND_SWATCH, mid), &stroke);
            self.shaper.draw_left(canvas, &entry.text, legend.text_left, top, TextRole::Body, size, scene.theme.legend_text);
        }
    }
}

impl RenderBackend for SkiaBackend {
    fn encode(&self, scene: &Scene, format: ImageFormat) -> Result<Vec<u8>> {
        let layout = Layout::compute(scene, &self.shaper);
        debug!("plot area {:?} for {} canvas", layout.plot, format);
        let bytes = if format.is_raster() {
            self.encode_raster(scene, &layout, format)?
        } else if format == ImageFormat::Svg {
            self.encode_svg(scene, &layout)
        } else {
            self.encode_pdf(scene, &layout)
        };
        if bytes.is_empty() {
            return Err(ChartError::CanvasCreationFailed {
                format: format.to_string(),
                reason: "backend produced no bytes".to_string(),
            });
        }
        Ok(bytes)
    }
}

// ---- helpers ----------------------------------------------------------------

fn draw_grid(canvas: &skia::Canvas, scene: &Scene, layout: &Layout) {
    let p = &layout.plot;
    let mut paint = skia::Paint::default();
    paint.set_color(scene.theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(0.5);

    // verticals
    for tick in &scene.x_axis.ticks {
        let x = layout.x_scale.to_px(tick.value);
        canvas.draw_line((x, p.top), (x, p.bottom), &paint);
    }
    // horizontals
    for tick in &scene.y_axis.ticks {
        let y = layout.y_scale.to_px(tick.value);
        canvas.draw_line((p.left, y), (p.right, y), &paint);
    }
}

fn draw_lines(canvas: &skia::Canvas, scene: &Scene, layout: &Layout) {
    let p = &layout.plot;
    canvas.save();
    canvas.clip_rect(skia::Rect::from_ltrb(p.left, p.top, p.right, p.bottom), skia::ClipOp::Intersect, true);

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_join(skia::paint::Join::Round);

    for line in &scene.lines {
        let data = &line.points;
        if data.len() < 2 {
            continue;
        }
        let mut path = skia::Path::new();
        let (x0, y0) = data[0];
        path.move_to((layout.x_scale.to_px(x0), layout.y_scale.to_px(y0)));
        for &(x, y) in data.iter().skip(1) {
            path.line_to((layout.x_scale.to_px(x), layout.y_scale.to_px(y)));
        }
        stroke.set_color(line.color);
        stroke.set_stroke_width(line.width.pt());
        canvas.draw_path(&path, &stroke);
    }
    canvas.restore();
}

// File: crates/metric-chart/src/text.rs
// Summary: Text shaper/renderer on Skia textlayout; resolves the title and body faces up front.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};
use skia::FontStyle;

use crate::error::{ChartError, Result};
use crate::layout::TextMeasure;
use crate::scene::TextRole;

/// Heading face preference, most wanted first.
pub fn default_title_families() -> Vec<String> {
    ["Helvetica", "Arial", "Segoe UI", "Roboto", "DejaVu Sans", "Liberation Sans", "sans-serif"]
        .map(String::from)
        .to_vec()
}

/// Tick and legend face preference.
pub fn default_text_families() -> Vec<String> {
    default_title_families()
}

pub struct TextShaper {
    fonts: FontCollection,
    title_families: Vec<String>,
    text_families: Vec<String>,
}

impl TextShaper {
    /// Fails with `FontUnavailable` when neither the requested families nor
    /// the system default can supply a face.
    pub fn new(title_families: &[String], text_families: &[String]) -> Result<Self> {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        ensure_face(&mut fc, title_families, FontStyle::bold())?;
        ensure_face(&mut fc, text_families, FontStyle::normal())?;
        Ok(Self {
            fonts: fc,
            title_families: title_families.to_vec(),
            text_families: text_families.to_vec(),
        })
    }

    fn make_style(&self, role: TextRole, size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        match role {
            TextRole::Title => {
                ts.set_font_families(self.title_families.as_slice());
                ts.set_font_style(FontStyle::bold());
            }
            TextRole::Body => {
                ts.set_font_families(self.text_families.as_slice());
                ts.set_font_style(FontStyle::normal());
            }
        }
        ts
    }

    /// Lay out `text`; every line is centered on the paragraph's own width.
    pub fn layout(&self, text: &str, role: TextRole, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Center);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&self.make_style(role, size, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        // Shrink to the widest line so alignment is relative to the text itself.
        let width = paragraph.max_intrinsic_width().ceil() + 1.0;
        paragraph.layout(width);
        paragraph
    }

    /// Draw with the top edge at `top`, horizontally centered on `center_x`.
    pub fn draw_centered(&self, canvas: &skia::Canvas, text: &str, center_x: f32, top: f32, role: TextRole, size: f32, color: skia::Color) {
        let mut p = self.layout(text, role, size, color);
        let w = p.max_width();
        p.paint(canvas, (center_x - w * 0.5, top));
    }

    /// Draw with the top-left corner at (`x`, `top`).
    pub fn draw_left(&self, canvas: &skia::Canvas, text: &str, x: f32, top: f32, role: TextRole, size: f32, color: skia::Color) {
        let mut p = self.layout(text, role, size, color);
        p.paint(canvas, (x, top));
    }

    /// Draw with the top-right corner at (`right`, `top`).
    pub fn draw_right(&self, canvas: &skia::Canvas, text: &str, right: f32, top: f32, role: TextRole, size: f32, color: skia::Color) {
        let mut p = self.layout(text, role, size, color);
        let w = p.max_intrinsic_width();
        p.paint(canvas, (right - w, top));
    }
}

impl TextMeasure for TextShaper {
    fn measure(&self, text: &str, role: TextRole, size: f32) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }
        let p = self.layout(text, role, size, skia::Color::from_argb(0, 0, 0, 0));
        (p.max_intrinsic_width(), p.height())
    }
}

fn ensure_face(fc: &mut FontCollection, families: &[String], style: FontStyle) -> Result<()> {
    if !fc.find_typefaces(families, style).is_empty() {
        return Ok(());
    }
    log::debug!("no face among {families:?}, trying system default");
    match skia::FontMgr::default().legacy_make_typeface(None, style) {
        Some(_) => Ok(()),
        None => Err(ChartError::FontUnavailable { families: families.to_vec() }),
    }
}

// File: crates/metric-chart/src/layout.rs
// Summary: Places title, plot area, tick labels and legend on the canvas, in points.

use crate::geometry::Rect;
use crate::scale::LinearScale;
use crate::scene::{Scene, TextRole};
use crate::types::Insets;

/// Length of axis tick marks.
pub const TICK_LENGTH: f32 = 4.0;
/// Space between a tick mark and its label.
pub const LABEL_GAP: f32 = 2.0;
/// Length of the colored line sample in front of each legend entry.
pub const LEGEND_SWATCH: f32 = 20.0;
/// Space between swatch and legend text.
pub const LEGEND_GAP: f32 = 4.0;

/// Text metrics provider; the backend answers with its real fonts.
pub trait TextMeasure {
    /// Width and height in points of `text`, which may span several lines.
    fn measure(&self, text: &str, role: TextRole, size: f32) -> (f32, f32);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TitleLayout {
    pub center_x: f32,
    pub top: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendLayout {
    pub left: f32,
    pub top: f32,
    pub row_height: f32,
    pub text_left: f32,
}

impl LegendLayout {
    /// Top edge of row `i`.
    pub fn row_top(&self, i: usize) -> f32 {
        self.top + i as f32 * self.row_height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub canvas: Rect,
    pub content: Rect,
    pub title: Option<TitleLayout>,
    pub plot: Rect,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub legend: Option<LegendLayout>,
}

impl Layout {
    pub fn compute(scene: &Scene, measure: &dyn TextMeasure) -> Self {
        let canvas = Rect::from_wh(scene.width.pt(), scene.height.pt());
        let content = canvas.inset(&Insets::uniform(scene.margin));
        let body = scene.text_size_for(TextRole::Body);

        let mut top = content.top;
        let title = if scene.title.is_empty() {
            None
        } else {
            let (_, h) = measure.measure(&scene.title, TextRole::Title, scene.text_size_for(TextRole::Title));
            top += h + scene.title_padding.pt();
            Some(TitleLayout { center_x: content.center_x(), top: content.top })
        };

        let y_label_w = scene
            .y_axis
            .ticks
            .iter()
            .map(|t| measure.measure(&t.label, TextRole::Body, body).0)
            .fold(0.0f32, f32::max);
        let (x_label_w, x_label_h) = scene
            .x_axis
            .ticks
            .iter()
            .map(|t| measure.measure(&t.label, TextRole::Body, body))
            .fold((0.0f32, 0.0f32), |(w, h), (tw, th)| (w.max(tw), h.max(th)));

        let left = content.left + y_label_w + LABEL_GAP + TICK_LENGTH;
        let right = (content.right - x_label_w * 0.5).max(left + 1.0);
        let bottom = (content.bottom - x_label_h - LABEL_GAP - TICK_LENGTH).max(top + 1.0);
        let plot = Rect::from_ltrb(left, top, right, bottom);

        let x_scale = LinearScale::new(scene.x_axis.min, scene.x_axis.max, plot.left, plot.right);
        let y_scale = LinearScale::new(scene.y_axis.min, scene.y_axis.max, plot.bottom, plot.top);

        let legend = if scene.legend.is_empty() {
            None
        } else {
            let (text_w, row_h) = scene
                .legend
                .entries
                .iter()
                .map(|e| measure.measure(&e.text, TextRole::Body, body))
                .fold((0.0f32, body), |(w, h), (tw, th)| (w.max(tw), h.max(th)));
            let left = plot.right - (LEGEND_SWATCH + LEGEND_GAP + text_w);
            Some(LegendLayout {
                left,
                top: plot.top - scene.legend.y_offset.pt(),
                row_height: row_h,
                text_left: left + LEGEND_SWATCH + LEGEND_GAP,
            })
        };

        Self { canvas, content, title, plot, x_scale, y_scale, legend }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{Axis, DEFAULT_TIME_FORMAT};
    use crate::legend::LegendEntry;
    use crate::scene::Legend;
    use crate::theme::Theme;
    use crate::types::{default_height, default_width, Length};
    use skia_safe::Color;

    /// Half an em per character, 1.2 em per line.
    struct FixedMeasure;

    impl TextMeasure for FixedMeasure {
        fn measure(&self, text: &str, _role: TextRole, size: f32) -> (f32, f32) {
            let lines = text.lines().count().max(1) as f32;
            let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0) as f32;
            (widest * size * 0.5, lines * size * 1.2)
        }
    }

    fn scene(title: &str, legend: Vec<LegendEntry>) -> Scene {
        Scene {
            width: default_width(),
            height: default_height(),
            margin: Length::mm(6.0),
            title: title.to_string(),
            title_size: Length::cm(1.0),
            title_padding: Length::cm(2.0),
            text_size: Length::mm(3.0),
            x_axis: Axis::time(1_700_000_000.0, 1_700_003_600.0, DEFAULT_TIME_FORMAT),
            y_axis: Axis::value(0.0, 100.0),
            lines: Vec::new(),
            legend: Legend { entries: legend, y_offset: Length::mm(15.0) },
            theme: Theme::light(),
            grid: true,
        }
    }

    #[test]
    fn plot_sits_inside_margins_below_title() {
        let s = scene("Load", Vec::new());
        let l = Layout::compute(&s, &FixedMeasure);
        let (c, p) = (l.content, l.plot);
        assert!(p.left >= c.left && p.right <= c.right && p.top >= c.top && p.bottom <= c.bottom);
        let title_h = 1.2 * Length::cm(1.0).pt();
        let expected_top = l.content.top + title_h + Length::cm(2.0).pt();
        assert!((l.plot.top - expected_top).abs() < 1e-3);
        assert_eq!(l.title.map(|t| t.top), Some(l.content.top));
        assert!((l.content.left - Length::mm(6.0).pt()).abs() < 1e-4);
    }

    #[test]
    fn untitled_chart_starts_at_margin() {
        let l = Layout::compute(&scene("", Vec::new()), &FixedMeasure);
        assert!(l.title.is_none());
        assert_eq!(l.plot.top, l.content.top);
    }

    #[test]
    fn scales_span_plot_area() {
        let s = scene("t", Vec::new());
        let l = Layout::compute(&s, &FixedMeasure);
        assert_eq!(l.x_scale.to_px(s.x_axis.min), l.plot.left);
        assert!((l.x_scale.to_px(s.x_axis.max) - l.plot.right).abs() < 1e-3);
        assert_eq!(l.y_scale.to_px(s.y_axis.min), l.plot.bottom);
        assert!((l.y_scale.to_px(s.y_axis.max) - l.plot.top).abs() < 1e-3);
    }

    #[test]
    fn legend_is_raised_above_plot_top_and_right_aligned() {
        let entries = vec![
            LegendEntry { series_index: 0, text: "api".into(), color: Color::RED },
            LegendEntry { series_index: 1, text: "database".into(), color: Color::BLUE },
        ];
        let s = scene("t", entries);
        let l = Layout::compute(&s, &FixedMeasure);
        let legend = l.legend.expect("legend laid out");
        assert!((legend.top - (l.plot.top - Length::mm(15.0).pt())).abs() < 1e-3);
        let text_w = 8.0 * s.text_size.pt() * 0.5;
        assert!((legend.text_left + text_w - l.plot.right).abs() < 1e-3);
        assert!(legend.row_top(1) > legend.row_top(0));
        // Clears the title band.
        let title_bottom = l.content.top + 1.2 * s.title_size.pt();
        assert!(legend.top > title_bottom);
    }

    #[test]
    fn no_entries_no_legend_box() {
        let l = Layout::compute(&scene("t", Vec::new()), &FixedMeasure);
        assert!(l.legend.is_none());
    }
}

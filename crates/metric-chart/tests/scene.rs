// File: crates/metric-chart/tests/scene.rs
// Purpose: Scene-level properties (colors, legend, empty input, bad values) without touching fonts.

use std::cell::Cell;

use metric_chart::layout::{Layout, TextMeasure};
use metric_chart::palette::Palette;
use metric_chart::scene::TextRole;
use metric_chart::{
    ChartBuilder, ChartConfig, ErrorKind, ImageFormat, RenderBackend, Result, Scene, Series, SeriesLabel,
};

/// Backend that never draws; counts how often it was asked to encode.
#[derive(Default)]
struct StubBackend {
    calls: Cell<usize>,
}

impl RenderBackend for StubBackend {
    fn encode(&self, scene: &Scene, format: ImageFormat) -> Result<Vec<u8>> {
        self.calls.set(self.calls.get() + 1);
        let mut out = format.signature().to_vec();
        out.push(scene.line_count() as u8);
        Ok(out)
    }
}

/// Every glyph is half the font size wide; lines are one font size high.
struct FixedMeasure;

impl TextMeasure for FixedMeasure {
    fn measure(&self, text: &str, _role: TextRole, size: f32) -> (f32, f32) {
        let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        (widest as f32 * size * 0.5, text.lines().count() as f32 * size)
    }
}

fn series(name: &str, instance: &str, values: &[&str]) -> Series {
    let label = SeriesLabel::metric(name).with("instance", instance);
    Series::from_pairs(label, values.iter().enumerate().map(|(i, v)| (1_700_000_000 + 60 * i as i64, *v)))
}

fn many(n: usize) -> Vec<Series> {
    (0..n).map(|i| series("cpu", &format!("host-{i}"), &["1", "2", "3"])).collect()
}

fn builder() -> ChartBuilder {
    ChartBuilder::new(ChartConfig::default()).expect("default config is valid")
}

#[test]
fn colors_follow_position_modulo_palette() {
    let scene = builder().compose(&many(20), "CPU").expect("compose");
    let palette = Palette::resolve("Dark2", 8).unwrap();
    for (i, line) in scene.lines.iter().enumerate() {
        assert_eq!(line.series_index, i);
        assert_eq!(line.color, palette.colors()[i % 8]);
    }
    assert_eq!(scene.lines[1].color, scene.lines[9].color);
    assert_eq!(scene.lines[1].color, scene.lines[17].color);
    assert_ne!(scene.lines[1].color, scene.lines[2].color);
}

#[test]
fn legend_color_matches_its_line() {
    let scene = builder().compose(&many(10), "CPU").unwrap();
    for entry in scene.legend_entries() {
        assert_eq!(entry.color, scene.lines[entry.series_index].color);
    }
}

#[test]
fn legend_only_for_multiple_series() {
    let b = builder();
    let one = b.compose(&many(1), "one").unwrap();
    assert_eq!(one.line_count(), 1);
    assert!(one.legend_entries().is_empty());

    let two = b.compose(&many(2), "two").unwrap();
    assert_eq!(two.legend_entries().len(), 2);
    assert_eq!(two.legend_entries()[0].text, r#"cpu{instance="host-0"}"#);
}

#[test]
fn unmatched_labels_keep_their_lines() {
    let config = ChartConfig::default().with_label_pattern(r#"instance="(host-[02])""#);
    let scene = ChartBuilder::new(config).unwrap().compose(&many(4), "t").unwrap();
    assert_eq!(scene.line_count(), 4);
    let texts: Vec<_> = scene.legend_entries().iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["host-0", "host-2"]);
}

#[test]
fn non_numeric_value_aborts_build() {
    let backend = StubBackend::default();
    let set = vec![series("a", "x", &["1", "2"]), series("b", "y", &["3", "abc"])];
    let err = builder().build_with(&backend, &set, "bad", ImageFormat::Png).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSampleValue);
    assert!(err.to_string().contains("abc"));
    assert_eq!(backend.calls.get(), 0, "nothing should reach the backend");
}

#[test]
fn infinite_value_cannot_become_a_line() {
    let backend = StubBackend::default();
    let set = vec![series("a", "x", &["1", "+Inf"])];
    let err = builder().build_with(&backend, &set, "inf", ImageFormat::Png).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GeometryConstructionFailed);
}

#[test]
fn empty_set_still_builds() {
    let backend = StubBackend::default();
    let chart = builder().build_with(&backend, &[], "Empty", ImageFormat::Png).expect("empty chart");
    assert_eq!(chart.scene().line_count(), 0);
    assert!(chart.scene().legend_entries().is_empty());
    assert_eq!(chart.scene().title, "Empty");
    assert!(!chart.scene().x_axis.ticks.is_empty());
    assert!(!chart.scene().y_axis.ticks.is_empty());
    assert!(chart.as_bytes().starts_with(ImageFormat::Png.signature()));
    assert_eq!(backend.calls.get(), 1);
}

#[test]
fn axes_cover_all_samples() {
    let set = vec![series("a", "x", &["-5", "10"]), series("b", "y", &["2", "40", "7"])];
    let scene = builder().compose(&set, "range").unwrap();
    assert_eq!(scene.x_axis.min, 1_700_000_000.0);
    assert_eq!(scene.x_axis.max, 1_700_000_120.0);
    assert!(scene.y_axis.min <= -5.0 && scene.y_axis.max >= 40.0);
}

#[test]
fn unknown_palette_fails_before_parsing() {
    let config = ChartConfig::default().with_palette("Nope", 8);
    let set = vec![series("a", "x", &["abc"])];
    let err = ChartBuilder::new(config).unwrap().compose(&set, "t").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PaletteUnavailable);
}

#[test]
fn same_input_same_scene() {
    let b = builder();
    assert_eq!(b.compose(&many(9), "t").unwrap(), b.compose(&many(9), "t").unwrap());
}

fn assert_drawable(scene: &Scene) {
    let y = &scene.y_axis;
    assert!(y.min.is_finite() && y.max.is_finite() && y.min < y.max, "y range [{}, {}]", y.min, y.max);
    assert!(y.ticks.len() <= 24);
    for tick in &y.ticks {
        assert!(tick.value >= y.min && tick.value <= y.max, "tick {} outside [{}, {}]", tick.value, y.min, y.max);
    }
    let layout = Layout::compute(scene, &FixedMeasure);
    for line in &scene.lines {
        for &(x, v) in &line.points {
            assert!(layout.x_scale.to_px(x).is_finite());
            assert!(layout.y_scale.to_px(v).is_finite(), "{v} maps to a non-finite coordinate");
        }
    }
    for tick in &y.ticks {
        assert!(layout.y_scale.to_px(tick.value).is_finite());
    }
}

#[test]
fn values_near_f64_limits_compose() {
    let b = builder();
    for values in [["0", "1.79e308"], ["-1e308", "1e308"]] {
        let scene = b.compose(&[series("big", "x", &values)], "big").expect("finite values compose");
        assert!(!scene.y_axis.ticks.is_empty());
        assert_drawable(&scene);
    }
}

#[test]
fn large_constant_series_is_widened() {
    let scene = builder().compose(&[series("flat", "x", &["1e300", "1e300", "1e300"])], "flat").unwrap();
    assert_drawable(&scene);
}

#[test]
fn extreme_values_reach_the_backend() {
    let backend = StubBackend::default();
    let set = vec![series("a", "x", &["-1.7e308", "1.7e308"]), series("b", "y", &["1e300"])];
    let chart = builder().build_with(&backend, &set, "limits", ImageFormat::Png).expect("build");
    assert_eq!(chart.scene().line_count(), 2);
    assert_eq!(backend.calls.get(), 1);
}

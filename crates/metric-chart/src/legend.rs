// File: crates/metric-chart/src/legend.rs
// Summary: Legend text derivation; a configurable pattern trims each label to its useful part.

use regex::Regex;
use skia_safe as skia;

use crate::error::{ChartError, Result};
use crate::palette::Palette;
use crate::series::{Series, SeriesLabel};

/// Captures the whole rendered label.
pub const DEFAULT_LABEL_PATTERN: &str = "(.*)";

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub series_index: usize,
    pub text: String,
    pub color: skia::Color,
}

/// Pulls legend text out of a rendered [`SeriesLabel`] with the first capture group.
#[derive(Clone, Debug)]
pub struct LabelExtractor {
    pattern: Regex,
}

impl LabelExtractor {
    pub fn new(pattern: &str) -> Result<Self> {
        let invalid = |reason: String| ChartError::InvalidConfig { field: "label pattern", reason };
        let pattern = Regex::new(pattern).map_err(|e| invalid(e.to_string()))?;
        // captures_len counts the implicit whole-match group.
        if pattern.captures_len() < 2 {
            return Err(invalid(format!("{:?} has no capture group", pattern.as_str())));
        }
        Ok(Self { pattern })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// `None` when the label does not match; empty text when group 1 did not participate.
    pub fn extract(&self, label: &SeriesLabel) -> Option<String> {
        let rendered = label.to_string();
        let caps = self.pattern.captures(&rendered)?;
        Some(caps.get(1).map_or_else(String::new, |m| m.as_str().to_string()))
    }
}

/// Legend entries for `series`, colored by ordinal position.
/// A lone series gets no legend; non-matching labels are skipped.
pub fn derive_entries(extractor: &LabelExtractor, series: &[Series], palette: &Palette) -> Vec<LegendEntry> {
    if series.len() <= 1 {
        return Vec::new();
    }
    series
        .iter()
        .enumerate()
        .filter_map(|(i, s)| {
            extractor.extract(&s.label).map(|text| LegendEntry {
                series_index: i,
                text,
                color: palette.color(i),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(name: &str, job: &str) -> Series {
        Series::new(SeriesLabel::metric(name).with("job", job))
    }

    #[test]
    fn default_pattern_keeps_whole_label() {
        let x = LabelExtractor::new(DEFAULT_LABEL_PATTERN).unwrap();
        let l = SeriesLabel::metric("up").with("job", "api");
        assert_eq!(x.extract(&l).as_deref(), Some(r#"up{job="api"}"#));
    }

    #[test]
    fn first_group_trims_label() {
        let x = LabelExtractor::new(r#"job="([^"]+)""#).unwrap();
        let l = SeriesLabel::metric("up").with("job", "api");
        assert_eq!(x.extract(&l).as_deref(), Some("api"));
        assert_eq!(x.extract(&SeriesLabel::metric("up")), None);
    }

    #[test]
    fn optional_group_that_misses_gives_empty_text() {
        let x = LabelExtractor::new("up(x)?").unwrap();
        assert_eq!(x.extract(&SeriesLabel::metric("up")).as_deref(), Some(""));
    }

    #[test]
    fn pattern_without_group_is_rejected() {
        let err = LabelExtractor::new("up").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidConfig);
        assert!(LabelExtractor::new("(").is_err());
    }

    #[test]
    fn single_series_has_no_legend() {
        let x = LabelExtractor::new(DEFAULT_LABEL_PATTERN).unwrap();
        let p = Palette::resolve("Dark2", 8).unwrap();
        assert!(derive_entries(&x, &[series("a", "x")], &p).is_empty());
    }

    #[test]
    fn entries_share_series_color() {
        let x = LabelExtractor::new(r#"job="(api|db)""#).unwrap();
        let p = Palette::resolve("Dark2", 8).unwrap();
        let set = vec![series("a", "api"), series("b", "web"), series("c", "db")];
        let entries = derive_entries(&x, &set, &p);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "api");
        assert_eq!(entries[1].series_index, 2);
        assert_eq!(entries[1].color, p.color(2));
    }
}

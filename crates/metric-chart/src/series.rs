// File: crates/metric-chart/src/series.rs
// Summary: Series model: label sets, raw text samples, and parsing into plot coordinates.
// Notes:
// - Values arrive as text and are parsed on read; one bad value fails the whole chart.
// - Samples are kept in caller order, no sorting happens here.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

use chrono::{DateTime, Utc};

use crate::error::{ChartError, Result};

/// Reserved label key holding the metric name.
pub const METRIC_NAME_LABEL: &str = "__name__";

/// Ordered key/value set identifying one series (metric name plus dimensions).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesLabel {
    labels: BTreeMap<String, String>,
}

impl SeriesLabel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label set holding only a metric name.
    pub fn metric(name: impl Into<String>) -> Self {
        Self::new().with(METRIC_NAME_LABEL, name)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.get(METRIC_NAME_LABEL)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SeriesLabel {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Renders as `name{key="value", ...}`; a bare name when there are no other
/// keys, `{}` when the set is empty.
impl fmt::Display for SeriesLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name().unwrap_or("");
        let mut rest = self.labels.iter().filter(|(k, _)| k.as_str() != METRIC_NAME_LABEL).peekable();
        if rest.peek().is_none() {
            return if self.name().is_some() { f.write_str(name) } else { f.write_str("{}") };
        }
        write!(f, "{name}{{")?;
        for (i, (k, v)) in rest.enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}=")?;
            write_quoted(f, v)?;
        }
        f.write_str("}")
    }
}

/// Double-quoted value with Prometheus (Go `%q`) escapes: `\\`, `\"`, the
/// usual single-letter escapes, `\xNN` for other ASCII controls and
/// `\uNNNN` for other non-printable characters.
fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{07}' => f.write_str("\\a")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0b}' => f.write_str("\\v")?,
            '\u{0c}' => f.write_str("\\f")?,
            c if c.is_ascii_control() => write!(f, "\\x{:02x}", c as u32)?,
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// One observation: Unix timestamp in seconds and the value as received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    pub timestamp: i64,
    pub value: String,
}

impl Sample {
    pub fn new(timestamp: i64, value: impl Into<String>) -> Self {
        Self { timestamp, value: value.into() }
    }

    pub fn at(time: DateTime<Utc>, value: impl Into<String>) -> Self {
        Self::new(time.timestamp(), value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Series {
    pub label: SeriesLabel,
    pub samples: Vec<Sample>,
}

impl Series {
    pub fn new(label: SeriesLabel) -> Self {
        Self { label, samples: Vec::new() }
    }

    pub fn with_samples(label: SeriesLabel, samples: Vec<Sample>) -> Self {
        Self { label, samples }
    }

    /// Build from `(timestamp, value)` pairs.
    pub fn from_pairs<'a>(label: SeriesLabel, pairs: impl IntoIterator<Item = (i64, &'a str)>) -> Self {
        let samples = pairs.into_iter().map(|(t, v)| Sample::new(t, v)).collect();
        Self { label, samples }
    }

    pub fn push(&mut self, timestamp: i64, value: impl Into<String>) {
        self.samples.push(Sample::new(timestamp, value));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Parse every sample into an `(x, y)` point, x being seconds since the epoch.
    /// The result has exactly one point per sample, in sample order.
    pub fn points(&self) -> Result<Vec<(f64, f64)>> {
        let mut out = Vec::with_capacity(self.samples.len());
        for (i, s) in self.samples.iter().enumerate() {
            let y = parse_value(&s.value).ok_or_else(|| ChartError::InvalidSampleValue {
                series: self.label.to_string(),
                raw: s.value.clone(),
            })?;
            if !y.is_finite() {
                return Err(ChartError::GeometryConstructionFailed {
                    series: self.label.to_string(),
                    reason: format!("non-finite value {:?} at sample {i}", s.value),
                });
            }
            out.push((s.timestamp as f64, y));
        }
        Ok(out)
    }
}

/// Locale-independent decimal parse (`.` separator, optional sign/exponent).
pub fn parse_value(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok()
}

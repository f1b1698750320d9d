// File: crates/metric-chart/src/axis.rs
// Summary: Axis model with data ranges and labelled ticks (time on X, values on Y).

use std::fmt::Write;

use chrono::DateTime;

use crate::grid::{format_value, precision_for, time_ticks, value_ticks, TICK_TARGET};

/// Date on the first line, 24-hour clock on the second.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d\n%H:%M";

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<Tick>,
}

impl Axis {
    /// Time axis over Unix seconds; labels are rendered in UTC with `format`.
    pub fn time(min: f64, max: f64, format: &str) -> Self {
        let ticks = time_ticks(min, max, TICK_TARGET)
            .into_iter()
            .map(|value| Tick { value, label: format_time(value, format) })
            .collect();
        Self { min, max, ticks }
    }

    pub fn value(min: f64, max: f64) -> Self {
        let (values, step) = value_ticks(min, max, TICK_TARGET);
        let precision = precision_for(step);
        let ticks = values
            .into_iter()
            .map(|value| Tick { value, label: format_value(value, precision) })
            .collect();
        Self { min, max, ticks }
    }
}

/// Empty when the instant is out of range or `format` is malformed.
fn format_time(secs: f64, format: &str) -> String {
    let Some(t) = DateTime::from_timestamp(secs as i64, 0) else {
        return String::new();
    };
    let mut out = String::new();
    if write!(out, "{}", t.format(format)).is_err() {
        out.clear();
    }
    out
}

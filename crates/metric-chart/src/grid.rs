// File: crates/metric-chart/src/grid.rs
// Summary: Tick/grid placement helpers for value and time axes.

/// Roughly how many ticks an axis aims for.
pub const TICK_TARGET: usize = 6;

// Calendar-friendly steps for time axes, in seconds.
const TIME_STEPS: [f64; 24] = [
    1.0, 2.0, 5.0, 10.0, 15.0, 30.0,
    60.0, 120.0, 300.0, 600.0, 900.0, 1800.0,
    3600.0, 7200.0, 10_800.0, 21_600.0, 43_200.0,
    86_400.0, 172_800.0, 604_800.0, 1_209_600.0,
    2_592_000.0, 7_776_000.0, 31_536_000.0,
];

// A step that would produce more ticks than this does not fit the range.
const MAX_TICKS: f64 = (TICK_TARGET * 4) as f64;

// Tick multiples must stay exact integers in f64.
const MAX_TICK_INDEX: f64 = 9.0e15;

const DAY: f64 = 86_400.0;

/// Smallest 1/2/5 x 10^k step that splits `span` into at most `target` intervals.
pub fn nice_step(span: f64, target: usize) -> f64 {
    round_step(span / target.max(1) as f64)
}

fn round_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

/// Multiples of `step` inside `[min, max]`; empty when `step` is too fine for the range.
pub fn ticks_with_step(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !(min <= max) {
        return Vec::new();
    }
    let lo = (min / step).ceil();
    let hi = (max / step).floor();
    if !(lo.is_finite() && hi.is_finite()) || lo.abs().max(hi.abs()) > MAX_TICK_INDEX || hi - lo > MAX_TICKS {
        return Vec::new();
    }
    (lo as i64..=hi as i64)
        .map(|k| k as f64 * step)
        .filter(|v| (min..=max).contains(v))
        .collect()
}

/// Value-axis ticks on a 1/2/5 grid.
pub fn value_ticks(min: f64, max: f64, target: usize) -> (Vec<f64>, f64) {
    let target = target.max(1) as f64;
    // Divided before subtracting so ranges wider than f64::MAX still get a step.
    let step = round_step(max / target - min / target);
    (ticks_with_step(min, max, step), step)
}

/// Time-axis ticks (seconds since the epoch) on calendar-ish steps, aligned to UTC.
pub fn time_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let span = max - min;
    let target = target.max(1) as f64;
    let step = TIME_STEPS
        .iter()
        .copied()
        .find(|s| span / s <= target)
        .unwrap_or_else(|| nice_step(span / DAY, target as usize) * DAY);
    ticks_with_step(min, max, step)
}

/// Decimals needed to tell ticks `step` apart.
pub fn precision_for(step: f64) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

/// Fixed-point tick label; never prints `-0`. Huge magnitudes use exponent notation.
pub fn format_value(v: f64, precision: usize) -> String {
    if v.abs() >= 1e15 {
        return format!("{v:e}");
    }
    let s = format!("{:.*}", precision, v);
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

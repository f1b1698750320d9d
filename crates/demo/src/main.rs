// File: crates/demo/src/main.rs
// Summary: Demo loads long-format metric samples from CSV, groups them into series and writes one chart.
// Input: a header row naming `timestamp` and `value` columns; every other column is a label.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use metric_chart::series::METRIC_NAME_LABEL;
use metric_chart::{palette, theme, ChartBuilder, ChartConfig, Series, SeriesLabel};

#[derive(Debug, Parser)]
#[command(about = "Render metric samples from a CSV file into a line chart")]
struct Args {
    /// CSV file with `timestamp`, `value` and label columns.
    input: PathBuf,

    /// Output file; defaults to target/out/<input stem>.<format>.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, default_value = "Metrics")]
    title: String,

    /// png, jpg, jpeg, svg or pdf.
    #[arg(short, long, default_value = "png")]
    format: String,

    /// Regex whose first capture group becomes the legend text.
    #[arg(long)]
    label_pattern: Option<String>,

    #[arg(long, default_value = palette::DEFAULT_PALETTE)]
    palette: String,

    #[arg(long, default_value_t = palette::DEFAULT_PALETTE_SIZE)]
    palette_size: usize,

    /// light or dark.
    #[arg(long, default_value = "light")]
    theme: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let series = load_series_csv(&args.input)
        .with_context(|| format!("failed to load CSV '{}'", args.input.display()))?;
    info!("Loaded {} series from {}", series.len(), args.input.display());

    let mut config = ChartConfig::default()
        .with_palette(args.palette.as_str(), args.palette_size)
        .with_theme(theme::find(&args.theme));
    if let Some(pattern) = &args.label_pattern {
        config = config.with_label_pattern(pattern.as_str());
    }
    let builder = ChartBuilder::new(config).context("invalid chart configuration")?;

    let out = args.output.clone().unwrap_or_else(|| out_name_for(&args.input, &args.format));
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    builder
        .build_to_path(&series, &args.title, &args.format, &out)
        .with_context(|| format!("rendering {}", out.display()))?;
    info!("Wrote {}", out.display());
    Ok(())
}

/// Produce output file name like target/out/<stem>.<format>
fn out_name_for(input: &Path, format: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    PathBuf::from("target/out").join(format!("{stem}.{format}"))
}

/// Group rows into series by their label columns, in order of first appearance.
fn load_series_csv(path: &Path) -> Result<Vec<Series>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_string()).collect::<Vec<_>>();
    let idx = |names: &[&str]| headers.iter().position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)));
    let i_time = idx(&["timestamp", "time", "ts"]).context("no timestamp column")?;
    let i_value = idx(&["value", "val"]).context("no value column")?;
    let label_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != i_time && *i != i_value)
        .map(|(i, h)| (i, if h == "metric" || h == "name" { METRIC_NAME_LABEL.to_string() } else { h.clone() }))
        .collect();

    let mut out: Vec<Series> = Vec::new();
    let mut index: HashMap<SeriesLabel, usize> = HashMap::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let Some(ts) = rec.get(i_time).and_then(parse_time_to_secs) else {
            warn!("row {}: unreadable timestamp, skipped", row + 2);
            continue;
        };
        let value = rec.get(i_value).unwrap_or_default();
        let label: SeriesLabel = label_cols
            .iter()
            .filter_map(|(i, key)| rec.get(*i).filter(|v| !v.is_empty()).map(|v| (key.clone(), v.to_string())))
            .collect();
        let slot = *index.entry(label.clone()).or_insert_with(|| {
            out.push(Series::new(label));
            out.len() - 1
        });
        // Values stay as text; the chart builder parses them.
        out[slot].push(ts, value);
    }
    Ok(out)
}

/// Epoch seconds, or milliseconds when the number is too large to be seconds.
fn parse_time_to_secs(s: &str) -> Option<i64> {
    let n = s.trim().parse::<i64>().ok()?;
    if n > 10_i64.pow(12) {
        return Some(n / 1000);
    } // epoch ms -> sec
    Some(n)
}

// File: crates/metric-chart/benches/build_bench.rs
// Summary: Measures building and PNG-encoding charts of growing series counts.

use metric_chart::{ChartBuilder, ChartConfig, Series, SeriesLabel};
use criterion::{criterion_group, criterion_main, Criterion, black_box};

fn build_set(series: usize, samples: usize) -> Vec<Series> {
    (0..series)
        .map(|k| {
            let mut s = Series::new(SeriesLabel::metric("load").with("host", format!("h{k}")));
            for i in 0..samples {
                let y = (i as f64 * 0.01 + k as f64).sin() * 10.0;
                s.push(1_700_000_000 + (i as i64) * 15, y.to_string());
            }
            s
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let builder = ChartBuilder::new(ChartConfig::default()).expect("default config");
    let mut group = c.benchmark_group("build_png");
    for &n in &[1usize, 8, 32] {
        let set = build_set(n, 2_000);
        group.bench_function(format!("series_{n}"), |b| {
            b.iter(|| {
                let chart = builder.build(&set, "Load", "png").expect("build chart");
                black_box(chart.len());
            });
        });
    }
    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let builder = ChartBuilder::new(ChartConfig::default()).expect("default config");
    let set = build_set(16, 10_000);
    c.bench_function("compose_16x10k", |b| {
        b.iter(|| black_box(builder.compose(&set, "Load").expect("compose").line_count()));
    });
}

criterion_group!(benches, bench_build, bench_compose);
criterion_main!(benches);

//! Criterion benchmarks for the statistics core and a full scatter render.
//!
//! Benchmarks:
//! 1. Pearson correlation / OLS fit / R² over growing series
//! 2. Scatter panel render on the demo dataset (join + stats + scene)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use stockdash_core::data::sample::demo_dataset;
use stockdash_core::panels::scatter;
use stockdash_core::stats::{linear_fit, pearson_correlation, r_squared};
use stockdash_core::{DashboardConfig, TickerPair};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_series(n: usize) -> (Vec<f64>, Vec<f64>) {
    let xs: Vec<f64> = (0..n).map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0).collect();
    let ys: Vec<f64> = xs
        .iter()
        .enumerate()
        .map(|(i, x)| 2.0 * x + 5.0 + (i as f64 * 0.37).cos())
        .collect();
    (xs, ys)
}

// ── 1. Statistics ────────────────────────────────────────────────────

fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats");
    for n in [100usize, 1_000, 6_500] {
        let (xs, ys) = make_series(n);
        group.bench_with_input(BenchmarkId::new("pearson", n), &n, |b, _| {
            b.iter(|| pearson_correlation(black_box(&xs), black_box(&ys)))
        });
        group.bench_with_input(BenchmarkId::new("linear_fit", n), &n, |b, _| {
            b.iter(|| linear_fit(black_box(&xs), black_box(&ys)))
        });
        group.bench_with_input(BenchmarkId::new("r_squared", n), &n, |b, _| {
            b.iter(|| r_squared(black_box(&ys), black_box(&xs)))
        });
    }
    group.finish();
}

// ── 2. Scatter render ────────────────────────────────────────────────

fn bench_scatter_render(c: &mut Criterion) {
    let config = DashboardConfig::default();
    let dataset = demo_dataset(42, &config.split_dates, config.model_era_start);
    c.bench_function("scatter_render_full_extent", |b| {
        b.iter(|| scatter::render(black_box(&dataset), &config, None, TickerPair::default()))
    });
}

criterion_group!(benches, bench_stats, bench_scatter_render);
criterion_main!(benches);

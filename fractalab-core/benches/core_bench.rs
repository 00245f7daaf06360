//! Criterion benchmarks for fractalab hot paths.
//!
//! Benchmarks:
//! 1. Indicator frame build (three EMAs plus fractal marking)
//! 2. Fractal scan over a prebuilt frame
//! 3. Backtest replay of the scan's signals

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fractalab_core::domain::{Candle, MINUTE_MS};
use fractalab_core::engine::run_backtest;
use fractalab_core::indicators::{EmaSpans, IndicatorFrame};
use fractalab_core::signals::FractalSignalGenerator;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_candles(n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let close = 100.0 + i as f64 * 0.01 + (i as f64 * 0.4).sin() * 2.0;
            Candle {
                time: i as i64 * MINUTE_MS,
                open: close - 0.1,
                high: close + 0.5,
                low: close - 0.5,
                close,
                volume: 1.0 + (i % 7) as f64,
            }
        })
        .collect()
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_frame_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_build");
    for n in [10_000, 100_000] {
        let candles = make_candles(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &candles, |b, candles| {
            b.iter(|| IndicatorFrame::build(black_box(candles.clone()), &EmaSpans::default()))
        });
    }
    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let frame = IndicatorFrame::build(make_candles(100_000), &EmaSpans::default()).unwrap();
    let generator = FractalSignalGenerator::default();
    c.bench_function("fractal_scan_100k", |b| {
        b.iter(|| generator.scan(black_box(&frame)))
    });
}

fn bench_backtest(c: &mut Criterion) {
    let frame = IndicatorFrame::build(make_candles(100_000), &EmaSpans::default()).unwrap();
    let signals = FractalSignalGenerator::default()
        .generate(&frame)
        .unwrap_or_default();
    c.bench_function("backtest_replay_100k", |b| {
        b.iter(|| run_backtest(black_box(frame.candles()), black_box(&signals)))
    });
}

criterion_group!(benches, bench_frame_build, bench_scan, bench_backtest);
criterion_main!(benches);

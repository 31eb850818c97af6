//! Benchmarks for the vantage-risk pipeline.
//!
//! Run with: cargo bench -p vantage-risk

use std::hint::black_box;

use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use vantage_core::prelude::*;
use vantage_risk::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn create_prices(assets: usize, days: usize) -> (PriceSeries, Vec<Ticker>) {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    let dates: Vec<NaiveDate> = (0..days).map(|i| start + Duration::days(i as i64)).collect();

    let mut prices = PriceSeries::new();
    let mut tickers = Vec::with_capacity(assets);
    for a in 0..assets {
        let ticker = Ticker::new(format!("SYM{a:03}")).unwrap();
        let closes: Vec<f64> = (0..days)
            .map(|d| 100.0 * (1.0 + 0.02 * ((d * (a + 3)) as f64 * 0.37).sin()))
            .collect();
        prices.insert_closes(ticker.clone(), &dates, &closes).unwrap();
        tickers.push(ticker);
    }
    (prices, tickers)
}

fn create_request(tickers: &[Ticker]) -> RiskRequest {
    RiskRequest::builder()
        .tickers(tickers.iter().map(Ticker::as_str))
        .weights(Weights::equal(tickers).unwrap())
        .uniform_shock(-0.10)
        .build()
        .unwrap()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    group.sample_size(50);

    for days in [250, 1_000, 5_000].iter() {
        let (prices, tickers) = create_prices(10, *days);
        let request = create_request(&tickers);

        group.throughput(Throughput::Elements(*days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &prices, |b, prices| {
            b.iter(|| analyze(black_box(&request), black_box(prices), DEFAULT_BINS))
        });
    }
    group.finish();
}

fn bench_tail_measures(c: &mut Criterion) {
    let returns: Vec<f64> = (0..5_000).map(|i| (f64::from(i) * 0.61).sin() * 0.02).collect();
    let confidence = ConfidenceLevel::new(0.99).unwrap();

    c.bench_function("historical_var_5000", |b| {
        b.iter(|| historical_var(black_box(&returns), confidence, 1))
    });
    c.bench_function("conditional_var_5000", |b| {
        b.iter(|| conditional_var(black_box(&returns), confidence, 1))
    });
    c.bench_function("parametric_var_5000", |b| {
        b.iter(|| parametric_var(black_box(&returns), confidence, 1))
    });
}

fn bench_covariance(c: &mut Criterion) {
    let mut group = c.benchmark_group("covariance");

    for assets in [5, 25, 100].iter() {
        let (prices, _) = create_prices(*assets, 1_000);
        let matrix = ReturnMatrix::from_aligned(&prices.align().unwrap()).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(assets), &matrix, |b, matrix| {
            b.iter(|| matrix.covariance())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_analyze, bench_tail_measures, bench_covariance);
criterion_main!(benches);

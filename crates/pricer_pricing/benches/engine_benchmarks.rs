//! Criterion benchmarks for the Monte Carlo engine.
//!
//! Measures normal generation, serial estimation under both strategies and
//! in-process group estimation across worker counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pricer_core::types::PricingParameters;
use pricer_pricing::mc::{estimate_parallel, estimate_serial, SampleRequest, VarianceReduction};
use pricer_pricing::rng::NormalDraws;

fn atm_call() -> PricingParameters {
    PricingParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
}

fn request(total: usize, strategy: VarianceReduction) -> SampleRequest {
    SampleRequest::builder()
        .total_samples(total)
        .seed(42)
        .strategy(strategy)
        .build()
        .unwrap()
}

/// Benchmark raw standard normal generation.
fn bench_normal_draws(c: &mut Criterion) {
    let mut group = c.benchmark_group("normal_draws");

    for size in [10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| NormalDraws::new(black_box(42), size).sum::<f64>());
        });
    }

    group.finish();
}

/// Benchmark serial estimation, plain against antithetic.
fn bench_serial_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("serial_estimate");
    let params = atm_call();

    for strategy in [VarianceReduction::Plain, VarianceReduction::Antithetic] {
        for size in [10_000, 100_000] {
            let req = request(size, strategy);
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(BenchmarkId::new(strategy.as_str(), size), &req, |b, req| {
                b.iter(|| estimate_serial(black_box(&params), req).unwrap());
            });
        }
    }

    group.finish();
}

/// Benchmark in-process group estimation (strong scaling at fixed total).
fn bench_parallel_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_estimate");
    group.sample_size(20);
    let params = atm_call();
    let req = request(400_000, VarianceReduction::Plain);

    for workers in [1, 2, 4] {
        group.throughput(Throughput::Elements(400_000));
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &workers| {
            b.iter(|| estimate_parallel(black_box(&params), &req, workers, 0).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_normal_draws,
    bench_serial_estimate,
    bench_parallel_estimate
);
criterion_main!(benches);

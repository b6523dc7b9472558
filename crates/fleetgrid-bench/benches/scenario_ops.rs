//! Criterion benchmarks for whole-scenario placement.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use fleetgrid_bench::{
    bottleneck_profile, clearing_profile, corridor_speed_profile, intersection_profile,
};
use fleetgrid_placement::{build_batch, build_scenario};

/// Benchmark: 4 fleets x 25 agents on the bottleneck map.
fn bench_bottleneck_scenario(c: &mut Criterion) {
    let (grid, config) = bottleneck_profile(42, 25);

    c.bench_function("build_bottleneck_105_4x25", |b| {
        b.iter(|| black_box(build_scenario(&grid, &config).map(|s| s.placed())));
    });
}

/// Benchmark: 10 seeds sharing one projection per fleet size.
fn bench_bottleneck_batch(c: &mut Criterion) {
    let (grid, config) = bottleneck_profile(0, 10);

    c.bench_function("build_batch_bottleneck_105_10_seeds", |b| {
        b.iter(|| black_box(build_batch(&grid, &config, 0..10).map(|v| v.len())));
    });
}

/// Benchmark: region-to-region placement through the intersection.
fn bench_intersection_scenario(c: &mut Criterion) {
    let (grid, config) = intersection_profile(42, 4);

    c.bench_function("build_intersection_105_regions", |b| {
        b.iter(|| black_box(build_scenario(&grid, &config).map(|s| s.placed())));
    });
}

/// Benchmark: room swaps on the cooperative clearing map.
fn bench_clearing_scenario(c: &mut Criterion) {
    let (grid, config) = clearing_profile(42, 6);

    c.bench_function("build_clearing_105_4x6", |b| {
        b.iter(|| black_box(build_scenario(&grid, &config).map(|s| s.placed())));
    });
}

/// Benchmark: two-way traffic on the corridor speed map.
fn bench_corridor_speed_scenario(c: &mut Criterion) {
    let (grid, config) = corridor_speed_profile(42, 6);

    c.bench_function("build_corridor_speed_105_4x6", |b| {
        b.iter(|| black_box(build_scenario(&grid, &config).map(|s| s.placed())));
    });
}

criterion_group!(
    benches,
    bench_bottleneck_scenario,
    bench_bottleneck_batch,
    bench_intersection_scenario,
    bench_clearing_scenario,
    bench_corridor_speed_scenario
);
criterion_main!(benches);

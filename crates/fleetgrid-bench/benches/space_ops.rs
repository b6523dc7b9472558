//! Criterion micro-benchmarks for fleet-grid projection and connectivity.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use fleetgrid_bench::{bottleneck_profile, FLEET_SIZES};
use fleetgrid_space::{project, Connectivity};
use fleetgrid_test_utils::cs;

/// Benchmark: project the 105x105 bottleneck map for every fleet size.
fn bench_project_all_sizes(c: &mut Criterion) {
    let (grid, _) = bottleneck_profile(0, 0);

    c.bench_function("project_bottleneck_105_all_sizes", |b| {
        b.iter(|| {
            for size in FLEET_SIZES {
                black_box(project(&grid, cs(size)));
            }
        });
    });
}

/// Benchmark: label components of the cs=1 fleet grid (~10K tiles).
fn bench_connectivity_cs1(c: &mut Criterion) {
    let (grid, _) = bottleneck_profile(0, 0);
    let fleet = project(&grid, cs(1));

    c.bench_function("connectivity_bottleneck_105_cs1", |b| {
        b.iter(|| {
            let conn = Connectivity::analyze(&fleet);
            black_box(conn.largest().map(|comp| comp.len()));
        });
    });
}

criterion_group!(benches, bench_project_all_sizes, bench_connectivity_cs1);
criterion_main!(benches);

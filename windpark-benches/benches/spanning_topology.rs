//! Kruskal spanning topology benchmarks.
//!
//! Measures plain Kruskal against the crossing-aware variant on fully
//! connected random parks, excluding placement and graph construction.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use windpark_benches::{error::BenchSetupError, params::ParkBenchParams, park::connected_park};
use windpark_core::{Admission, CableRouting, WeightingPolicy};

/// Seed used for every synthetic park in this benchmark.
const SEED: u64 = 42;

/// Park sizes to benchmark.
const TURBINE_COUNTS: &[usize] = &[50, 100, 200];

fn spanning_topology_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("spanning_topology");
    group.sample_size(20);

    for &turbine_count in TURBINE_COUNTS {
        for weighting in [WeightingPolicy::Geometric, WeightingPolicy::DEFAULT_RANDOM_COST] {
            let params = ParkBenchParams {
                turbine_count,
                weighting,
            };
            let park = connected_park(params, SEED)?;

            group.bench_with_input(
                BenchmarkId::new("allow_crossings", params),
                &park,
                |b, park| {
                    b.iter(|| park.spanning_topology(Admission::All, CableRouting::AllowCrossings));
                },
            );
            group.bench_with_input(
                BenchmarkId::new("avoid_crossings", params),
                &park,
                |b, park| {
                    b.iter(|| park.spanning_topology(Admission::All, CableRouting::AvoidCrossings));
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn spanning_topology(c: &mut Criterion) {
    if let Err(err) = spanning_topology_impl(c) {
        panic!("spanning_topology benchmark setup failed: {err}");
    }
}

criterion_group!(benches, spanning_topology);
criterion_main!(benches);

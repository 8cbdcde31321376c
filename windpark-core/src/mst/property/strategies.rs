//! Graph generators for spanning-topology property tests.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::types::{MstFixture, WeightDistribution};

const MIN_NODES: usize = 2;
const MAX_NODES: usize = 24;

/// Fixtures covering every weight distribution.
pub(super) fn mst_fixture_strategy() -> impl Strategy<Value = MstFixture> {
    let distribution = prop_oneof![
        1 => Just(WeightDistribution::Unique),
        2 => Just(WeightDistribution::ManyIdentical),
        1 => Just(WeightDistribution::Sparse),
        1 => Just(WeightDistribution::Disconnected),
    ];
    (distribution, any::<u64>()).prop_map(|(distribution, seed)| {
        generate_fixture(distribution, &mut SmallRng::seed_from_u64(seed))
    })
}

/// Generates a fixture for an explicitly chosen distribution.
pub(super) fn generate_fixture(distribution: WeightDistribution, rng: &mut SmallRng) -> MstFixture {
    let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
    let edges = match distribution {
        WeightDistribution::Unique => {
            random_pairs(rng, node_count, 0.4, |rng| rng.gen_range(0..100_000))
        }
        WeightDistribution::ManyIdentical => {
            random_pairs(rng, node_count, 0.5, |rng| rng.gen_range(1..=3))
        }
        WeightDistribution::Sparse => sparse(rng, node_count),
        WeightDistribution::Disconnected => islands(rng, node_count),
    };
    MstFixture {
        node_count,
        edges,
        distribution,
    }
}

fn random_pairs(
    rng: &mut SmallRng,
    node_count: usize,
    probability: f64,
    mut weight: impl FnMut(&mut SmallRng) -> u32,
) -> Vec<(usize, usize, u32)> {
    let mut edges = Vec::new();
    for left in 0..node_count {
        for right in (left + 1)..node_count {
            if rng.gen_bool(probability) {
                let value = weight(rng);
                edges.push((left, right, value));
            }
        }
    }
    edges
}

/// A random spanning tree plus roughly `n / 2` chords.
fn sparse(rng: &mut SmallRng, node_count: usize) -> Vec<(usize, usize, u32)> {
    let mut edges: Vec<(usize, usize, u32)> = (1..node_count)
        .map(|node| (rng.gen_range(0..node), node, rng.gen_range(0..1_000)))
        .collect();
    for _ in 0..node_count / 2 {
        let left = rng.gen_range(0..node_count);
        let right = rng.gen_range(0..node_count);
        let (left, right) = (left.min(right), left.max(right));
        if left != right && !edges.iter().any(|&(a, b, _)| (a, b) == (left, right)) {
            edges.push((left, right, rng.gen_range(0..1_000)));
        }
    }
    edges
}

/// Links only nodes that share `node % islands`.
fn islands(rng: &mut SmallRng, node_count: usize) -> Vec<(usize, usize, u32)> {
    let islands = rng.gen_range(2..=4);
    let mut edges = Vec::new();
    for left in 0..node_count {
        for right in (left + 1)..node_count {
            if left % islands == right % islands && rng.gen_bool(0.6) {
                edges.push((left, right, rng.gen_range(0..500)));
            }
        }
    }
    edges
}

//! Fixture types for spanning-topology property tests.

use crate::graph::CandidateGraph;
use crate::test_utils::t;

/// Weight distribution used to generate a fixture.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum WeightDistribution {
    /// Weights drawn from a wide range, so ties are rare.
    Unique,
    /// Weights drawn from a handful of values, stressing tie handling.
    ManyIdentical,
    /// Roughly a tree plus a few extra links.
    Sparse,
    /// Several islands with no links between them.
    Disconnected,
}

/// A generated candidate graph in raw index form.
///
/// Pairs are unique and canonical (`left < right`); weights are whole
/// numbers so floored totals compare exactly.
#[derive(Clone, Debug)]
pub(super) struct MstFixture {
    pub node_count: usize,
    pub edges: Vec<(usize, usize, u32)>,
    pub distribution: WeightDistribution,
}

impl MstFixture {
    /// Materialises the fixture as a candidate graph over turbines
    /// `0..node_count`.
    pub(super) fn graph(&self) -> CandidateGraph {
        let mut graph = CandidateGraph::new();
        for node in 0..self.node_count {
            graph.add_node(t(node));
        }
        for &(left, right, weight) in &self.edges {
            graph
                .set_edge(t(left), t(right), f64::from(weight))
                .expect("generated edges reference known nodes");
        }
        graph
    }
}

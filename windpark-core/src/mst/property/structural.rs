//! Structural and oracle properties of the spanning topology.
//!
//! For any fixture and threshold the result must:
//!
//! - contain no cycle (replayed through a fresh [`DisjointSet`]),
//! - hold exactly `|V| - c` edges for `c` reported components,
//! - record only weights strictly greater than the threshold,
//! - match the Prim oracle's total weight and component count over the
//!   admissible edges.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::mst::{
    Admission, DisjointSet, SpanningTopology, TopologyEdge, minimum_spanning_topology,
};
use crate::test_utils::t;

use super::oracle::prim_forest;
use super::types::MstFixture;

/// Runs every structural check for `fixture` under `admission`.
pub(super) fn run_structural_invariants_property(
    fixture: &MstFixture,
    admission: Admission,
) -> TestCaseResult {
    let graph = fixture.graph();
    let mst = minimum_spanning_topology(&graph, admission).map_err(|err| {
        TestCaseError::fail(format!(
            "spanning topology failed: {err} (distribution={:?}, nodes={}, edges={})",
            fixture.distribution,
            fixture.node_count,
            fixture.edges.len(),
        ))
    })?;

    validate_acyclicity(&mst)?;
    validate_edge_count(&mst)?;
    validate_threshold(fixture, &mst, admission)?;
    Ok(())
}

/// Compares totals against the Prim oracle over the admissible edges.
pub(super) fn run_oracle_equivalence_property(
    fixture: &MstFixture,
    admission: Admission,
) -> TestCaseResult {
    let mst = minimum_spanning_topology(&fixture.graph(), admission)
        .map_err(|err| TestCaseError::fail(format!("spanning topology failed: {err}")))?;
    let oracle = prim_forest(
        fixture.node_count,
        fixture
            .edges
            .iter()
            .copied()
            .filter(|&(_, _, weight)| admission.admits(f64::from(weight))),
    );

    if mst.total_weight() != oracle.total_weight {
        return Err(TestCaseError::fail(format!(
            "total weight {} differs from oracle {} ({:?})",
            mst.total_weight(),
            oracle.total_weight,
            fixture.distribution,
        )));
    }
    if mst.component_count() != oracle.component_count || mst.edges().len() != oracle.edge_count {
        return Err(TestCaseError::fail(format!(
            "forest shape ({} edges, {} components) differs from oracle ({} edges, {} components)",
            mst.edges().len(),
            mst.component_count(),
            oracle.edge_count,
            oracle.component_count,
        )));
    }
    Ok(())
}

fn validate_acyclicity(mst: &SpanningTopology) -> TestCaseResult {
    let mut sets = DisjointSet::new();
    for &node in mst.nodes() {
        sets.make_set(node)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
    }
    for (index, edge) in mst.edges().iter().enumerate() {
        let merged = sets
            .union(edge.source(), edge.target())
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        if !merged {
            return Err(TestCaseError::fail(format!(
                "edge {index}: ({}, {}) closes a cycle",
                edge.source(),
                edge.target(),
            )));
        }
    }
    Ok(())
}

fn validate_edge_count(mst: &SpanningTopology) -> TestCaseResult {
    let expected = mst.nodes().len().saturating_sub(mst.component_count());
    if mst.edges().len() != expected {
        return Err(TestCaseError::fail(format!(
            "edge count {}, expected n - c = {expected}",
            mst.edges().len(),
        )));
    }
    Ok(())
}

fn validate_threshold(
    fixture: &MstFixture,
    mst: &SpanningTopology,
    admission: Admission,
) -> TestCaseResult {
    for edge in mst.edges() {
        let original = fixture
            .edges
            .iter()
            .find(|&&(left, right, _)| (t(left), t(right)) == (edge.source(), edge.target()));
        let Some(&(_, _, weight)) = original else {
            return Err(TestCaseError::fail(format!(
                "edge ({}, {}) is not a candidate edge",
                edge.source(),
                edge.target(),
            )));
        };
        if !admission.admits(recorded_weight(edge)) || u64::from(weight) != edge.weight() {
            return Err(TestCaseError::fail(format!(
                "edge ({}, {}) of weight {weight} violates {admission:?}",
                edge.source(),
                edge.target(),
            )));
        }
    }
    Ok(())
}

#[expect(clippy::cast_precision_loss, reason = "fixture weights fit in u32")]
fn recorded_weight(edge: &TopologyEdge) -> f64 {
    edge.weight() as f64
}

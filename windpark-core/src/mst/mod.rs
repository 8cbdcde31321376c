//! Minimum spanning topology construction.
//!
//! Sequential Kruskal over the candidate graph: edges are stably sorted by
//! weight (ties keep encounter order), and each edge joining two distinct
//! components is admitted when it passes the [`Admission`] predicate and is
//! not vetoed by the caller. The result is a snapshot owned independently of
//! the source graph.

mod union_find;

use tracing::{instrument, warn};

use crate::analysis::Topology;
use crate::error::MstError;
use crate::graph::{CandidateGraph, GraphEdge, NodeId};

pub use self::union_find::DisjointSet;

/// Edge admission rule applied during the Kruskal scan.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Admission {
    /// Every cycle-free edge is admitted.
    #[default]
    All,
    /// Only edges whose floored weight is strictly greater than the
    /// threshold are admitted, so the topology is built from the longer
    /// candidate links.
    LongerThan(f64),
}

impl Admission {
    /// Returns `true` when an edge of `weight` may enter the topology.
    #[must_use]
    pub fn admits(self, weight: f64) -> bool {
        match self {
            Self::All => true,
            Self::LongerThan(threshold) => weight > threshold,
        }
    }

    fn validate(self) -> Result<Self, MstError> {
        match self {
            Self::LongerThan(threshold) if !threshold.is_finite() => {
                Err(MstError::NonFiniteThreshold { threshold })
            }
            other => Ok(other),
        }
    }
}

/// A spanning-topology edge with its weight floored to whole units.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TopologyEdge {
    source: NodeId,
    target: NodeId,
    weight: u64,
}

impl TopologyEdge {
    /// Builds an edge from raw parts.
    #[must_use]
    pub const fn new(source: NodeId, target: NodeId, weight: u64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// The smaller endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> NodeId { self.source }

    /// The larger endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> NodeId { self.target }

    /// The floored weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> u64 { self.weight }

    /// Returns `true` when both edges share an endpoint.
    #[must_use]
    pub fn shares_endpoint(&self, other: &Self) -> bool {
        [self.source, self.target].contains(&other.source)
            || [self.source, self.target].contains(&other.target)
    }
}

/// The output of a spanning topology computation.
///
/// Edges appear in admission order. When the admitted edges connect every
/// node this is a minimum spanning tree; otherwise it is a spanning forest and
/// [`Self::is_spanning_tree`] reports `false`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpanningTopology {
    nodes: Vec<NodeId>,
    edges: Vec<TopologyEdge>,
    component_count: usize,
}

impl SpanningTopology {
    /// Admitted edges as `(u, v, weight)` in admission order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[TopologyEdge] { &self.edges }

    /// Nodes of the source graph in its natural order.
    #[must_use]
    #[rustfmt::skip]
    pub fn nodes(&self) -> &[NodeId] { &self.nodes }

    /// Number of trees in the forest, isolated nodes included.
    #[must_use]
    #[rustfmt::skip]
    pub const fn component_count(&self) -> usize { self.component_count }

    /// Returns `true` when the result has exactly `|V| - 1` edges and forms a
    /// single tree.
    #[must_use]
    pub fn is_spanning_tree(&self) -> bool {
        self.component_count == 1 && self.edges.len() + 1 == self.nodes.len()
    }

    /// Sum of the floored edge weights, i.e. the total cable length for
    /// geometric weights.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.edges.iter().map(TopologyEdge::weight).sum()
    }

    /// Adjacency view for analysis, with nodes in first-appearance order of
    /// the admitted edges followed by any node no edge touches.
    #[must_use]
    pub fn topology(&self) -> Topology {
        let mut topology = Topology::from_edges(
            self.edges
                .iter()
                .map(|edge| (edge.source(), edge.target())),
        );
        for &node in &self.nodes {
            topology.add_node(node);
        }
        topology
    }
}

/// Computes a minimum spanning topology with Kruskal's algorithm.
///
/// # Errors
/// Returns [`MstError::NonFiniteThreshold`] for a non-finite admission
/// threshold.
///
/// # Examples
/// ```
/// use windpark_core::{Admission, CandidateGraph, NodeId, minimum_spanning_topology};
///
/// let nodes: Vec<NodeId> = (0..3).map(NodeId::turbine).collect();
/// let mut graph = CandidateGraph::new();
/// for &node in &nodes {
///     graph.add_node(node);
/// }
/// graph.set_edge(nodes[0], nodes[1], 1.5)?;
/// graph.set_edge(nodes[1], nodes[2], 2.9)?;
/// graph.set_edge(nodes[0], nodes[2], 9.0)?;
///
/// let mst = minimum_spanning_topology(&graph, Admission::All)?;
/// assert!(mst.is_spanning_tree());
/// assert_eq!(mst.total_weight(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn minimum_spanning_topology(
    graph: &CandidateGraph,
    admission: Admission,
) -> Result<SpanningTopology, MstError> {
    minimum_spanning_topology_with(graph, admission, |_, _| false)
}

/// Kruskal with a caller-supplied veto.
///
/// `veto` sees each cycle-free, admissible edge together with the edges
/// admitted so far and returns `true` to skip it.
///
/// # Errors
/// Returns [`MstError::NonFiniteThreshold`] for a non-finite admission
/// threshold.
#[instrument(
    name = "core.spanning_topology",
    err,
    skip(graph, veto),
    fields(nodes = graph.node_count(), edges = graph.edge_count(), admission = ?admission),
)]
pub fn minimum_spanning_topology_with<F>(
    graph: &CandidateGraph,
    admission: Admission,
    mut veto: F,
) -> Result<SpanningTopology, MstError>
where
    F: FnMut(&GraphEdge, &[TopologyEdge]) -> bool,
{
    let admission = admission.validate()?;

    let mut sorted: Vec<&GraphEdge> = graph.edges().iter().collect();
    sorted.sort_by(|left, right| left.weight().total_cmp(&right.weight()));

    let mut sets = DisjointSet::new();
    for &node in graph.nodes() {
        sets.make_set(node)?;
    }

    let mut admitted = Vec::with_capacity(graph.node_count().saturating_sub(1));
    for edge in sorted {
        // The threshold applies to the weight that is recorded.
        if sets.same_set(edge.source(), edge.target())?
            || !admission.admits(edge.weight().floor())
        {
            continue;
        }
        if veto(edge, &admitted) {
            continue;
        }
        admitted.push(TopologyEdge::new(
            edge.source(),
            edge.target(),
            floor_weight(edge.weight()),
        ));
        sets.union(edge.source(), edge.target())?;
    }

    let component_count = sets.set_count();
    let result = SpanningTopology {
        nodes: graph.nodes().to_vec(),
        edges: admitted,
        component_count,
    };
    if !result.is_spanning_tree() && graph.node_count() > 0 {
        warn!(
            components = component_count,
            edges = result.edges.len(),
            "admitted edges form a forest, not a spanning tree"
        );
    }
    Ok(result)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "weights are validated finite and non-negative on insertion"
)]
fn floor_weight(weight: f64) -> u64 {
    weight.floor() as u64
}


#[cfg(test)]
mod property;

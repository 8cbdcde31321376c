//! Clustering coefficients and pairwise edge connectivity.

use std::collections::{HashMap, VecDeque};

use crate::error::AnalysisError;
use crate::graph::NodeId;

use super::{NodeScores, Topology};

/// Local clustering coefficient of every node.
///
/// A node with `k >= 2` neighbours and `t` edges among them scores
/// `2t / (k (k - 1))`; nodes with fewer neighbours score zero.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "degrees are small")]
pub fn clustering(topology: &Topology) -> NodeScores {
    NodeScores::new(
        topology
            .nodes()
            .iter()
            .map(|&node| {
                let degree = topology.degree(node);
                let score = if degree < 2 {
                    0.0
                } else {
                    let links = triangles_at(topology, node);
                    (2 * links) as f64 / (degree * (degree - 1)) as f64
                };
                (node, score)
            })
            .collect(),
    )
}

/// Mean local clustering coefficient.
///
/// # Errors
/// Returns [`AnalysisError::EmptyTopology`] when there is nothing to average.
#[expect(clippy::cast_precision_loss, reason = "node counts are small")]
pub fn average_clustering(topology: &Topology) -> Result<f64, AnalysisError> {
    if topology.is_empty() {
        return Err(AnalysisError::EmptyTopology);
    }
    let total: f64 = clustering(topology).iter().map(|(_, score)| score).sum();
    Ok(total / topology.node_count() as f64)
}

/// Global clustering: the fraction of connected triples that close into
/// triangles. Zero when the topology has no triangle.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "triple counts are small")]
pub fn transitivity(topology: &Topology) -> f64 {
    let (closed, triples) = topology
        .nodes()
        .iter()
        .fold((0_usize, 0_usize), |(closed, triples), &node| {
            let degree = topology.degree(node);
            (
                closed + triangles_at(topology, node),
                triples + degree * degree.saturating_sub(1) / 2,
            )
        });
    if closed == 0 {
        0.0
    } else {
        closed as f64 / triples as f64
    }
}

/// Number of edge-disjoint paths between `source` and `target`.
///
/// Computed as a unit-capacity maximum flow with BFS augmenting paths.
/// Returns `None` when either node is absent or both are the same node.
///
/// # Examples
/// ```
/// use windpark_core::{NodeId, Topology, local_edge_connectivity};
///
/// let ring = Topology::from_edges((0..4).map(|n| (NodeId::turbine(n), NodeId::turbine((n + 1) % 4))));
/// assert_eq!(local_edge_connectivity(&ring, NodeId::turbine(0), NodeId::turbine(1)), Some(2));
/// ```
#[must_use]
pub fn local_edge_connectivity(
    topology: &Topology,
    source: NodeId,
    target: NodeId,
) -> Option<usize> {
    if source == target || !topology.contains(source) || !topology.contains(target) {
        return None;
    }

    let mut flow: HashMap<(NodeId, NodeId), i8> = HashMap::new();
    let mut paths = 0;
    while let Some(path) = augmenting_path(topology, &flow, source, target) {
        for pair in path.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            *flow.entry((from, to)).or_insert(0) += 1;
            *flow.entry((to, from)).or_insert(0) -= 1;
        }
        paths += 1;
    }
    Some(paths)
}

/// Returns `true` when every edge is the only route between its endpoints,
/// which holds exactly when the topology is a forest.
#[must_use]
pub fn tree_edges_are_bridges(topology: &Topology) -> bool {
    topology
        .edges()
        .into_iter()
        .all(|(left, right)| local_edge_connectivity(topology, left, right) == Some(1))
}

/// Edges among the neighbours of `node`.
fn triangles_at(topology: &Topology, node: NodeId) -> usize {
    let neighbours: Vec<NodeId> = topology.neighbours(node).collect();
    neighbours
        .iter()
        .enumerate()
        .map(|(index, &left)| {
            neighbours
                .iter()
                .skip(index + 1)
                .filter(|&&right| topology.has_edge(left, right))
                .count()
        })
        .sum()
}

fn augmenting_path(
    topology: &Topology,
    flow: &HashMap<(NodeId, NodeId), i8>,
    source: NodeId,
    target: NodeId,
) -> Option<Vec<NodeId>> {
    let mut parent: HashMap<NodeId, NodeId> = HashMap::new();
    let mut queue = VecDeque::from([source]);
    while let Some(current) = queue.pop_front() {
        for neighbour in topology.neighbours(current) {
            let used = flow.get(&(current, neighbour)).copied().unwrap_or(0);
            if neighbour == source || parent.contains_key(&neighbour) || used >= 1 {
                continue;
            }
            parent.insert(neighbour, current);
            if neighbour == target {
                let mut path = vec![target];
                let mut cursor = target;
                while let Some(&previous) = parent.get(&cursor) {
                    path.push(previous);
                    cursor = previous;
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(neighbour);
        }
    }
    None
}

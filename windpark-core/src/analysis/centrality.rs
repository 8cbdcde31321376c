//! Degree, betweenness and closeness centrality.
//!
//! Betweenness follows Brandes' accumulation over BFS shortest-path DAGs.
//! All three scores are normalised so they are comparable across topologies
//! of different sizes.

use std::collections::VecDeque;

use crate::graph::NodeId;

use super::Topology;

/// A per-node score, stored in the topology's natural order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeScores {
    scores: Vec<(NodeId, f64)>,
}

impl NodeScores {
    pub(crate) fn new(scores: Vec<(NodeId, f64)>) -> Self {
        Self { scores }
    }

    /// Score for `node`, if it is part of the record.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<f64> {
        self.scores
            .iter()
            .find_map(|&(candidate, score)| (candidate == node).then_some(score))
    }

    /// `(node, score)` pairs in natural order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.scores.iter().copied()
    }

    /// Pairs sorted by descending score; equal scores keep natural order.
    #[must_use]
    pub fn ranked(&self) -> Vec<(NodeId, f64)> {
        let mut ranked = self.scores.clone();
        ranked.sort_by(|left, right| right.1.total_cmp(&left.1));
        ranked
    }

    /// The pairs whose score passes `keep`, in natural order.
    #[must_use]
    pub fn retain(&self, mut keep: impl FnMut(f64) -> bool) -> Self {
        Self::new(
            self.scores
                .iter()
                .copied()
                .filter(|&(_, score)| keep(score))
                .collect(),
        )
    }

    /// Returns `true` when `node` has a score.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.scores.iter().any(|&(candidate, _)| candidate == node)
    }

    /// Number of scored nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns `true` when no node is scored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Degree divided by `n - 1`; a lone node scores `1.0`.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "node counts are small")]
pub fn degree_centrality(topology: &Topology) -> NodeScores {
    let n = topology.node_count();
    NodeScores::new(
        topology
            .nodes()
            .iter()
            .map(|&node| {
                let score = if n > 1 {
                    topology.degree(node) as f64 / (n - 1) as f64
                } else {
                    1.0
                };
                (node, score)
            })
            .collect(),
    )
}

/// Fraction of shortest paths between other node pairs that pass through
/// each node.
///
/// Scores are normalised by `(n - 1)(n - 2)`; topologies with fewer than
/// three nodes score zero everywhere.
///
/// # Examples
/// ```
/// use windpark_core::{NodeId, Topology, betweenness_centrality};
///
/// let hub = NodeId::turbine(0);
/// let star = Topology::from_edges((1..5).map(|leaf| (hub, NodeId::turbine(leaf))));
/// let scores = betweenness_centrality(&star);
/// assert_eq!(scores.get(hub), Some(1.0));
/// assert_eq!(scores.get(NodeId::turbine(3)), Some(0.0));
/// ```
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "node and path counts are small")]
pub fn betweenness_centrality(topology: &Topology) -> NodeScores {
    let indexed = topology.indexed();
    let n = indexed.len();
    let mut betweenness = vec![0.0_f64; n];

    let mut stack = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0_f64; n];
    let mut distance: Vec<Option<usize>> = vec![None; n];
    let mut delta = vec![0.0_f64; n];
    let mut queue = VecDeque::new();

    for source in 0..n {
        stack.clear();
        predecessors.iter_mut().for_each(Vec::clear);
        sigma.fill(0.0);
        distance.fill(None);
        delta.fill(0.0);

        sigma[source] = 1.0;
        distance[source] = Some(0);
        queue.push_back(source);
        while let Some(current) = queue.pop_front() {
            stack.push(current);
            let next = distance[current].map_or(0, |hops| hops + 1);
            for &neighbour in &indexed.adjacency[current] {
                if distance[neighbour].is_none() {
                    distance[neighbour] = Some(next);
                    queue.push_back(neighbour);
                }
                if distance[neighbour] == Some(next) {
                    sigma[neighbour] += sigma[current];
                    predecessors[neighbour].push(current);
                }
            }
        }

        while let Some(current) = stack.pop() {
            for &predecessor in &predecessors[current] {
                delta[predecessor] +=
                    sigma[predecessor] / sigma[current] * (1.0 + delta[current]);
            }
            if current != source {
                betweenness[current] += delta[current];
            }
        }
    }

    // Each unordered pair was accumulated from both ends.
    let pairs = (n.saturating_sub(1) * n.saturating_sub(2)) as f64;
    NodeScores::new(
        indexed
            .nodes
            .iter()
            .zip(betweenness)
            .map(|(&node, raw)| (node, if n > 2 { raw / pairs } else { 0.0 }))
            .collect(),
    )
}

/// Closeness scaled by the reachable fraction of the topology.
///
/// For a node reaching `r` nodes (itself included) at total hop distance
/// `d`, the score is `((r - 1) / d) * ((r - 1) / (n - 1))`, or `0.0` when the
/// node reaches nothing.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "node counts are small")]
pub fn closeness_centrality(topology: &Topology) -> NodeScores {
    let indexed = topology.indexed();
    let n = indexed.len();
    NodeScores::new(
        (0..n)
            .map(|source| {
                let reached: Vec<usize> = indexed.distances_from(source).into_iter().flatten().collect();
                let total: usize = reached.iter().sum();
                let others = reached.len().saturating_sub(1);
                let score = if total > 0 && n > 1 {
                    let others = others as f64;
                    (others / total as f64) * (others / (n - 1) as f64)
                } else {
                    0.0
                };
                (indexed.nodes[source], score)
            })
            .collect(),
    )
}

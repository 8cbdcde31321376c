//! Unweighted topology view and the graph metrics computed over it.
//!
//! A [`Topology`] is the adjacency snapshot that centrality, clustering,
//! path metrics and percolation operate on. Edge weights are deliberately
//! absent: every metric here counts hops.

mod centrality;
mod clustering;
mod paths;

use std::collections::{BTreeSet, HashMap};

use crate::graph::NodeId;

pub use self::centrality::{
    NodeScores, betweenness_centrality, closeness_centrality, degree_centrality,
};
pub use self::clustering::{
    average_clustering, clustering, local_edge_connectivity, tree_edges_are_bridges,
    transitivity,
};
pub use self::paths::{
    average_shortest_path_length, center, connected_components, diameter, eccentricity,
    is_connected, largest_component_size, radius,
};

/// Undirected simple graph with a stable node order.
///
/// Nodes iterate in first-insertion order, which is the "natural order" the
/// aggregation selector scans. Neighbours iterate in ascending [`NodeId`]
/// order so traversals are deterministic.
///
/// # Examples
/// ```
/// use windpark_core::{NodeId, Topology};
///
/// let (a, b, c) = (NodeId::turbine(0), NodeId::turbine(1), NodeId::turbine(2));
/// let mut topology = Topology::from_edges([(b, a), (b, c)]);
/// assert_eq!(topology.nodes(), &[b, a, c]);
/// assert_eq!(topology.degree(b), 2);
///
/// assert!(topology.remove_node(b));
/// assert_eq!(topology.edge_count(), 0);
/// assert_eq!(topology.node_count(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Topology {
    order: Vec<NodeId>,
    adjacency: HashMap<NodeId, BTreeSet<NodeId>>,
}

impl Topology {
    /// Creates an empty topology.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a topology from undirected edges; self-loops are dropped.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut topology = Self::new();
        for (left, right) in edges {
            topology.add_edge(left, right);
        }
        topology
    }

    /// Adds an isolated node. Returns `false` if it was already present.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, BTreeSet::new());
        self.order.push(node);
        true
    }

    /// Adds the edge `{left, right}`, inserting missing endpoints.
    ///
    /// Returns `false` for self-loops and edges that already exist.
    pub fn add_edge(&mut self, left: NodeId, right: NodeId) -> bool {
        if left == right {
            return false;
        }
        self.add_node(left);
        self.add_node(right);
        let inserted = self
            .adjacency
            .get_mut(&left)
            .is_some_and(|neighbours| neighbours.insert(right));
        if let Some(neighbours) = self.adjacency.get_mut(&right) {
            neighbours.insert(left);
        }
        inserted
    }

    /// Deletes `node` and its incident edges. Returns `false` if absent.
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        let Some(neighbours) = self.adjacency.remove(&node) else {
            return false;
        };
        for neighbour in neighbours {
            if let Some(back) = self.adjacency.get_mut(&neighbour) {
                back.remove(&node);
            }
        }
        self.order.retain(|&kept| kept != node);
        true
    }

    /// A copy of the topology without `node`.
    #[must_use]
    pub fn without_node(&self, node: NodeId) -> Self {
        let mut copy = self.clone();
        copy.remove_node(node);
        copy
    }

    /// Neighbours of `node` in ascending id order; empty for unknown nodes.
    pub fn neighbours(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency
            .get(&node)
            .into_iter()
            .flat_map(|neighbours| neighbours.iter().copied())
    }

    /// Number of incident edges; zero for unknown nodes.
    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency.get(&node).map_or(0, BTreeSet::len)
    }

    /// Returns `true` when the edge `{left, right}` exists.
    #[must_use]
    pub fn has_edge(&self, left: NodeId, right: NodeId) -> bool {
        self.adjacency
            .get(&left)
            .is_some_and(|neighbours| neighbours.contains(&right))
    }

    /// Nodes in natural (first-insertion) order.
    #[must_use]
    #[rustfmt::skip]
    pub fn nodes(&self) -> &[NodeId] { &self.order }

    /// Edges as `(u, v)` pairs, each reported once from its earlier node in
    /// natural order.
    #[must_use]
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut seen = BTreeSet::new();
        let mut edges = Vec::with_capacity(self.edge_count());
        for &node in &self.order {
            for neighbour in self.neighbours(node) {
                if !seen.contains(&neighbour) {
                    edges.push((node, neighbour));
                }
            }
            seen.insert(node);
        }
        edges
    }

    /// Returns `true` when `node` is present.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Returns `true` when the topology has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Dense index form used by the traversal kernels.
    fn indexed(&self) -> Indexed<'_> {
        let slots: HashMap<NodeId, usize> = self
            .order
            .iter()
            .enumerate()
            .map(|(slot, &node)| (node, slot))
            .collect();
        let adjacency = self
            .order
            .iter()
            .map(|node| {
                self.neighbours(*node)
                    .filter_map(|neighbour| slots.get(&neighbour).copied())
                    .collect()
            })
            .collect();
        Indexed {
            nodes: &self.order,
            adjacency,
        }
    }
}

/// Adjacency lists keyed by position in [`Topology::nodes`].
struct Indexed<'a> {
    nodes: &'a [NodeId],
    adjacency: Vec<Vec<usize>>,
}

impl Indexed<'_> {
    fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Hop distances from `source`; `None` marks unreachable nodes.
    fn distances_from(&self, source: usize) -> Vec<Option<usize>> {
        let mut distances = vec![None; self.len()];
        let mut queue = std::collections::VecDeque::new();
        if let Some(slot) = distances.get_mut(source) {
            *slot = Some(0);
            queue.push_back(source);
        }
        while let Some(current) = queue.pop_front() {
            let next = distances[current].map_or(0, |distance| distance + 1);
            for &neighbour in &self.adjacency[current] {
                if distances[neighbour].is_none() {
                    distances[neighbour] = Some(next);
                    queue.push_back(neighbour);
                }
            }
        }
        distances
    }
}

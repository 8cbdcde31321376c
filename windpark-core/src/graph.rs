//! Weighted undirected candidate graph over registered sites.
//!
//! Edges are stored in encounter order so that a stable sort by weight keeps
//! ties in the order they were first inserted. Updating an existing edge keeps
//! its original slot.

use std::collections::HashMap;
use std::fmt;

use rand::Rng;

use crate::error::GraphError;
use crate::registry::TurbineId;

/// Identity of a node in the candidate graph and derived topologies.
///
/// Turbines order by id; the synthetic substation sorts after every turbine.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum NodeId {
    /// A registered turbine.
    Turbine(TurbineId),
    /// The synthetic aggregation substation.
    Substation,
}

impl NodeId {
    /// Shorthand for `NodeId::Turbine(TurbineId::new(raw))`.
    #[must_use]
    pub const fn turbine(raw: usize) -> Self {
        Self::Turbine(TurbineId::new(raw))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Turbine(id) => id.fmt(f),
            Self::Substation => f.write_str("substation"),
        }
    }
}

impl From<TurbineId> for NodeId {
    fn from(id: TurbineId) -> Self {
        Self::Turbine(id)
    }
}

/// How [`crate::WindPark::connect`] weights new or refreshed edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightingPolicy {
    /// Weight is the Euclidean distance between the two sites.
    Geometric,
    /// Weight is an integer drawn uniformly from `min..=max`, independent of
    /// geometry. Intended for load-testing the spanning-topology engine.
    RandomCost {
        /// Inclusive lower bound.
        min: u32,
        /// Inclusive upper bound.
        max: u32,
    },
}

impl WeightingPolicy {
    /// Default cost range of the randomised policy.
    pub const DEFAULT_RANDOM_COST: Self = Self::RandomCost { min: 300, max: 3_000 };

    /// Produces the weight for an edge whose endpoints are `distance` apart.
    pub fn weigh<R: Rng + ?Sized>(self, distance: f64, rng: &mut R) -> f64 {
        match self {
            Self::Geometric => distance,
            Self::RandomCost { min, max } => f64::from(rng.gen_range(min..=max)),
        }
    }
}

/// An undirected weighted edge in canonical form (`source < target`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphEdge {
    source: NodeId,
    target: NodeId,
    weight: f64,
}

impl GraphEdge {
    /// The smaller endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> NodeId { self.source }

    /// The larger endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> NodeId { self.target }

    /// The edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> f64 { self.weight }
}

/// Whether [`CandidateGraph::set_edge`] created or overwrote an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeUpdate {
    /// A new edge was added.
    Inserted,
    /// An existing edge had its weight replaced.
    Replaced {
        /// The weight before the update.
        previous: f64,
    },
}

/// Candidate connectivity graph.
///
/// Invariants: no self-loops and at most one weight per unordered pair; the
/// last write wins.
#[derive(Clone, Debug, Default)]
pub struct CandidateGraph {
    nodes: Vec<NodeId>,
    edges: Vec<GraphEdge>,
    edge_slots: HashMap<(NodeId, NodeId), usize>,
}

impl CandidateGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an isolated node. Returns `false` if it was already present.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        if self.contains(node) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    /// Returns `true` when `node` is part of the graph.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// Inserts the edge `{left, right}` or overwrites its weight.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] for unknown endpoints,
    /// [`GraphError::SelfLoop`] when both endpoints match, and
    /// [`GraphError::InvalidWeight`] for non-finite or negative weights.
    ///
    /// # Examples
    /// ```
    /// use windpark_core::{CandidateGraph, EdgeUpdate, NodeId};
    ///
    /// let (a, b) = (NodeId::turbine(0), NodeId::turbine(1));
    /// let mut graph = CandidateGraph::new();
    /// graph.add_node(a);
    /// graph.add_node(b);
    /// assert_eq!(graph.set_edge(b, a, 4.0)?, EdgeUpdate::Inserted);
    /// assert_eq!(graph.set_edge(a, b, 2.0)?, EdgeUpdate::Replaced { previous: 4.0 });
    /// assert_eq!(graph.weight(a, b), Some(2.0));
    /// assert_eq!(graph.edge_count(), 1);
    /// # Ok::<(), windpark_core::GraphError>(())
    /// ```
    pub fn set_edge(
        &mut self,
        left: NodeId,
        right: NodeId,
        weight: f64,
    ) -> Result<EdgeUpdate, GraphError> {
        for node in [left, right] {
            if !self.contains(node) {
                return Err(GraphError::NodeNotFound { node });
            }
        }
        if left == right {
            return Err(GraphError::SelfLoop { node: left });
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight {
                left,
                right,
                weight,
            });
        }

        let key = canonical(left, right);
        if let Some(edge) = self
            .edge_slots
            .get(&key)
            .and_then(|&slot| self.edges.get_mut(slot))
        {
            let previous = edge.weight;
            edge.weight = weight;
            return Ok(EdgeUpdate::Replaced { previous });
        }

        self.edge_slots.insert(key, self.edges.len());
        self.edges.push(GraphEdge {
            source: key.0,
            target: key.1,
            weight,
        });
        Ok(EdgeUpdate::Inserted)
    }

    /// Weight of the edge `{left, right}`, if present.
    #[must_use]
    pub fn weight(&self, left: NodeId, right: NodeId) -> Option<f64> {
        self.edge_slots
            .get(&canonical(left, right))
            .and_then(|&slot| self.edges.get(slot))
            .map(GraphEdge::weight)
    }

    /// Nodes in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Edges in encounter order.
    #[must_use]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

fn canonical(left: NodeId, right: NodeId) -> (NodeId, NodeId) {
    if left <= right {
        (left, right)
    } else {
        (right, left)
    }
}

//! Aggregation (substation) node selection.
//!
//! Three criteria rank the nodes of a topology: raw degree, betweenness and
//! closeness. A [`SelectionPolicy`] combines them; when no node satisfies
//! the policy the selector falls back to the highest-degree candidate.

use tracing::{info, instrument, warn};

use crate::analysis::{NodeScores, Topology, betweenness_centrality, closeness_centrality};
use crate::error::SelectionError;
use crate::graph::NodeId;

/// How the three centrality criteria are combined.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SelectionPolicy {
    /// First node in natural order present in all three maps. Only the
    /// degree map is filtered, so on a tree this is the first node meeting
    /// the degree floor.
    #[default]
    Intersection,
    /// First rank position at which all three descending rankings name the
    /// same node.
    RankedConsensus,
}

/// Minimum degree a node needs to be considered at all.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DegreeFloor {
    /// Any connected node (degree >= 1).
    #[default]
    AtLeastOne,
    /// Only nodes joining two or more cables (degree > 1).
    MoreThanOne,
}

impl DegreeFloor {
    /// The smallest admissible degree.
    #[must_use]
    pub const fn min_degree(self) -> usize {
        match self {
            Self::AtLeastOne => 1,
            Self::MoreThanOne => 2,
        }
    }
}

/// Why a node was chosen.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SelectionBasis {
    /// The configured policy found a node.
    Consensus,
    /// No node satisfied the policy; the highest-degree candidate was taken.
    HighestDegreeFallback,
}

/// The three centrality maps a selection was made from.
///
/// The degree map keeps nodes at or above the floor; betweenness and
/// closeness hold every node of the topology, zero scores included.
#[derive(Clone, Debug, PartialEq)]
pub struct CentralityReport {
    degree: NodeScores,
    betweenness: NodeScores,
    closeness: NodeScores,
}

impl CentralityReport {
    /// Raw degree of every candidate.
    #[must_use]
    #[rustfmt::skip]
    pub fn degree(&self) -> &NodeScores { &self.degree }

    /// Normalised betweenness of every node on some shortest path.
    #[must_use]
    #[rustfmt::skip]
    pub fn betweenness(&self) -> &NodeScores { &self.betweenness }

    /// Closeness of every node reaching at least one other node.
    #[must_use]
    #[rustfmt::skip]
    pub fn closeness(&self) -> &NodeScores { &self.closeness }
}

/// Outcome of [`AggregationSelector::select`].
#[derive(Clone, Debug, PartialEq)]
pub struct AggregationChoice {
    node: NodeId,
    basis: SelectionBasis,
    report: CentralityReport,
}

impl AggregationChoice {
    /// The selected node.
    #[must_use]
    #[rustfmt::skip]
    pub const fn node(&self) -> NodeId { self.node }

    /// Whether the policy or the fallback picked the node.
    #[must_use]
    #[rustfmt::skip]
    pub const fn basis(&self) -> SelectionBasis { self.basis }

    /// The centrality maps the decision was based on.
    #[must_use]
    #[rustfmt::skip]
    pub const fn report(&self) -> &CentralityReport { &self.report }
}

/// Chooses the aggregation node of a topology.
///
/// # Examples
/// ```
/// use windpark_core::{AggregationSelector, NodeId, SelectionPolicy, Topology};
///
/// let hub = NodeId::turbine(4);
/// let star = Topology::from_edges((0..4).map(|leaf| (NodeId::turbine(leaf), hub)));
/// let choice = AggregationSelector::new()
///     .with_policy(SelectionPolicy::RankedConsensus)
///     .select(&star)?;
/// assert_eq!(choice.node(), hub);
/// # Ok::<(), windpark_core::SelectionError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AggregationSelector {
    policy: SelectionPolicy,
    floor: DegreeFloor,
}

impl AggregationSelector {
    /// Intersection policy with a degree floor of one.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the selection policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Overrides the degree floor.
    #[must_use]
    pub const fn with_degree_floor(mut self, floor: DegreeFloor) -> Self {
        self.floor = floor;
        self
    }

    /// The configured policy.
    #[must_use]
    #[rustfmt::skip]
    pub const fn policy(&self) -> SelectionPolicy { self.policy }

    /// The configured degree floor.
    #[must_use]
    #[rustfmt::skip]
    pub const fn degree_floor(&self) -> DegreeFloor { self.floor }

    /// Selects the aggregation node of `topology`.
    ///
    /// # Errors
    /// Returns [`SelectionError::EmptyTopology`] for a topology without
    /// nodes and [`SelectionError::NoEligibleNode`] when no node reaches the
    /// degree floor.
    #[instrument(
        name = "core.select_aggregation_node",
        err,
        skip(self, topology),
        fields(nodes = topology.node_count(), policy = ?self.policy, floor = self.floor.min_degree()),
    )]
    pub fn select(&self, topology: &Topology) -> Result<AggregationChoice, SelectionError> {
        if topology.is_empty() {
            return Err(SelectionError::EmptyTopology);
        }

        let report = self.centrality_report(topology);
        if report.degree.is_empty() {
            return Err(SelectionError::NoEligibleNode {
                min_degree: self.floor.min_degree(),
            });
        }

        let agreed = match self.policy {
            SelectionPolicy::Intersection => intersection(topology, &report),
            SelectionPolicy::RankedConsensus => ranked_consensus(&report),
        };

        let (node, basis) = match agreed {
            Some(node) => (node, SelectionBasis::Consensus),
            None => {
                let node = highest_degree(&report.degree).ok_or(SelectionError::NoEligibleNode {
                    min_degree: self.floor.min_degree(),
                })?;
                warn!(%node, "no node satisfied the selection policy; using highest degree");
                (node, SelectionBasis::HighestDegreeFallback)
            }
        };
        info!(%node, ?basis, "aggregation node selected");

        Ok(AggregationChoice {
            node,
            basis,
            report,
        })
    }

    #[expect(clippy::cast_precision_loss, reason = "degrees are small")]
    fn centrality_report(&self, topology: &Topology) -> CentralityReport {
        let min_degree = self.floor.min_degree();
        let degree = NodeScores::new(
            topology
                .nodes()
                .iter()
                .filter_map(|&node| {
                    let degree = topology.degree(node);
                    (degree >= min_degree).then_some((node, degree as f64))
                })
                .collect(),
        );
        CentralityReport {
            degree,
            betweenness: betweenness_centrality(topology),
            closeness: closeness_centrality(topology),
        }
    }
}

fn intersection(topology: &Topology, report: &CentralityReport) -> Option<NodeId> {
    topology.nodes().iter().copied().find(|&node| {
        report.degree.contains(node)
            && report.betweenness.contains(node)
            && report.closeness.contains(node)
    })
}

fn ranked_consensus(report: &CentralityReport) -> Option<NodeId> {
    let degree = report.degree.ranked();
    let betweenness = report.betweenness.ranked();
    let closeness = report.closeness.ranked();
    degree
        .iter()
        .zip(&betweenness)
        .zip(&closeness)
        .find_map(|((&(by_degree, _), &(by_betweenness, _)), &(by_closeness, _))| {
            (by_degree == by_betweenness && by_betweenness == by_closeness).then_some(by_degree)
        })
}

/// First node with the maximum degree in natural order.
fn highest_degree(degree: &NodeScores) -> Option<NodeId> {
    degree.ranked().first().map(|&(node, _)| node)
}

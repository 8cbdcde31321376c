//! The wind park aggregate.
//!
//! Owns the turbine registry and the candidate graph and keeps them in step:
//! every accepted site becomes a graph node, and [`WindPark::connect`]
//! derives weighted edges from registered positions.

use rand::Rng;
use tracing::{debug, instrument};

use crate::crossing::{self, Cable, CrossingReport, CrossingStrategy};
use crate::error::{GraphError, MstError};
use crate::geometry::{Position, Segment};
use crate::graph::{CandidateGraph, GraphEdge, NodeId, WeightingPolicy};
use crate::mst::{self, Admission, SpanningTopology, TopologyEdge};
use crate::registry::{Placement, TurbineRegistry};

/// Whether the spanning topology may lay crossing cables.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CableRouting {
    /// Plain Kruskal; geometry is ignored.
    #[default]
    AllowCrossings,
    /// Kruskal skips any edge whose cable properly crosses an admitted one.
    AvoidCrossings,
}

/// Registered sites plus their candidate connectivity graph.
///
/// Construct with [`crate::WindParkBuilder`].
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use windpark_core::{Admission, CableRouting, Position, WindParkBuilder};
///
/// let mut park = WindParkBuilder::new().build()?;
/// for x in [0.0, 400.0, 800.0] {
///     park.place_turbine(Position::new(x, 0.0));
/// }
/// park.connect_all(&mut SmallRng::seed_from_u64(1))?;
///
/// let mst = park.spanning_topology(Admission::All, CableRouting::AllowCrossings)?;
/// assert!(mst.is_spanning_tree());
/// assert_eq!(mst.total_weight(), 800);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct WindPark {
    registry: TurbineRegistry,
    graph: CandidateGraph,
    min_edge_distance: f64,
    weighting: WeightingPolicy,
}

impl WindPark {
    pub(crate) fn new(min_spacing: f64, min_edge_distance: f64, weighting: WeightingPolicy) -> Self {
        Self {
            registry: TurbineRegistry::new(min_spacing),
            graph: CandidateGraph::new(),
            min_edge_distance,
            weighting,
        }
    }

    /// Minimum distance enforced between sites.
    #[must_use]
    #[rustfmt::skip]
    pub const fn min_spacing(&self) -> f64 { self.registry.min_spacing() }

    /// Distance below which [`Self::connect`] creates no edge.
    #[must_use]
    #[rustfmt::skip]
    pub const fn min_edge_distance(&self) -> f64 { self.min_edge_distance }

    /// Edge weighting in effect.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weighting(&self) -> WeightingPolicy { self.weighting }

    /// The registered sites.
    #[must_use]
    #[rustfmt::skip]
    pub const fn registry(&self) -> &TurbineRegistry { &self.registry }

    /// The candidate graph.
    #[must_use]
    #[rustfmt::skip]
    pub const fn graph(&self) -> &CandidateGraph { &self.graph }

    /// Offers a turbine site; accepted sites join the graph as isolated
    /// nodes.
    #[instrument(name = "core.place_turbine", skip(self), fields(registered = self.registry.len()))]
    pub fn place_turbine(&mut self, position: Position) -> Placement {
        let placement = self.registry.register(position);
        if let Placement::Accepted(node) = placement {
            self.graph.add_node(node);
        }
        placement
    }

    /// Offers the synthetic substation site.
    ///
    /// The substation obeys the same spacing rule as turbines.
    ///
    /// # Errors
    /// Returns [`GraphError::SubstationAlreadyPlaced`] when a substation is
    /// already registered.
    pub fn place_substation(&mut self, position: Position) -> Result<Placement, GraphError> {
        let placement = self
            .registry
            .register_substation(position)
            .ok_or(GraphError::SubstationAlreadyPlaced)?;
        if let Placement::Accepted(node) = placement {
            self.graph.add_node(node);
        }
        Ok(placement)
    }

    /// Links `node` to every other registered site at least
    /// [`Self::min_edge_distance`] away, inserting or overwriting edges with
    /// weights from the configured policy.
    ///
    /// Returns the number of edges written.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] when `node` is not registered.
    /// The graph is left untouched in that case.
    #[instrument(
        name = "core.connect",
        err,
        skip(self, node, rng),
        fields(node = %node, weighting = ?self.weighting),
    )]
    pub fn connect<R>(&mut self, node: NodeId, rng: &mut R) -> Result<usize, GraphError>
    where
        R: Rng + ?Sized,
    {
        let origin = self
            .registry
            .position(node)
            .ok_or(GraphError::NodeNotFound { node })?;
        let others: Vec<(NodeId, f64)> = self
            .registry
            .sites()
            .filter(|&(other, _)| other != node)
            .map(|(other, position)| (other, origin.distance(position)))
            .collect();

        let mut written = 0;
        for (other, distance) in others {
            if distance < self.min_edge_distance {
                debug!(%other, distance, "edge below minimum distance skipped");
                continue;
            }
            let weight = self.weighting.weigh(distance, rng);
            self.graph.set_edge(node, other, weight)?;
            written += 1;
        }
        Ok(written)
    }

    /// Calls [`Self::connect`] for every registered site in order.
    ///
    /// # Errors
    /// Propagates [`GraphError`] from [`Self::connect`].
    pub fn connect_all<R>(&mut self, rng: &mut R) -> Result<usize, GraphError>
    where
        R: Rng + ?Sized,
    {
        let nodes: Vec<NodeId> = self.registry.sites().map(|(node, _)| node).collect();
        let mut written = 0;
        for node in nodes {
            written += self.connect(node, rng)?;
        }
        Ok(written)
    }

    /// Computes the minimum spanning topology of the candidate graph.
    ///
    /// With [`CableRouting::AvoidCrossings`] an edge whose straight cable
    /// properly crosses an already admitted cable is skipped; cables meeting
    /// at a site never count as crossing.
    ///
    /// # Errors
    /// Returns [`MstError`] for a non-finite threshold.
    pub fn spanning_topology(
        &self,
        admission: Admission,
        routing: CableRouting,
    ) -> Result<SpanningTopology, MstError> {
        match routing {
            CableRouting::AllowCrossings => mst::minimum_spanning_topology(&self.graph, admission),
            CableRouting::AvoidCrossings => {
                mst::minimum_spanning_topology_with(&self.graph, admission, |edge, admitted| {
                    self.crosses_admitted(edge, admitted)
                })
            }
        }
    }

    /// Runs a crossing check over `cables` against registered positions.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] for a cable touching an
    /// unregistered site.
    pub fn check_cables(
        &self,
        cables: &[Cable],
        strategy: CrossingStrategy,
    ) -> Result<CrossingReport, GraphError> {
        crossing::check_cables(&self.registry, cables, strategy)
    }

    /// Exhaustive check of one candidate cable against every other site pair.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] when either end is unregistered.
    pub fn cable_crosses_any_pair(&self, a: NodeId, b: NodeId) -> Result<bool, GraphError> {
        crossing::crosses_any_pair(&self.registry, a, b)
    }

    fn segment(&self, source: NodeId, target: NodeId) -> Option<Segment> {
        Some(Segment::new(
            self.registry.position(source)?,
            self.registry.position(target)?,
        ))
    }

    fn crosses_admitted(&self, edge: &GraphEdge, admitted: &[TopologyEdge]) -> bool {
        let Some(candidate) = self.segment(edge.source(), edge.target()) else {
            return false;
        };
        let cable = TopologyEdge::new(edge.source(), edge.target(), 0);
        let blocker = admitted.iter().find(|existing| {
            !cable.shares_endpoint(existing)
                && self
                    .segment(existing.source(), existing.target())
                    .is_some_and(|segment| candidate.properly_intersects(&segment))
        });
        if let Some(blocker) = blocker {
            debug!(
                source = %edge.source(),
                target = %edge.target(),
                blocked_by = ?(blocker.source(), blocker.target()),
                "edge vetoed: cable would cross"
            );
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests;

//! Cable-crossing detection.
//!
//! Two strategies with different precision are offered and deliberately not
//! reconciled:
//!
//! - [`CrossingStrategy::SweepBoundingBox`] walks the sites in x order, picks
//!   each site's cheaper cable to an x-neighbour and reports a crossing when
//!   its bounding box overlaps that of a previously picked cable. This is a
//!   conservative approximation: overlapping boxes do not imply crossing
//!   segments.
//! - [`CrossingStrategy::ExactPairwise`] tests every pair of cables with the
//!   parametric segment intersection and only reports proper interior
//!   crossings.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::geometry::{Position, Segment};
use crate::graph::{GraphEdge, NodeId};
use crate::mst::TopologyEdge;
use crate::registry::TurbineRegistry;

/// Which crossing test to run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CrossingStrategy {
    /// Bounding-box overlap of x-neighbour cables.
    SweepBoundingBox,
    /// Proper segment intersection over all cable pairs.
    #[default]
    ExactPairwise,
}

/// A straight cable between two registered sites.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cable {
    source: NodeId,
    target: NodeId,
    weight: f64,
}

impl Cable {
    /// Creates a cable; endpoints are stored in ascending order.
    #[must_use]
    pub fn new(left: NodeId, right: NodeId, weight: f64) -> Self {
        let (source, target) = if left <= right {
            (left, right)
        } else {
            (right, left)
        };
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

    /// Cost used to pick between neighbour cables in the sweep.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> f64 { self.weight }

    /// Returns `true` when the cables meet at a site.
    #[must_use]
    pub fn shares_endpoint(&self, other: &Self) -> bool {
        self.source == other.source
            || self.source == other.target
            || self.target == other.source
            || self.target == other.target
    }

    fn key(&self) -> (NodeId, NodeId) {
        (self.source, self.target)
    }
}

impl From<&GraphEdge> for Cable {
    fn from(edge: &GraphEdge) -> Self {
        Self::new(edge.source(), edge.target(), edge.weight())
    }
}

impl From<&TopologyEdge> for Cable {
    #[expect(
        clippy::cast_precision_loss,
        reason = "floored cable lengths are far below 2^52"
    )]
    fn from(edge: &TopologyEdge) -> Self {
        Self::new(edge.source(), edge.target(), edge.weight() as f64)
    }
}

/// Outcome of a crossing check.
#[derive(Clone, Debug, PartialEq)]
pub struct CrossingReport {
    strategy: CrossingStrategy,
    cables_checked: usize,
    crossing: Option<(Cable, Cable)>,
}

impl CrossingReport {
    /// The strategy that produced the report.
    #[must_use]
    #[rustfmt::skip]
    pub const fn strategy(&self) -> CrossingStrategy { self.strategy }

    /// Cables examined before the check finished.
    #[must_use]
    #[rustfmt::skip]
    pub const fn cables_checked(&self) -> usize { self.cables_checked }

    /// The first offending pair, if any.
    #[must_use]
    #[rustfmt::skip]
    pub const fn crossing(&self) -> Option<(Cable, Cable)> { self.crossing }

    /// Returns `true` when a crossing (or, for the sweep, an overlap) was
    /// found.
    #[must_use]
    pub const fn has_crossing(&self) -> bool {
        self.crossing.is_some()
    }
}

/// Checks a cable set with the chosen strategy.
///
/// # Errors
/// Returns [`GraphError::NodeNotFound`] when a cable references a site the
/// registry does not know.
///
/// # Examples
/// ```
/// use windpark_core::{Cable, CrossingStrategy, NodeId, Position, TurbineRegistry, check_cables};
///
/// let mut registry = TurbineRegistry::new(1.0);
/// for (x, y) in [(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0)] {
///     registry.register(Position::new(x, y));
/// }
/// let diagonals = [
///     Cable::new(NodeId::turbine(0), NodeId::turbine(1), 14.1),
///     Cable::new(NodeId::turbine(2), NodeId::turbine(3), 14.1),
/// ];
/// let report = check_cables(&registry, &diagonals, CrossingStrategy::ExactPairwise)?;
/// assert!(report.has_crossing());
/// # Ok::<(), windpark_core::GraphError>(())
/// ```
#[instrument(
    name = "core.check_cables",
    err,
    skip(registry, cables),
    fields(cables = cables.len(), sites = registry.sites().count(), strategy = ?strategy),
)]
pub fn check_cables(
    registry: &TurbineRegistry,
    cables: &[Cable],
    strategy: CrossingStrategy,
) -> Result<CrossingReport, GraphError> {
    let segments = CableSegments::resolve(registry, cables)?;
    let report = match strategy {
        CrossingStrategy::SweepBoundingBox => sweep(registry, &segments),
        CrossingStrategy::ExactPairwise => pairwise(&segments),
    };
    if let Some((first, second)) = report.crossing {
        debug!(?first, ?second, "cable crossing detected");
    }
    Ok(report)
}

/// Returns `true` when the straight cable `a`–`b` properly crosses the
/// segment between any two other registered sites.
///
/// This is the exhaustive O(n²) test a single candidate cable is subjected
/// to; it stops at the first crossing found.
///
/// # Errors
/// Returns [`GraphError::NodeNotFound`] when `a` or `b` is not registered.
pub fn crosses_any_pair(
    registry: &TurbineRegistry,
    a: NodeId,
    b: NodeId,
) -> Result<bool, GraphError> {
    let cable = Segment::new(position_of(registry, a)?, position_of(registry, b)?);
    let others: Vec<Position> = registry
        .sites()
        .filter_map(|(node, position)| (node != a && node != b).then_some(position))
        .collect();
    Ok(others.iter().enumerate().any(|(index, &c)| {
        others
            .iter()
            .skip(index + 1)
            .any(|&d| cable.properly_intersects(&Segment::new(c, d)))
    }))
}

fn position_of(registry: &TurbineRegistry, node: NodeId) -> Result<Position, GraphError> {
    registry
        .position(node)
        .ok_or(GraphError::NodeNotFound { node })
}

/// Cables paired with their resolved geometry.
struct CableSegments {
    cables: Vec<(Cable, Segment)>,
    by_endpoints: HashMap<(NodeId, NodeId), usize>,
}

impl CableSegments {
    fn resolve(registry: &TurbineRegistry, cables: &[Cable]) -> Result<Self, GraphError> {
        let mut resolved = Vec::with_capacity(cables.len());
        let mut by_endpoints = HashMap::with_capacity(cables.len());
        for cable in cables {
            let segment = Segment::new(
                position_of(registry, cable.source)?,
                position_of(registry, cable.target)?,
            );
            by_endpoints.entry(cable.key()).or_insert(resolved.len());
            resolved.push((*cable, segment));
        }
        Ok(Self {
            cables: resolved,
            by_endpoints,
        })
    }

    fn between(&self, left: NodeId, right: NodeId) -> Option<(Cable, Segment)> {
        let key = Cable::new(left, right, 0.0).key();
        self.by_endpoints
            .get(&key)
            .and_then(|&slot| self.cables.get(slot))
            .copied()
    }
}

fn sweep(registry: &TurbineRegistry, segments: &CableSegments) -> CrossingReport {
    let mut sites: Vec<(NodeId, Position)> = registry.sites().collect();
    sites.sort_by(|left, right| left.1.x().total_cmp(&right.1.x()));

    let mut seen: Vec<(Cable, Segment)> = Vec::with_capacity(sites.len());
    for (index, &(node, _)) in sites.iter().enumerate() {
        let left = index
            .checked_sub(1)
            .and_then(|slot| sites.get(slot))
            .and_then(|&(neighbour, _)| segments.between(node, neighbour));
        let right = sites
            .get(index + 1)
            .and_then(|&(neighbour, _)| segments.between(node, neighbour));

        let picked = match (left, right) {
            (None, None) => continue,
            (Some(only), None) | (None, Some(only)) => only,
            (Some(left), Some(right)) => {
                if left.0.weight < right.0.weight {
                    left
                } else {
                    right
                }
            }
        };

        let bounds = picked.1.bounding_box();
        let hit = seen.iter().find(|(earlier, segment)| {
            !picked.0.shares_endpoint(earlier) && bounds.overlaps(&segment.bounding_box())
        });
        if let Some(&(earlier, _)) = hit {
            return CrossingReport {
                strategy: CrossingStrategy::SweepBoundingBox,
                cables_checked: seen.len() + 1,
                crossing: Some((earlier, picked.0)),
            };
        }
        seen.push(picked);
    }

    CrossingReport {
        strategy: CrossingStrategy::SweepBoundingBox,
        cables_checked: seen.len(),
        crossing: None,
    }
}

fn pairwise(segments: &CableSegments) -> CrossingReport {
    for (index, (cable, segment)) in segments.cables.iter().enumerate() {
        let hit = segments.cables.iter().skip(index + 1).find(|(other, other_segment)| {
            !cable.shares_endpoint(other) && segment.properly_intersects(other_segment)
        });
        if let Some(&(other, _)) = hit {
            return CrossingReport {
                strategy: CrossingStrategy::ExactPairwise,
                cables_checked: index + 1,
                crossing: Some((*cable, other)),
            };
        }
    }

    CrossingReport {
        strategy: CrossingStrategy::ExactPairwise,
        cables_checked: segments.cables.len(),
        crossing: None,
    }
}

#[cfg(test)]
mod tests;

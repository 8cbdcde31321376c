//! Turbine registry with a minimum-spacing admission rule.
//!
//! Placement is greedy and depends on insertion order: a candidate is judged
//! against every site registered so far, never against the final layout. Two
//! runs that offer the same positions in a different order may keep different
//! turbines.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::geometry::Position;
use crate::graph::NodeId;

/// Identifier assigned to a turbine when it is registered.
///
/// Identifiers are sequential from zero in registration order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TurbineId(usize);

impl TurbineId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    #[rustfmt::skip]
    pub const fn get(self) -> usize { self.0 }
}

impl fmt::Display for TurbineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// A placed turbine. Immutable once registered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Turbine {
    id: TurbineId,
    position: Position,
}

impl Turbine {
    /// The turbine's identifier.
    #[must_use]
    #[rustfmt::skip]
    pub const fn id(&self) -> TurbineId { self.id }

    /// The turbine's position.
    #[must_use]
    #[rustfmt::skip]
    pub const fn position(&self) -> Position { self.position }
}

/// Result of offering a site to the registry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// The site was registered under this node id.
    Accepted(NodeId),
    /// The site is closer than the minimum spacing to `conflict`.
    Rejected {
        /// First registered site found inside the exclusion radius.
        conflict: NodeId,
        /// Distance to that site.
        distance: f64,
    },
    /// A coordinate of the offered site is NaN or infinite.
    NonFinite(Position),
}

impl Placement {
    /// Returns the registered node when the placement was accepted.
    #[must_use]
    pub const fn accepted(self) -> Option<NodeId> {
        match self {
            Self::Accepted(node) => Some(node),
            Self::Rejected { .. } | Self::NonFinite(_) => None,
        }
    }

    /// Returns `true` when the site was registered.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Holds placed turbines (and at most one substation) and enforces spacing.
#[derive(Clone, Debug)]
pub struct TurbineRegistry {
    min_spacing: f64,
    turbines: Vec<Turbine>,
    slots: HashMap<TurbineId, usize>,
    substation: Option<Position>,
}

impl TurbineRegistry {
    /// Creates an empty registry rejecting sites closer than `min_spacing`.
    #[must_use]
    pub fn new(min_spacing: f64) -> Self {
        Self {
            min_spacing,
            turbines: Vec::new(),
            slots: HashMap::new(),
            substation: None,
        }
    }

    /// Minimum distance enforced between any two sites.
    #[must_use]
    #[rustfmt::skip]
    pub const fn min_spacing(&self) -> f64 { self.min_spacing }

    /// Offers a turbine site.
    ///
    /// On acceptance the next sequential [`TurbineId`] is assigned. A
    /// rejected site, including one with a non-finite coordinate, leaves the
    /// registry untouched.
    ///
    /// # Examples
    /// ```
    /// use windpark_core::{NodeId, Position, TurbineId, TurbineRegistry};
    ///
    /// let mut registry = TurbineRegistry::new(390.0);
    /// let first = registry.register(Position::new(0.0, 0.0));
    /// assert_eq!(first.accepted(), Some(NodeId::Turbine(TurbineId::new(0))));
    /// assert!(!registry.register(Position::new(100.0, 0.0)).is_accepted());
    /// assert_eq!(registry.len(), 1);
    /// assert!(!registry.register(Position::new(f64::NAN, 0.0)).is_accepted());
    /// ```
    pub fn register(&mut self, position: Position) -> Placement {
        if !position.is_finite() {
            debug!(?position, "turbine rejected: non-finite position");
            return Placement::NonFinite(position);
        }
        if let Some((conflict, distance)) = self.conflict_with(position) {
            debug!(%conflict, distance, "turbine rejected by spacing rule");
            return Placement::Rejected { conflict, distance };
        }

        let id = TurbineId::new(self.turbines.len());
        self.slots.insert(id, self.turbines.len());
        self.turbines.push(Turbine { id, position });
        Placement::Accepted(NodeId::Turbine(id))
    }

    /// Offers the single substation site.
    ///
    /// Returns `None` when a substation is already registered.
    pub fn register_substation(&mut self, position: Position) -> Option<Placement> {
        if self.substation.is_some() {
            return None;
        }
        if !position.is_finite() {
            debug!(?position, "substation rejected: non-finite position");
            return Some(Placement::NonFinite(position));
        }
        if let Some((conflict, distance)) = self.conflict_with(position) {
            debug!(%conflict, distance, "substation rejected by spacing rule");
            return Some(Placement::Rejected { conflict, distance });
        }
        self.substation = Some(position);
        Some(Placement::Accepted(NodeId::Substation))
    }

    /// Looks up a turbine by id.
    #[must_use]
    pub fn get(&self, id: TurbineId) -> Option<&Turbine> {
        self.slots.get(&id).and_then(|&slot| self.turbines.get(slot))
    }

    /// Position of any registered node.
    #[must_use]
    pub fn position(&self, node: NodeId) -> Option<Position> {
        match node {
            NodeId::Turbine(id) => self.get(id).map(Turbine::position),
            NodeId::Substation => self.substation,
        }
    }

    /// Returns `true` when `node` is registered.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.position(node).is_some()
    }

    /// Registered turbines in registration order.
    pub fn turbines(&self) -> impl Iterator<Item = &Turbine> {
        self.turbines.iter()
    }

    /// Every registered site (turbines, then the substation if any).
    pub fn sites(&self) -> impl Iterator<Item = (NodeId, Position)> + '_ {
        self.turbines
            .iter()
            .map(|turbine| (NodeId::Turbine(turbine.id), turbine.position))
            .chain(self.substation.map(|position| (NodeId::Substation, position)))
    }

    /// Number of registered turbines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turbines.len()
    }

    /// Returns `true` when no turbine is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turbines.is_empty()
    }

    /// Returns `true` once a substation has been registered.
    #[must_use]
    pub const fn has_substation(&self) -> bool {
        self.substation.is_some()
    }

    fn conflict_with(&self, position: Position) -> Option<(NodeId, f64)> {
        self.sites().find_map(|(node, existing)| {
            let distance = existing.distance(position);
            (distance < self.min_spacing).then_some((node, distance))
        })
    }
}

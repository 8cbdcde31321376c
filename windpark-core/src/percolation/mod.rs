//! Robustness estimate under random node failure.
//!
//! The simulator removes nodes uniformly at random from a private copy of
//! the topology, recording the size of the largest connected component after
//! each removal. The caller's topology is never modified.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument, warn};

use crate::analysis::{Topology, largest_component_size};
use crate::graph::NodeId;

/// Measurements gathered during a percolation run.
#[derive(Clone, Debug, PartialEq)]
pub struct PercolationRun {
    original_node_count: usize,
    removed: Vec<NodeId>,
    largest_components: Vec<usize>,
    ratio: f64,
}

impl PercolationRun {
    /// Node count of the topology before any removal.
    #[must_use]
    #[rustfmt::skip]
    pub const fn original_node_count(&self) -> usize { self.original_node_count }

    /// Removed nodes in removal order.
    #[must_use]
    #[rustfmt::skip]
    pub fn removed(&self) -> &[NodeId] { &self.removed }

    /// Largest component size recorded after each removal.
    #[must_use]
    #[rustfmt::skip]
    pub fn largest_components(&self) -> &[usize] { &self.largest_components }

    /// Largest recorded component divided by the original node count.
    #[must_use]
    #[rustfmt::skip]
    pub const fn ratio(&self) -> f64 { self.ratio }
}

/// Result of [`percolate`].
#[derive(Clone, Debug, PartialEq)]
pub enum PercolationOutcome {
    /// Every requested removal was performed.
    Completed(PercolationRun),
    /// The working copy ran out of nodes first.
    NetworkFailed {
        /// Removals performed before no node remained.
        removals_completed: usize,
        /// Measurements up to the failure.
        run: PercolationRun,
    },
}

impl PercolationOutcome {
    /// The measurements, whichever way the run ended.
    #[must_use]
    pub const fn run(&self) -> &PercolationRun {
        match self {
            Self::Completed(run) | Self::NetworkFailed { run, .. } => run,
        }
    }

    /// The percolation ratio, whichever way the run ended.
    #[must_use]
    pub const fn ratio(&self) -> f64 {
        self.run().ratio()
    }

    /// Returns `true` when the network was exhausted early.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::NetworkFailed { .. })
    }
}

/// Removes up to `removals` random nodes from a copy of `topology`.
///
/// The ratio is the largest component recorded after any removal over the
/// original node count. A run that leaves no node standing, whether the
/// working copy empties early or on the last requested removal, is reported
/// as [`PercolationOutcome::NetworkFailed`]. With no removals it is the intact largest component
/// over the node count (`1.0` for a connected topology); an empty topology
/// scores `0.0`.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use windpark_core::{NodeId, PercolationOutcome, Topology, percolate};
///
/// let path = Topology::from_edges((1..4).map(|n| (NodeId::turbine(n - 1), NodeId::turbine(n))));
/// let mut rng = SmallRng::seed_from_u64(7);
///
/// let intact = percolate(&path, 0, &mut rng);
/// assert_eq!(intact.ratio(), 1.0);
///
/// let exhausted = percolate(&path, 10, &mut rng);
/// assert!(matches!(exhausted, PercolationOutcome::NetworkFailed { removals_completed: 4, .. }));
///
/// let emptied = percolate(&path, 4, &mut rng);
/// assert!(emptied.is_failure());
/// assert_eq!(path.node_count(), 4);
/// ```
#[instrument(
    name = "core.percolate",
    skip(topology, rng),
    fields(nodes = topology.node_count()),
)]
pub fn percolate<R>(topology: &Topology, removals: usize, rng: &mut R) -> PercolationOutcome
where
    R: Rng + ?Sized,
{
    let original_node_count = topology.node_count();
    let mut working = topology.clone();
    let mut removed = Vec::with_capacity(removals.min(original_node_count));
    let mut largest_components = Vec::with_capacity(removals.min(original_node_count));

    for step in 0..removals {
        let Some(&victim) = working.nodes().choose(rng) else {
            return network_failed(original_node_count, step, removals, removed, largest_components);
        };
        working.remove_node(victim);
        let largest = largest_component_size(&working);
        debug!(%victim, largest, "node removed");
        removed.push(victim);
        largest_components.push(largest);
    }

    // The last requested removal took the last node.
    if removals > 0 && working.is_empty() {
        return network_failed(original_node_count, removals, removals, removed, largest_components);
    }

    let intact = (removals == 0).then(|| largest_component_size(topology));
    PercolationOutcome::Completed(finish(
        original_node_count,
        removed,
        largest_components,
        intact,
    ))
}

fn network_failed(
    original_node_count: usize,
    removals_completed: usize,
    requested: usize,
    removed: Vec<NodeId>,
    largest_components: Vec<usize>,
) -> PercolationOutcome {
    warn!(removals_completed, requested, "network failed");
    PercolationOutcome::NetworkFailed {
        removals_completed,
        run: finish(original_node_count, removed, largest_components, None),
    }
}

#[expect(clippy::cast_precision_loss, reason = "node counts are small")]
fn finish(
    original_node_count: usize,
    removed: Vec<NodeId>,
    largest_components: Vec<usize>,
    intact: Option<usize>,
) -> PercolationRun {
    let peak = intact
        .or_else(|| largest_components.iter().copied().max())
        .unwrap_or(0);
    let ratio = if original_node_count == 0 {
        0.0
    } else {
        peak as f64 / original_node_count as f64
    };
    PercolationRun {
        original_node_count,
        removed,
        largest_components,
        ratio,
    }
}

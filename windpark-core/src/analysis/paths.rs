//! Connectivity and shortest-path metrics (hop counts).

use crate::error::AnalysisError;
use crate::graph::NodeId;

use super::{Indexed, Topology};

/// Connected components, each listed in natural order. Components are
/// ordered by their first node.
#[must_use]
pub fn connected_components(topology: &Topology) -> Vec<Vec<NodeId>> {
    let indexed = topology.indexed();
    component_slots(&indexed)
        .into_iter()
        .map(|slots| slots.into_iter().map(|slot| indexed.nodes[slot]).collect())
        .collect()
}

/// Size of the largest connected component; zero for an empty topology.
#[must_use]
pub fn largest_component_size(topology: &Topology) -> usize {
    component_slots(&topology.indexed())
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
}

/// Returns `true` when the topology is non-empty and forms one component.
#[must_use]
pub fn is_connected(topology: &Topology) -> bool {
    !topology.is_empty() && component_slots(&topology.indexed()).len() == 1
}

/// Greatest hop distance from each node to any other node.
///
/// # Errors
/// Returns [`AnalysisError::EmptyTopology`] or
/// [`AnalysisError::Disconnected`]; eccentricity is infinite otherwise.
pub fn eccentricity(topology: &Topology) -> Result<Vec<(NodeId, usize)>, AnalysisError> {
    let indexed = connected_index(topology)?;
    Ok((0..indexed.len())
        .map(|source| {
            let farthest = indexed
                .distances_from(source)
                .into_iter()
                .flatten()
                .max()
                .unwrap_or(0);
            (indexed.nodes[source], farthest)
        })
        .collect())
}

/// Maximum eccentricity.
///
/// # Errors
/// Same conditions as [`eccentricity`].
///
/// # Examples
/// ```
/// use windpark_core::{NodeId, Topology, diameter, radius};
///
/// let path = Topology::from_edges((1..5).map(|n| (NodeId::turbine(n - 1), NodeId::turbine(n))));
/// assert_eq!(diameter(&path)?, 4);
/// assert_eq!(radius(&path)?, 2);
/// # Ok::<(), windpark_core::AnalysisError>(())
/// ```
pub fn diameter(topology: &Topology) -> Result<usize, AnalysisError> {
    Ok(eccentricity(topology)?
        .into_iter()
        .map(|(_, value)| value)
        .max()
        .unwrap_or(0))
}

/// Minimum eccentricity.
///
/// # Errors
/// Same conditions as [`eccentricity`].
pub fn radius(topology: &Topology) -> Result<usize, AnalysisError> {
    Ok(eccentricity(topology)?
        .into_iter()
        .map(|(_, value)| value)
        .min()
        .unwrap_or(0))
}

/// Nodes whose eccentricity equals the radius, in natural order.
///
/// # Errors
/// Same conditions as [`eccentricity`].
pub fn center(topology: &Topology) -> Result<Vec<NodeId>, AnalysisError> {
    let eccentricities = eccentricity(topology)?;
    let radius = eccentricities
        .iter()
        .map(|&(_, value)| value)
        .min()
        .unwrap_or(0);
    Ok(eccentricities
        .into_iter()
        .filter_map(|(node, value)| (value == radius).then_some(node))
        .collect())
}

/// Mean hop distance over all ordered pairs of distinct nodes; `0.0` for a
/// single node.
///
/// # Errors
/// Returns [`AnalysisError::EmptyTopology`] or
/// [`AnalysisError::Disconnected`].
#[expect(
    clippy::cast_precision_loss,
    reason = "pair counts and hop sums stay far below 2^52"
)]
pub fn average_shortest_path_length(topology: &Topology) -> Result<f64, AnalysisError> {
    let indexed = connected_index(topology)?;
    let n = indexed.len();
    if n == 1 {
        return Ok(0.0);
    }
    let total: usize = (0..n)
        .map(|source| indexed.distances_from(source).into_iter().flatten().sum::<usize>())
        .sum();
    Ok(total as f64 / (n * (n - 1)) as f64)
}

fn connected_index(topology: &Topology) -> Result<Indexed<'_>, AnalysisError> {
    if topology.is_empty() {
        return Err(AnalysisError::EmptyTopology);
    }
    let indexed = topology.indexed();
    let components = component_slots(&indexed).len();
    if components > 1 {
        return Err(AnalysisError::Disconnected { components });
    }
    Ok(indexed)
}

/// Components as sorted slot lists, ordered by their smallest slot.
pub(super) fn component_slots(indexed: &Indexed<'_>) -> Vec<Vec<usize>> {
    let mut assigned = vec![false; indexed.len()];
    let mut components = Vec::new();
    for start in 0..indexed.len() {
        if assigned[start] {
            continue;
        }
        let members: Vec<usize> = indexed
            .distances_from(start)
            .into_iter()
            .enumerate()
            .filter_map(|(slot, distance)| distance.map(|_| slot))
            .collect();
        for &slot in &members {
            assigned[slot] = true;
        }
        components.push(members);
    }
    components
}

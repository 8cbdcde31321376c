//! Shared helpers for `windpark-core` unit tests.

use proptest::test_runner::Config as ProptestConfig;
use windpark_test_support::ci::property_test_profile::ProptestRunProfile;

use crate::analysis::Topology;
use crate::graph::NodeId;

/// Builds a proptest configuration from the shared CI profile so every suite
/// honours `PROGTEST_CASES` and `WINDPARK_PBT_FORK` the same way.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Shorthand for a turbine node.
pub(crate) const fn t(raw: usize) -> NodeId {
    NodeId::turbine(raw)
}

/// Topology over turbines `0..` built from raw index pairs.
pub(crate) fn topology(edges: &[(usize, usize)]) -> Topology {
    Topology::from_edges(edges.iter().map(|&(left, right)| (t(left), t(right))))
}

/// Star with `leaves` spokes around turbine 0.
pub(crate) fn star(leaves: usize) -> Topology {
    let spokes: Vec<_> = (1..=leaves).map(|leaf| (0, leaf)).collect();
    topology(&spokes)
}

/// Path `0 - 1 - ... - (len - 1)`.
pub(crate) fn path(len: usize) -> Topology {
    let links: Vec<_> = (1..len).map(|node| (node - 1, node)).collect();
    topology(&links)
}

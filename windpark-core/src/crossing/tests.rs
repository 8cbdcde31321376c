use rstest::{fixture, rstest};

use crate::error::GraphError;
use crate::geometry::Position;
use crate::graph::NodeId;
use crate::registry::TurbineRegistry;
use crate::test_utils::t;

use super::*;

fn registry_at(sites: &[(f64, f64)]) -> TurbineRegistry {
    let mut registry = TurbineRegistry::new(1.0);
    for &(x, y) in sites {
        assert!(
            registry.register(Position::new(x, y)).is_accepted(),
            "fixture site ({x}, {y}) must be accepted"
        );
    }
    registry
}

/// Geometric cable between two registered turbines.
fn cable(registry: &TurbineRegistry, left: usize, right: usize) -> Cable {
    let length = registry
        .position(t(left))
        .zip(registry.position(t(right)))
        .map_or(0.0, |(a, b)| a.distance(b));
    Cable::new(t(left), t(right), length)
}

/// Two parallel cables whose bounding boxes touch at x = 5.
///
/// ```text
///   1 (5,10)     3 (10,10)
///  /            /
/// 0 (0,0)      2 (5,0)
/// ```
#[fixture]
fn parallel() -> TurbineRegistry {
    registry_at(&[(0.0, 0.0), (5.0, 10.0), (5.0, 0.0), (10.0, 10.0)])
}

#[fixture]
fn diagonals() -> TurbineRegistry {
    registry_at(&[(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0)])
}

#[rstest]
fn exact_detects_crossing_diagonals(diagonals: TurbineRegistry) -> Result<(), GraphError> {
    let cables = [cable(&diagonals, 0, 1), cable(&diagonals, 2, 3)];
    let report = check_cables(&diagonals, &cables, CrossingStrategy::ExactPairwise)?;
    assert!(report.has_crossing());
    assert_eq!(report.crossing(), Some((cables[0], cables[1])));
    assert_eq!(report.strategy(), CrossingStrategy::ExactPairwise);
    Ok(())
}

#[rstest]
#[case::disjoint(&[(0.0, 0.0), (1.0, 1.0), (5.0, 5.0), (6.0, 6.0)])]
#[case::collinear(&[(0.0, 0.0), (4.0, 0.0), (5.0, 0.0), (9.0, 0.0)])]
#[case::parallel(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0), (4.0, 3.0)])]
fn exact_clears_non_crossing_pairs(#[case] sites: &[(f64, f64)]) -> Result<(), GraphError> {
    let registry = registry_at(sites);
    let cables = [cable(&registry, 0, 1), cable(&registry, 2, 3)];
    let report = check_cables(&registry, &cables, CrossingStrategy::ExactPairwise)?;
    assert!(!report.has_crossing());
    assert_eq!(report.cables_checked(), 2);
    Ok(())
}

#[rstest]
fn cables_meeting_at_a_turbine_do_not_cross(diagonals: TurbineRegistry) -> Result<(), GraphError> {
    let fan = [
        cable(&diagonals, 0, 1),
        cable(&diagonals, 0, 2),
        cable(&diagonals, 0, 3),
    ];
    for strategy in [CrossingStrategy::ExactPairwise, CrossingStrategy::SweepBoundingBox] {
        assert!(!check_cables(&diagonals, &fan, strategy)?.has_crossing());
    }
    Ok(())
}

#[rstest]
fn sweep_flags_touching_boxes_the_exact_test_clears(
    parallel: TurbineRegistry,
) -> Result<(), GraphError> {
    let chain = [
        cable(&parallel, 0, 1),
        cable(&parallel, 1, 2),
        cable(&parallel, 2, 3),
    ];

    let sweep = check_cables(&parallel, &chain, CrossingStrategy::SweepBoundingBox)?;
    assert_eq!(sweep.crossing(), Some((chain[0], chain[2])));

    let exact = check_cables(&parallel, &chain, CrossingStrategy::ExactPairwise)?;
    assert!(!exact.has_crossing());
    Ok(())
}

#[rstest]
fn sweep_prefers_the_cheaper_neighbour_cable(parallel: TurbineRegistry) -> Result<(), GraphError> {
    // Site 1 sits between 0 and 2 in x order; its cable to 2 (length 10) is
    // cheaper than its cable to 0. Site 3 has no neighbour cable at all, so
    // three picks are made and every one shares a site with an earlier pick.
    let cables = [cable(&parallel, 0, 1), cable(&parallel, 1, 2)];
    let report = check_cables(&parallel, &cables, CrossingStrategy::SweepBoundingBox)?;
    assert!(!report.has_crossing());
    assert_eq!(report.cables_checked(), 3);
    Ok(())
}

#[rstest]
fn sweep_skips_sites_without_neighbour_cables(parallel: TurbineRegistry) -> Result<(), GraphError> {
    let report = check_cables(&parallel, &[], CrossingStrategy::SweepBoundingBox)?;
    assert!(!report.has_crossing());
    assert_eq!(report.cables_checked(), 0);
    Ok(())
}

#[rstest]
fn unknown_endpoints_are_reported(diagonals: TurbineRegistry) {
    let stray = [Cable::new(t(0), NodeId::Substation, 1.0)];
    assert_eq!(
        check_cables(&diagonals, &stray, CrossingStrategy::ExactPairwise),
        Err(GraphError::NodeNotFound {
            node: NodeId::Substation
        })
    );
}

#[rstest]
fn crosses_any_pair_checks_every_other_site(diagonals: TurbineRegistry) -> Result<(), GraphError> {
    assert!(crosses_any_pair(&diagonals, t(0), t(1))?);
    // The 0-2 edge lies on the square's boundary.
    assert!(!crosses_any_pair(&diagonals, t(0), t(2))?);
    assert!(crosses_any_pair(&diagonals, t(0), t(9)).is_err());
    Ok(())
}

#[test]
fn cables_are_canonical() {
    let forward = Cable::new(t(1), t(4), 3.0);
    let backward = Cable::new(t(4), t(1), 3.0);
    assert_eq!(forward, backward);
    assert_eq!(forward.source(), t(1));
    assert!(forward.shares_endpoint(&Cable::new(t(4), t(7), 1.0)));
    assert!(!forward.shares_endpoint(&Cable::new(t(2), t(7), 1.0)));
}

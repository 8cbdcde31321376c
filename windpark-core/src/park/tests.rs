use rand::SeedableRng;
use rand::rngs::SmallRng;
use rstest::{fixture, rstest};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use windpark_test_support::tracing::RecordingLayer;

use crate::crossing::{Cable, CrossingStrategy};
use crate::error::GraphError;
use crate::geometry::Position;
use crate::graph::{NodeId, WeightingPolicy};
use crate::mst::Admission;
use crate::registry::Placement;
use crate::test_utils::t;

use super::*;

#[fixture]
fn rng() -> SmallRng {
    SmallRng::seed_from_u64(11)
}

fn park_with(sites: &[(f64, f64)], min_edge_distance: f64, weighting: WeightingPolicy) -> WindPark {
    let mut park = WindPark::new(1.0, min_edge_distance, weighting);
    for &(x, y) in sites {
        assert!(park.place_turbine(Position::new(x, y)).is_accepted());
    }
    park
}

/// Square whose diagonals are the cheapest candidate links.
#[fixture]
fn crossed_square() -> WindPark {
    let mut park = park_with(
        &[(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0)],
        0.0,
        WeightingPolicy::Geometric,
    );
    for (left, right, weight) in [
        (0, 1, 1.0),
        (2, 3, 2.0),
        (0, 2, 5.0),
        (1, 3, 6.0),
        (0, 3, 7.0),
        (1, 2, 8.0),
    ] {
        park.graph
            .set_edge(t(left), t(right), weight)
            .expect("square edges are valid");
    }
    park
}

fn cables(mst: &SpanningTopology) -> Vec<Cable> {
    mst.edges().iter().map(Cable::from).collect()
}

#[test]
fn accepted_sites_become_isolated_nodes() {
    let mut park = WindPark::new(100.0, 3.0, WeightingPolicy::Geometric);
    assert!(park.place_turbine(Position::new(0.0, 0.0)).is_accepted());
    assert_eq!(
        park.place_turbine(Position::new(30.0, 40.0)),
        Placement::Rejected {
            conflict: t(0),
            distance: 50.0,
        }
    );
    assert_eq!(park.graph().node_count(), 1);
    assert_eq!(park.graph().edge_count(), 0);
}

#[rstest]
fn non_finite_sites_never_reach_the_graph(mut rng: SmallRng) -> Result<(), GraphError> {
    let mut park = park_with(&[(0.0, 0.0), (50.0, 0.0)], 0.0, WeightingPolicy::Geometric);
    let placement = park.place_turbine(Position::new(f64::NAN, 10.0));
    assert_eq!(placement.accepted(), None);
    let substation = park.place_substation(Position::new(f64::INFINITY, 0.0))?;
    assert!(!substation.is_accepted());
    assert_eq!(park.graph().node_count(), 2);

    park.connect_all(&mut rng)?;
    assert_eq!(park.graph().edge_count(), 1);
    Ok(())
}

#[test]
fn substation_is_placed_at_most_once() -> Result<(), GraphError> {
    let mut park = WindPark::new(100.0, 3.0, WeightingPolicy::Geometric);
    park.place_turbine(Position::new(0.0, 0.0));

    let too_close = park.place_substation(Position::new(10.0, 0.0))?;
    assert!(!too_close.is_accepted());
    assert!(!park.graph().contains(NodeId::Substation));

    let placed = park.place_substation(Position::new(500.0, 0.0))?;
    assert_eq!(placed.accepted(), Some(NodeId::Substation));
    assert!(park.graph().contains(NodeId::Substation));

    assert_eq!(
        park.place_substation(Position::new(900.0, 0.0)),
        Err(GraphError::SubstationAlreadyPlaced)
    );
    Ok(())
}

#[rstest]
fn connect_skips_short_edges(mut rng: SmallRng) -> Result<(), GraphError> {
    let mut park = park_with(
        &[(0.0, 0.0), (3.0, 0.0), (10.0, 0.0)],
        5.0,
        WeightingPolicy::Geometric,
    );
    assert_eq!(park.connect(t(0), &mut rng)?, 1);
    assert_eq!(park.graph().weight(t(0), t(2)), Some(10.0));
    assert_eq!(park.graph().weight(t(0), t(1)), None);
    Ok(())
}

#[rstest]
fn connect_rejects_unknown_nodes(mut rng: SmallRng) {
    let mut park = park_with(&[(0.0, 0.0), (5.0, 0.0)], 0.0, WeightingPolicy::Geometric);
    assert_eq!(
        park.connect(t(7), &mut rng),
        Err(GraphError::NodeNotFound { node: t(7) })
    );
    assert_eq!(park.graph().edge_count(), 0);
}

#[rstest]
fn reconnecting_overwrites_weights(mut rng: SmallRng) -> Result<(), GraphError> {
    let mut park = park_with(
        &[(0.0, 0.0), (5.0, 0.0), (0.0, 5.0)],
        0.0,
        WeightingPolicy::DEFAULT_RANDOM_COST,
    );
    assert_eq!(park.connect_all(&mut rng)?, 6);
    assert_eq!(park.graph().edge_count(), 3);
    for edge in park.graph().edges() {
        let weight = edge.weight();
        assert!((300.0..=3_000.0).contains(&weight));
        assert_eq!(weight.fract(), 0.0);
    }
    Ok(())
}

#[rstest]
fn plain_kruskal_may_cross_cables(
    crossed_square: WindPark,
) -> Result<(), Box<dyn std::error::Error>> {
    let mst = crossed_square.spanning_topology(Admission::All, CableRouting::AllowCrossings)?;
    assert!(mst.is_spanning_tree());
    assert_eq!(mst.total_weight(), 8);

    let report = crossed_square.check_cables(&cables(&mst), CrossingStrategy::ExactPairwise)?;
    assert!(report.has_crossing());
    Ok(())
}

#[rstest]
fn crossing_aware_routing_vetoes_crossing_edges(
    crossed_square: WindPark,
) -> Result<(), Box<dyn std::error::Error>> {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let mst = tracing::subscriber::with_default(subscriber, || {
        crossed_square.spanning_topology(Admission::All, CableRouting::AvoidCrossings)
    })?;

    assert!(mst.is_spanning_tree());
    assert_eq!(mst.total_weight(), 12);
    let report = crossed_square.check_cables(&cables(&mst), CrossingStrategy::ExactPairwise)?;
    assert!(!report.has_crossing());
    assert!(layer.has_event(Level::DEBUG, "edge vetoed: cable would cross"));
    Ok(())
}

#[rstest]
fn single_cable_check_uses_every_site(crossed_square: WindPark) -> Result<(), GraphError> {
    assert!(crossed_square.cable_crosses_any_pair(t(0), t(1))?);
    assert!(!crossed_square.cable_crosses_any_pair(t(0), t(3))?);
    Ok(())
}

#[test]
fn placement_is_traced() {
    let mut park = WindPark::new(100.0, 3.0, WeightingPolicy::Geometric);
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, || {
        park.place_turbine(Position::new(0.0, 0.0));
        park.place_turbine(Position::new(1.0, 0.0));
    });

    let spans = layer.span_names();
    assert_eq!(
        spans.iter().filter(|name| *name == "core.place_turbine").count(),
        2
    );
    assert!(layer.has_event(Level::DEBUG, "turbine rejected by spacing rule"));
}

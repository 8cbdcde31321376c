use rand::SeedableRng;
use rand::rngs::SmallRng;
use rstest::{fixture, rstest};

use crate::builder::WindParkBuilder;
use crate::error::{GraphError, ScenarioError};
use crate::geometry::Position;
use crate::park::WindPark;

use super::*;

#[fixture]
fn park() -> WindPark {
    WindParkBuilder::new().build().expect("default configuration is valid")
}

#[fixture]
fn rng() -> SmallRng {
    SmallRng::seed_from_u64(87)
}

#[rstest]
fn default_layout_places_every_turbine(mut park: WindPark, mut rng: SmallRng) {
    let report = ScenarioGenerator::default()
        .populate(&mut park, &mut rng)
        .expect("default layout fits the default rectangle");
    assert_eq!(report.placed(), 87);
    assert_eq!(report.attempts(), report.placed() + report.rejected());
    assert!(!report.substation_placed());

    for turbine in park.registry().turbines() {
        let position = turbine.position();
        assert!((1_000.0..10_000.0).contains(&position.x()));
        assert_eq!(position.y().fract(), 0.0);
    }
}

#[rstest]
fn spacing_holds_between_generated_sites(mut park: WindPark, mut rng: SmallRng) {
    let config = ScenarioConfig::default()
        .with_turbine_count(30)
        .with_substation(true);
    let report = ScenarioGenerator::new(config)
        .populate(&mut park, &mut rng)
        .expect("thirty sites fit");
    assert!(report.substation_placed());

    let sites: Vec<Position> = park.registry().sites().map(|(_, position)| position).collect();
    assert_eq!(sites.len(), 31);
    for (index, first) in sites.iter().enumerate() {
        for second in sites.iter().skip(index + 1) {
            assert!(first.distance(*second) >= park.min_spacing());
        }
    }
}

#[rstest]
fn budget_exhaustion_is_an_error(mut park: WindPark, mut rng: SmallRng) {
    // A 100 m square holds exactly one site at the default 390 m spacing.
    let config = ScenarioConfig::default()
        .with_x_range(0.0, 100.0)
        .with_y_range(0.0, 100.0)
        .with_turbine_count(2)
        .with_max_attempts(25);
    assert_eq!(
        ScenarioGenerator::new(config).populate(&mut park, &mut rng),
        Err(ScenarioError::PlacementExhausted {
            placed: 1,
            target: 2,
            attempts: 25,
        })
    );
}

#[rstest]
#[case::empty_x(ScenarioConfig::default().with_x_range(5.0, 5.0))]
#[case::inverted_y(ScenarioConfig::default().with_y_range(10.0, 1.0))]
#[case::infinite(ScenarioConfig::default().with_x_range(0.0, f64::INFINITY))]
fn invalid_bounds_are_rejected(
    mut park: WindPark,
    mut rng: SmallRng,
    #[case] config: ScenarioConfig,
) {
    let result = ScenarioGenerator::new(config).populate(&mut park, &mut rng);
    assert!(matches!(result, Err(ScenarioError::InvalidBounds { .. })));
    assert!(park.registry().is_empty());
}

#[rstest]
fn existing_substation_is_reported(mut park: WindPark, mut rng: SmallRng) {
    park.place_substation(Position::new(0.0, 0.0))
        .expect("first substation is accepted");
    let config = ScenarioConfig::default()
        .with_turbine_count(1)
        .with_substation(true);
    assert_eq!(
        ScenarioGenerator::new(config).populate(&mut park, &mut rng),
        Err(ScenarioError::Graph(GraphError::SubstationAlreadyPlaced))
    );
}

#[test]
fn same_seed_same_layout() {
    let generate = || {
        let mut park = WindParkBuilder::new().build().expect("valid configuration");
        ScenarioGenerator::new(ScenarioConfig::default().with_turbine_count(20))
            .populate(&mut park, &mut SmallRng::seed_from_u64(5))
            .expect("twenty sites fit");
        park.registry()
            .sites()
            .map(|(_, position)| position)
            .collect::<Vec<_>>()
    };
    assert_eq!(generate(), generate());
}

#[rstest]
#[case::empty(0, 4, 0)]
#[case::single_row(1, 4, 4)]
#[case::rectangle(3, 2, 6)]
fn grid_has_rows_times_columns(#[case] rows: usize, #[case] cols: usize, #[case] len: usize) {
    let grid = grid_positions(rows, cols, 400.0);
    assert_eq!(grid.len(), len);
    if let Some(last) = grid.last() {
        assert_eq!(last.x(), (cols - 1) as f64 * 400.0);
        assert_eq!(last.y(), (rows - 1) as f64 * 400.0);
    }
}

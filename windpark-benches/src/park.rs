//! Synthetic parks for benchmarks.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use windpark_core::{
    Admission, Cable, CableRouting, ScenarioConfig, ScenarioGenerator, SpanningTopology, WindPark,
    WindParkBuilder,
};

use crate::error::BenchSetupError;
use crate::params::ParkBenchParams;

/// Generates and fully connects a random park.
///
/// # Errors
/// Returns [`BenchSetupError`] when the park cannot be configured, populated
/// or connected.
pub fn connected_park(params: ParkBenchParams, seed: u64) -> Result<WindPark, BenchSetupError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut park = WindParkBuilder::new()
        .with_weighting(params.weighting)
        .build()?;
    ScenarioGenerator::new(ScenarioConfig::default().with_turbine_count(params.turbine_count))
        .populate(&mut park, &mut rng)?;
    park.connect_all(&mut rng)?;
    Ok(park)
}

/// Computes the spanning topology of `park` and returns its cables.
///
/// # Errors
/// Returns [`BenchSetupError::Mst`] when the topology cannot be computed.
pub fn topology_cables(
    park: &WindPark,
    routing: CableRouting,
) -> Result<Vec<Cable>, BenchSetupError> {
    let mst: SpanningTopology = park.spanning_topology(Admission::All, routing)?;
    Ok(mst.edges().iter().map(Cable::from).collect())
}

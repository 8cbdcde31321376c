use rand::SeedableRng;
use rand::rngs::SmallRng;
use windpark_core::{Position, WindPark, WindParkBuilder};

/// Seeded generator shared by the integration suites.
#[must_use]
pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Default-configured park holding every site in `sites`, fully connected.
///
/// # Panics
/// Panics when a site is rejected or the graph cannot be connected.
#[must_use]
pub fn connected_park(sites: &[Position], seed: u64) -> WindPark {
    let mut park = WindParkBuilder::new()
        .build()
        .expect("default configuration is valid");
    for &site in sites {
        assert!(
            park.place_turbine(site).is_accepted(),
            "site {site:?} must respect the spacing rule"
        );
    }
    park.connect_all(&mut rng(seed))
        .expect("every registered site can be connected");
    park
}

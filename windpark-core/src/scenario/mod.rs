//! Synthetic park layouts.
//!
//! [`ScenarioGenerator`] reproduces the random park generator: positions are
//! drawn uniformly inside a rectangle, floored to whole metres, and offered to
//! the park until the requested number of turbines is accepted.
//! [`grid_positions`] produces deterministic layouts for tests and benches.

use rand::Rng;
use tracing::{info, instrument};

use crate::error::ScenarioError;
use crate::geometry::Position;
use crate::park::WindPark;

/// Parameters of a random layout.
///
/// # Examples
/// ```
/// use windpark_core::ScenarioConfig;
///
/// let config = ScenarioConfig::default().with_turbine_count(10).with_substation(true);
/// assert_eq!(config.turbine_count(), 10);
/// assert_eq!(config.x_range(), (1_000.0, 10_000.0));
/// assert!(config.substation());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScenarioConfig {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    turbine_count: usize,
    substation: bool,
    floor_coordinates: bool,
    max_attempts: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            min_x: 1_000.0,
            max_x: 10_000.0,
            min_y: 1_000.0,
            max_y: 10_000.0,
            turbine_count: 87,
            substation: false,
            floor_coordinates: true,
            max_attempts: 100_000,
        }
    }
}

impl ScenarioConfig {
    /// Sets the half-open x range positions are drawn from.
    #[must_use]
    pub const fn with_x_range(mut self, min: f64, max: f64) -> Self {
        self.min_x = min;
        self.max_x = max;
        self
    }

    /// Sets the half-open y range positions are drawn from.
    #[must_use]
    pub const fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.min_y = min;
        self.max_y = max;
        self
    }

    /// Sets how many turbines to place.
    #[must_use]
    pub const fn with_turbine_count(mut self, count: usize) -> Self {
        self.turbine_count = count;
        self
    }

    /// Requests a synthetic substation after the turbines.
    #[must_use]
    pub const fn with_substation(mut self, substation: bool) -> Self {
        self.substation = substation;
        self
    }

    /// Keeps or drops the fractional part of drawn coordinates.
    #[must_use]
    pub const fn with_floor_coordinates(mut self, floor: bool) -> Self {
        self.floor_coordinates = floor;
        self
    }

    /// Caps the number of positions drawn.
    #[must_use]
    pub const fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Lower and upper x bound.
    #[must_use]
    #[rustfmt::skip]
    pub const fn x_range(&self) -> (f64, f64) { (self.min_x, self.max_x) }

    /// Lower and upper y bound.
    #[must_use]
    #[rustfmt::skip]
    pub const fn y_range(&self) -> (f64, f64) { (self.min_y, self.max_y) }

    /// Turbines to place.
    #[must_use]
    #[rustfmt::skip]
    pub const fn turbine_count(&self) -> usize { self.turbine_count }

    /// Whether a substation is placed.
    #[must_use]
    #[rustfmt::skip]
    pub const fn substation(&self) -> bool { self.substation }

    /// Whether coordinates are floored.
    #[must_use]
    #[rustfmt::skip]
    pub const fn floor_coordinates(&self) -> bool { self.floor_coordinates }

    /// Attempt budget.
    #[must_use]
    #[rustfmt::skip]
    pub const fn max_attempts(&self) -> usize { self.max_attempts }

    fn validate(&self) -> Result<(), ScenarioError> {
        let finite = [self.min_x, self.max_x, self.min_y, self.max_y]
            .iter()
            .all(|bound| bound.is_finite());
        if finite && self.min_x < self.max_x && self.min_y < self.max_y {
            return Ok(());
        }
        Err(ScenarioError::InvalidBounds {
            min_x: self.min_x,
            max_x: self.max_x,
            min_y: self.min_y,
            max_y: self.max_y,
        })
    }
}

/// Counters gathered while populating a park.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PopulateReport {
    placed: usize,
    rejected: usize,
    attempts: usize,
    substation_placed: bool,
}

impl PopulateReport {
    /// Turbines accepted.
    #[must_use]
    #[rustfmt::skip]
    pub const fn placed(&self) -> usize { self.placed }

    /// Positions rejected by the spacing rule.
    #[must_use]
    #[rustfmt::skip]
    pub const fn rejected(&self) -> usize { self.rejected }

    /// Positions drawn in total.
    #[must_use]
    #[rustfmt::skip]
    pub const fn attempts(&self) -> usize { self.attempts }

    /// Whether a substation was placed.
    #[must_use]
    #[rustfmt::skip]
    pub const fn substation_placed(&self) -> bool { self.substation_placed }
}

/// Draws random layouts into a [`WindPark`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ScenarioGenerator {
    config: ScenarioConfig,
}

impl ScenarioGenerator {
    /// Creates a generator for `config`.
    #[must_use]
    pub const fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    /// The generator configuration.
    #[must_use]
    #[rustfmt::skip]
    pub const fn config(&self) -> &ScenarioConfig { &self.config }

    /// Offers random positions to `park` until the configured number of
    /// turbines is accepted, then places the substation if requested.
    ///
    /// Turbines and the substation share one attempt budget.
    ///
    /// # Errors
    /// Returns [`ScenarioError::InvalidBounds`] for an empty or non-finite
    /// rectangle, [`ScenarioError::PlacementExhausted`] when the budget runs
    /// out, and [`ScenarioError::Graph`] when the park already holds a
    /// substation.
    ///
    /// # Examples
    /// ```
    /// use rand::SeedableRng;
    /// use rand::rngs::SmallRng;
    /// use windpark_core::{ScenarioConfig, ScenarioGenerator, WindParkBuilder};
    ///
    /// let mut park = WindParkBuilder::new().build()?;
    /// let generator = ScenarioGenerator::new(ScenarioConfig::default().with_turbine_count(12));
    /// let report = generator.populate(&mut park, &mut SmallRng::seed_from_u64(3))?;
    /// assert_eq!(report.placed(), 12);
    /// assert_eq!(park.registry().len(), 12);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[instrument(
        name = "core.populate",
        err,
        skip(self, park, rng),
        fields(turbines = self.config.turbine_count, substation = self.config.substation),
    )]
    pub fn populate<R>(
        &self,
        park: &mut WindPark,
        rng: &mut R,
    ) -> Result<PopulateReport, ScenarioError>
    where
        R: Rng + ?Sized,
    {
        self.config.validate()?;
        let mut report = PopulateReport::default();

        while report.placed < self.config.turbine_count {
            let position = self.draw(&mut report, rng)?;
            if park.place_turbine(position).is_accepted() {
                report.placed += 1;
            } else {
                report.rejected += 1;
            }
        }

        if self.config.substation {
            while !report.substation_placed {
                let position = self.draw(&mut report, rng)?;
                if park.place_substation(position)?.is_accepted() {
                    report.substation_placed = true;
                } else {
                    report.rejected += 1;
                }
            }
        }

        info!(
            placed = report.placed,
            rejected = report.rejected,
            attempts = report.attempts,
            "park populated"
        );
        Ok(report)
    }

    fn draw<R>(&self, report: &mut PopulateReport, rng: &mut R) -> Result<Position, ScenarioError>
    where
        R: Rng + ?Sized,
    {
        if report.attempts >= self.config.max_attempts {
            return Err(ScenarioError::PlacementExhausted {
                placed: report.placed,
                target: self.config.turbine_count,
                attempts: report.attempts,
            });
        }
        report.attempts += 1;
        let x = rng.gen_range(self.config.min_x..self.config.max_x);
        let y = rng.gen_range(self.config.min_y..self.config.max_y);
        Ok(if self.config.floor_coordinates {
            Position::new(x.floor(), y.floor())
        } else {
            Position::new(x, y)
        })
    }
}

/// Row-major grid of `rows * cols` positions spaced `pitch` apart, starting at
/// the origin.
///
/// # Examples
/// ```
/// use windpark_core::{Position, grid_positions};
///
/// let grid = grid_positions(2, 3, 500.0);
/// assert_eq!(grid.len(), 6);
/// assert_eq!(grid[4], Position::new(500.0, 500.0));
/// ```
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "grid indices are small")]
pub fn grid_positions(rows: usize, cols: usize, pitch: f64) -> Vec<Position> {
    (0..rows)
        .flat_map(|row| {
            (0..cols).map(move |col| Position::new(col as f64 * pitch, row as f64 * pitch))
        })
        .collect()
}

#[cfg(test)]
mod tests;

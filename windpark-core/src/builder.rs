//! Builder utilities for configuring a [`WindPark`].
//!
//! Collects the rotor geometry, spacing profile, edge admission distance and
//! weighting policy, and validates them before constructing the park.

use crate::{error::ConfigError, graph::WeightingPolicy, park::WindPark};

/// Minimum turbine spacing expressed as a multiple of the rotor diameter.
///
/// # Examples
/// ```
/// use windpark_core::SpacingProfile;
///
/// assert_eq!(SpacingProfile::Standard.multiple(), 3.0);
/// assert_eq!(SpacingProfile::Wide.multiple(), 4.0);
/// assert_eq!(SpacingProfile::Custom(5.5).multiple(), 5.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpacingProfile {
    /// Three rotor diameters.
    Standard,
    /// Four rotor diameters.
    Wide,
    /// Any other multiple.
    Custom(f64),
}

impl SpacingProfile {
    /// The multiple of the rotor diameter enforced between sites.
    #[must_use]
    pub const fn multiple(self) -> f64 {
        match self {
            Self::Standard => 3.0,
            Self::Wide => 4.0,
            Self::Custom(multiple) => multiple,
        }
    }
}

/// Configures and constructs [`WindPark`] instances.
///
/// # Examples
/// ```
/// use windpark_core::{SpacingProfile, WindParkBuilder};
///
/// let park = WindParkBuilder::new()
///     .with_rotor_diameter(120.0)
///     .with_spacing_profile(SpacingProfile::Wide)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(park.min_spacing(), 480.0);
/// ```
#[derive(Debug, Clone)]
pub struct WindParkBuilder {
    rotor_diameter: f64,
    spacing: SpacingProfile,
    min_edge_distance: f64,
    weighting: WeightingPolicy,
}

impl Default for WindParkBuilder {
    fn default() -> Self {
        Self {
            rotor_diameter: 130.0,
            spacing: SpacingProfile::Standard,
            min_edge_distance: 3.0,
            weighting: WeightingPolicy::Geometric,
        }
    }
}

impl WindParkBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use windpark_core::{SpacingProfile, WeightingPolicy, WindParkBuilder};
    ///
    /// let builder = WindParkBuilder::new();
    /// assert_eq!(builder.rotor_diameter(), 130.0);
    /// assert_eq!(builder.spacing_profile(), SpacingProfile::Standard);
    /// assert_eq!(builder.weighting(), WeightingPolicy::Geometric);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the rotor diameter in metres.
    #[must_use]
    pub const fn with_rotor_diameter(mut self, diameter: f64) -> Self {
        self.rotor_diameter = diameter;
        self
    }

    /// Returns the configured rotor diameter.
    #[must_use]
    pub const fn rotor_diameter(&self) -> f64 {
        self.rotor_diameter
    }

    /// Overrides the spacing profile.
    #[must_use]
    pub const fn with_spacing_profile(mut self, spacing: SpacingProfile) -> Self {
        self.spacing = spacing;
        self
    }

    /// Returns the configured spacing profile.
    #[must_use]
    pub const fn spacing_profile(&self) -> SpacingProfile {
        self.spacing
    }

    /// Sets the distance below which `connect` creates no edge.
    ///
    /// Suppresses degenerate edges between coincident or near-coincident
    /// sites.
    #[must_use]
    pub const fn with_min_edge_distance(mut self, distance: f64) -> Self {
        self.min_edge_distance = distance;
        self
    }

    /// Returns the configured minimum edge distance.
    #[must_use]
    pub const fn min_edge_distance(&self) -> f64 {
        self.min_edge_distance
    }

    /// Selects how edge weights are assigned.
    #[must_use]
    pub const fn with_weighting(mut self, weighting: WeightingPolicy) -> Self {
        self.weighting = weighting;
        self
    }

    /// Returns the configured weighting policy.
    #[must_use]
    pub const fn weighting(&self) -> WeightingPolicy {
        self.weighting
    }

    /// Validates the configuration and constructs an empty [`WindPark`].
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the rotor diameter or spacing multiple is
    /// not a positive finite number, the edge distance is negative or not
    /// finite, or the random cost range is empty.
    pub fn build(self) -> Result<WindPark, ConfigError> {
        if !(self.rotor_diameter.is_finite() && self.rotor_diameter > 0.0) {
            return Err(ConfigError::InvalidRotorDiameter {
                got: self.rotor_diameter,
            });
        }
        let multiple = self.spacing.multiple();
        if !(multiple.is_finite() && multiple > 0.0) {
            return Err(ConfigError::InvalidSpacingMultiple { got: multiple });
        }
        if !(self.min_edge_distance.is_finite() && self.min_edge_distance >= 0.0) {
            return Err(ConfigError::InvalidEdgeDistance {
                got: self.min_edge_distance,
            });
        }
        if let WeightingPolicy::RandomCost { min, max } = self.weighting {
            if min > max {
                return Err(ConfigError::EmptyCostRange { min, max });
            }
        }

        Ok(WindPark::new(
            self.rotor_diameter * multiple,
            self.min_edge_distance,
            self.weighting,
        ))
    }
}

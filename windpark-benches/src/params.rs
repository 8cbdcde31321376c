//! Benchmark parameter types.

use std::fmt;

use windpark_core::WeightingPolicy;

/// Parameters for a park benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct ParkBenchParams {
    /// Turbines placed in the park.
    pub turbine_count: usize,
    /// Edge weighting used by the candidate graph.
    pub weighting: WeightingPolicy,
}

impl fmt::Display for ParkBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weighting = match self.weighting {
            WeightingPolicy::Geometric => "geometric",
            WeightingPolicy::RandomCost { .. } => "random-cost",
        };
        write!(f, "n={},{weighting}", self.turbine_count)
    }
}

//! Benchmark setup error type.

use windpark_core::{ConfigError, GraphError, MstError, ScenarioError};

/// Errors that may occur while preparing a benchmark park.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// The park configuration was rejected.
    #[error("park configuration rejected: {0}")]
    Config(#[from] ConfigError),
    /// Random placement did not reach the requested turbine count.
    #[error("scenario generation failed: {0}")]
    Scenario(#[from] ScenarioError),
    /// Connecting the candidate graph failed.
    #[error("candidate graph construction failed: {0}")]
    Graph(#[from] GraphError),
    /// Spanning topology computation failed.
    #[error("spanning topology failed: {0}")]
    Mst(#[from] MstError),
}

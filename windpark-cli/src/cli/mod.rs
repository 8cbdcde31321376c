//! Command-line interface orchestration for the windpark planner.
//!
//! The `run` command generates a random park, connects it, lays the cable
//! topology, and reports crossings, the aggregation node, and a percolation
//! estimate.

mod commands;

pub use commands::{
    Cli, CliError, Command, CrossingCheck, Policy, RunCommand, RunSummary, Spacing, Weighting,
    render_summary, run_cli,
};

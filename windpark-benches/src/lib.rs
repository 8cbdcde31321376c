//! Benchmark support crate for windpark.
//!
//! Builds connected synthetic parks and their spanning topologies for the
//! Criterion benches of Kruskal and the crossing detector.

pub mod error;
pub mod params;
pub mod park;

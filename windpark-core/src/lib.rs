//! Offshore wind park cable network planning.
//!
//! The crate places turbines under a minimum-spacing rule, derives a weighted
//! candidate graph over the sites, and lays out the collection network as a
//! minimum spanning topology. Around that core it offers cable-crossing
//! checks, aggregation-node (substation) selection from centrality measures,
//! topology diagnostics, and a percolation estimate of robustness under
//! random turbine failure.
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use windpark_core::{
//!     Admission, AggregationSelector, CableRouting, WindParkBuilder, grid_positions, percolate,
//! };
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let mut park = WindParkBuilder::new().build()?;
//! for position in grid_positions(3, 3, 500.0) {
//!     park.place_turbine(position);
//! }
//! park.connect_all(&mut rng)?;
//!
//! let mst = park.spanning_topology(Admission::All, CableRouting::AvoidCrossings)?;
//! assert_eq!(mst.edges().len(), 8);
//!
//! let topology = mst.topology();
//! let choice = AggregationSelector::new().select(&topology)?;
//! assert!(topology.contains(choice.node()));
//!
//! let outcome = percolate(&topology, 2, &mut rng);
//! assert!(outcome.ratio() <= 1.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregation;
mod analysis;
mod builder;
mod crossing;
mod error;
mod geometry;
mod graph;
mod mst;
mod park;
mod percolation;
mod registry;
mod scenario;
#[cfg(test)]
mod test_utils;

pub use crate::{
    aggregation::{
        AggregationChoice, AggregationSelector, CentralityReport, DegreeFloor, SelectionBasis,
        SelectionPolicy,
    },
    analysis::{
        NodeScores, Topology, average_clustering, average_shortest_path_length,
        betweenness_centrality, center, closeness_centrality, clustering, connected_components,
        degree_centrality, diameter, eccentricity, is_connected, largest_component_size,
        local_edge_connectivity, radius, transitivity, tree_edges_are_bridges,
    },
    builder::{SpacingProfile, WindParkBuilder},
    crossing::{Cable, CrossingReport, CrossingStrategy, check_cables, crosses_any_pair},
    error::{
        AnalysisError, AnalysisErrorCode, ConfigError, ConfigErrorCode, DisjointSetError,
        DisjointSetErrorCode, GraphError, GraphErrorCode, MstError, MstErrorCode, Result,
        ScenarioError, ScenarioErrorCode, SelectionError, SelectionErrorCode, WindParkError,
        WindParkErrorCode,
    },
    geometry::{BoundingBox, Position, Segment},
    graph::{CandidateGraph, EdgeUpdate, GraphEdge, NodeId, WeightingPolicy},
    mst::{
        Admission, DisjointSet, SpanningTopology, TopologyEdge, minimum_spanning_topology,
        minimum_spanning_topology_with,
    },
    park::{CableRouting, WindPark},
    percolation::{PercolationOutcome, PercolationRun, percolate},
    registry::{Placement, Turbine, TurbineId, TurbineRegistry},
    scenario::{PopulateReport, ScenarioConfig, ScenarioGenerator, grid_positions},
};

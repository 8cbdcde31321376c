//! Error types for the windpark core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::graph::NodeId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Rejected park configuration, raised by [`crate::WindParkBuilder::build`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Rotor diameter must be finite and strictly positive.
    #[error("rotor diameter must be finite and positive (got {got})")]
    InvalidRotorDiameter {
        /// The rejected diameter in metres.
        got: f64,
    },
    /// Spacing multiple must be finite and strictly positive.
    #[error("spacing multiple must be finite and positive (got {got})")]
    InvalidSpacingMultiple {
        /// The rejected multiple of the rotor diameter.
        got: f64,
    },
    /// Minimum edge distance must be finite and non-negative.
    #[error("minimum edge distance must be finite and non-negative (got {got})")]
    InvalidEdgeDistance {
        /// The rejected distance.
        got: f64,
    },
    /// Random cost range must satisfy `min <= max`.
    #[error("random cost range {min}..={max} is empty")]
    EmptyCostRange {
        /// Lower bound of the rejected range.
        min: u32,
        /// Upper bound of the rejected range.
        max: u32,
    },
}

define_error_codes! {
    /// Stable codes describing [`ConfigError`] variants.
    enum ConfigErrorCode for ConfigError {
        /// Rotor diameter must be finite and strictly positive.
        InvalidRotorDiameter => InvalidRotorDiameter { .. } => "CONFIG_INVALID_ROTOR_DIAMETER",
        /// Spacing multiple must be finite and strictly positive.
        InvalidSpacingMultiple => InvalidSpacingMultiple { .. } => "CONFIG_INVALID_SPACING_MULTIPLE",
        /// Minimum edge distance must be finite and non-negative.
        InvalidEdgeDistance => InvalidEdgeDistance { .. } => "CONFIG_INVALID_EDGE_DISTANCE",
        /// Random cost range must satisfy `min <= max`.
        EmptyCostRange => EmptyCostRange { .. } => "CONFIG_EMPTY_COST_RANGE",
    }
}

/// An error produced while mutating or querying a [`crate::CandidateGraph`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// The referenced node is not registered.
    #[error("node {node} is not registered")]
    NodeNotFound {
        /// The missing node.
        node: NodeId,
    },
    /// Edges must join two distinct nodes.
    #[error("edge ({node}, {node}) would be a self-loop")]
    SelfLoop {
        /// Node referenced at both ends.
        node: NodeId,
    },
    /// Edge weights must be finite and non-negative.
    #[error("edge ({left}, {right}) has invalid weight {weight}")]
    InvalidWeight {
        /// Left endpoint as provided.
        left: NodeId,
        /// Right endpoint as provided.
        right: NodeId,
        /// The rejected weight.
        weight: f64,
    },
    /// A park supports at most one substation node.
    #[error("a substation is already registered")]
    SubstationAlreadyPlaced,
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The referenced node is not registered.
        NodeNotFound => NodeNotFound { .. } => "GRAPH_NODE_NOT_FOUND",
        /// Edges must join two distinct nodes.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// Edge weights must be finite and non-negative.
        InvalidWeight => InvalidWeight { .. } => "GRAPH_INVALID_WEIGHT",
        /// A park supports at most one substation node.
        SubstationAlreadyPlaced => SubstationAlreadyPlaced => "GRAPH_SUBSTATION_ALREADY_PLACED",
    }
}

/// An error produced by [`crate::DisjointSet`] operations.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum DisjointSetError {
    /// `make_set` was called for an element that already has a set.
    #[error("element {node} already belongs to a set")]
    DuplicateElement {
        /// The duplicated element.
        node: NodeId,
    },
    /// The element was never added with `make_set`.
    #[error("element {node} is unknown to the disjoint set")]
    UnknownElement {
        /// The missing element.
        node: NodeId,
    },
}

define_error_codes! {
    /// Stable codes describing [`DisjointSetError`] variants.
    enum DisjointSetErrorCode for DisjointSetError {
        /// `make_set` was called for an element that already has a set.
        DuplicateElement => DuplicateElement { .. } => "DISJOINT_SET_DUPLICATE_ELEMENT",
        /// The element was never added with `make_set`.
        UnknownElement => UnknownElement { .. } => "DISJOINT_SET_UNKNOWN_ELEMENT",
    }
}

/// Errors returned while computing a minimum spanning topology.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MstError {
    /// The admission threshold must be a finite number.
    #[error("admission threshold must be finite (got {threshold})")]
    NonFiniteThreshold {
        /// The rejected threshold.
        threshold: f64,
    },
    /// The disjoint-set bookkeeping failed, indicating a logic error.
    #[error(transparent)]
    DisjointSet(#[from] DisjointSetError),
}

define_error_codes! {
    /// Stable codes describing [`MstError`] variants.
    enum MstErrorCode for MstError {
        /// The admission threshold must be a finite number.
        NonFiniteThreshold => NonFiniteThreshold { .. } => "MST_NON_FINITE_THRESHOLD",
        /// The disjoint-set bookkeeping failed.
        DisjointSet => DisjointSet(..) => "MST_DISJOINT_SET",
    }
}

/// Errors raised by topology analysis routines.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum AnalysisError {
    /// The topology has no nodes.
    #[error("topology contains no nodes")]
    EmptyTopology,
    /// The metric is only defined for connected topologies.
    #[error("topology is disconnected ({components} components)")]
    Disconnected {
        /// Number of connected components found.
        components: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`AnalysisError`] variants.
    enum AnalysisErrorCode for AnalysisError {
        /// The topology has no nodes.
        EmptyTopology => EmptyTopology => "ANALYSIS_EMPTY_TOPOLOGY",
        /// The metric is only defined for connected topologies.
        Disconnected => Disconnected { .. } => "ANALYSIS_DISCONNECTED",
    }
}

/// Errors raised while choosing the aggregation node.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SelectionError {
    /// The topology has no nodes.
    #[error("cannot select an aggregation node from an empty topology")]
    EmptyTopology,
    /// No node passed the configured degree floor.
    #[error("no node reaches the minimum degree of {min_degree}")]
    NoEligibleNode {
        /// The degree every candidate must reach.
        min_degree: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`SelectionError`] variants.
    enum SelectionErrorCode for SelectionError {
        /// The topology has no nodes.
        EmptyTopology => EmptyTopology => "SELECTION_EMPTY_TOPOLOGY",
        /// No node passed the configured degree floor.
        NoEligibleNode => NoEligibleNode { .. } => "SELECTION_NO_ELIGIBLE_NODE",
    }
}

/// Errors raised while generating a scenario.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ScenarioError {
    /// The placement rectangle is empty or not finite.
    #[error("placement bounds x=[{min_x}, {max_x}) y=[{min_y}, {max_y}) are invalid")]
    InvalidBounds {
        /// Lower x bound.
        min_x: f64,
        /// Upper x bound.
        max_x: f64,
        /// Lower y bound.
        min_y: f64,
        /// Upper y bound.
        max_y: f64,
    },
    /// The attempt budget ran out before the target turbine count was placed.
    #[error("placed {placed} of {target} turbines after {attempts} attempts")]
    PlacementExhausted {
        /// Turbines successfully placed.
        placed: usize,
        /// Requested turbine count.
        target: usize,
        /// Attempts consumed.
        attempts: usize,
    },
    /// Registering a generated site failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

define_error_codes! {
    /// Stable codes describing [`ScenarioError`] variants.
    enum ScenarioErrorCode for ScenarioError {
        /// The placement rectangle is empty or not finite.
        InvalidBounds => InvalidBounds { .. } => "SCENARIO_INVALID_BOUNDS",
        /// The attempt budget ran out before the target count was placed.
        PlacementExhausted => PlacementExhausted { .. } => "SCENARIO_PLACEMENT_EXHAUSTED",
        /// Registering a generated site failed.
        Graph => Graph(..) => "SCENARIO_GRAPH",
    }
}

/// Top-level error type for the windpark pipeline.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum WindParkError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Candidate graph failure.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Spanning topology failure.
    #[error(transparent)]
    Mst(#[from] MstError),
    /// Topology analysis failure.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    /// Aggregation node selection failure.
    #[error(transparent)]
    Selection(#[from] SelectionError),
    /// Scenario generation failure.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

define_error_codes! {
    /// Stable codes describing [`WindParkError`] variants.
    enum WindParkErrorCode for WindParkError {
        /// Invalid configuration.
        Config => Config(..) => "WINDPARK_CONFIG",
        /// Candidate graph failure.
        Graph => Graph(..) => "WINDPARK_GRAPH",
        /// Spanning topology failure.
        Mst => Mst(..) => "WINDPARK_MST",
        /// Topology analysis failure.
        Analysis => Analysis(..) => "WINDPARK_ANALYSIS",
        /// Aggregation node selection failure.
        Selection => Selection(..) => "WINDPARK_SELECTION",
        /// Scenario generation failure.
        Scenario => Scenario(..) => "WINDPARK_SCENARIO",
    }
}

impl WindParkError {
    /// Retrieve the code of the wrapped error as a stable string.
    #[must_use]
    pub const fn detail_code(&self) -> &'static str {
        match self {
            Self::Config(error) => error.code().as_str(),
            Self::Graph(error) => error.code().as_str(),
            Self::Mst(error) => error.code().as_str(),
            Self::Analysis(error) => error.code().as_str(),
            Self::Selection(error) => error.code().as_str(),
            Self::Scenario(error) => error.code().as_str(),
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, WindParkError>;

//! Command implementations and argument parsing for the windpark CLI.

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use thiserror::Error;
use tracing::{Span, field, info, instrument};
use windpark_core::{
    Admission, AggregationSelector, Cable, CableRouting, CrossingReport, CrossingStrategy,
    DegreeFloor, NodeId, PercolationOutcome, ScenarioConfig, ScenarioGenerator, SelectionBasis,
    SelectionPolicy, SpacingProfile, WeightingPolicy, WindParkBuilder, WindParkError,
    average_clustering, diameter, percolate,
};

const DEFAULT_SEED: u64 = 42;
const DEFAULT_TURBINES: usize = 87;
const DEFAULT_ROTOR_DIAMETER: f64 = 130.0;
const DEFAULT_MIN_EDGE_DISTANCE: f64 = 3.0;
const DEFAULT_REMOVALS: usize = 10;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "windpark", about = "Plan an offshore wind park cable network.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a park and run the full planning pipeline.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Seed for every random draw of the run.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of turbines to place.
    #[arg(long, default_value_t = DEFAULT_TURBINES)]
    pub turbines: usize,

    /// Rotor diameter in metres.
    #[arg(long = "rotor-diameter", default_value_t = DEFAULT_ROTOR_DIAMETER)]
    pub rotor_diameter: f64,

    /// Minimum spacing as a multiple of the rotor diameter.
    #[arg(long, value_enum, default_value_t = Spacing::Standard)]
    pub spacing: Spacing,

    /// Distance below which no candidate edge is created.
    #[arg(long = "min-edge-distance", default_value_t = DEFAULT_MIN_EDGE_DISTANCE)]
    pub min_edge_distance: f64,

    /// How candidate edges are weighted.
    #[arg(long, value_enum, default_value_t = Weighting::Geometric)]
    pub weighting: Weighting,

    /// Place a synthetic substation after the turbines.
    #[arg(long)]
    pub substation: bool,

    /// Admit only edges strictly longer than this weight.
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Skip edges whose cable would cross an admitted cable.
    #[arg(long = "avoid-crossings")]
    pub avoid_crossings: bool,

    /// Crossing check applied to the finished topology.
    #[arg(long = "crossing-check", value_enum, default_value_t = CrossingCheck::Exact)]
    pub crossing_check: CrossingCheck,

    /// Aggregation node selection policy.
    #[arg(long, value_enum, default_value_t = Policy::Intersection)]
    pub policy: Policy,

    /// Require aggregation candidates to have more than one cable.
    #[arg(long = "require-branching")]
    pub require_branching: bool,

    /// Random turbine removals for the robustness estimate.
    #[arg(long, default_value_t = DEFAULT_REMOVALS)]
    pub removals: usize,
}

/// Spacing profiles exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Spacing {
    /// Three rotor diameters.
    Standard,
    /// Four rotor diameters.
    Wide,
}

/// Edge weighting exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Weighting {
    /// Euclidean distance.
    Geometric,
    /// Uniform integer cost in 300..=3000.
    RandomCost,
}

/// Crossing checks exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CrossingCheck {
    /// Bounding-box sweep over x-neighbour cables.
    Sweep,
    /// Exact pairwise segment intersection.
    Exact,
}

/// Selection policies exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    /// First node present in all three centrality maps.
    Intersection,
    /// First rank at which all three rankings agree.
    Ranked,
}

impl From<Spacing> for SpacingProfile {
    fn from(value: Spacing) -> Self {
        match value {
            Spacing::Standard => Self::Standard,
            Spacing::Wide => Self::Wide,
        }
    }
}

impl From<Weighting> for WeightingPolicy {
    fn from(value: Weighting) -> Self {
        match value {
            Weighting::Geometric => Self::Geometric,
            Weighting::RandomCost => Self::DEFAULT_RANDOM_COST,
        }
    }
}

impl From<CrossingCheck> for CrossingStrategy {
    fn from(value: CrossingCheck) -> Self {
        match value {
            CrossingCheck::Sweep => Self::SweepBoundingBox,
            CrossingCheck::Exact => Self::ExactPairwise,
        }
    }
}

impl From<Policy> for SelectionPolicy {
    fn from(value: Policy) -> Self {
        match value {
            Policy::Intersection => Self::Intersection,
            Policy::Ranked => Self::RankedConsensus,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The planning pipeline failed.
    #[error(transparent)]
    Core(#[from] WindParkError),
}

/// Outcome of a `run` command.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Seed the run used.
    pub seed: u64,
    /// Turbines accepted by the spacing rule.
    pub turbines: usize,
    /// Positions rejected by the spacing rule.
    pub rejected: usize,
    /// Whether a substation was placed.
    pub substation: bool,
    /// Edges in the candidate graph.
    pub candidate_edges: usize,
    /// Edges admitted into the spanning topology.
    pub cables: usize,
    /// Sum of floored cable weights.
    pub total_weight: u64,
    /// Whether the topology is a single spanning tree.
    pub spanning_tree: bool,
    /// Trees in the spanning forest.
    pub components: usize,
    /// Result of the crossing check.
    pub crossing: CrossingReport,
    /// Selected aggregation node, if any node was eligible.
    pub aggregation: Option<(NodeId, SelectionBasis)>,
    /// Hop diameter of a connected topology.
    pub diameter: Option<usize>,
    /// Average clustering of the topology.
    pub average_clustering: Option<f64>,
    /// Robustness estimate.
    pub percolation: PercolationOutcome,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when any pipeline stage fails.
///
/// # Examples
/// ```
/// # use windpark_cli::cli::{Cli, run_cli};
/// # use clap::Parser;
/// let cli = Cli::try_parse_from(["windpark", "run", "--turbines", "8", "--removals", "2"])?;
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.turbines, 8);
/// assert_eq!(summary.cables, 7);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<RunSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(&run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(seed = command.seed, turbines = command.turbines),
)]
pub(super) fn run_command(command: &RunCommand) -> Result<RunSummary, CliError> {
    let summary = plan(command)?;
    info!(
        cables = summary.cables,
        total_weight = summary.total_weight,
        ratio = summary.percolation.ratio(),
        "command completed"
    );
    Ok(summary)
}

fn plan(command: &RunCommand) -> windpark_core::Result<RunSummary> {
    let mut rng = SmallRng::seed_from_u64(command.seed);
    let mut park = WindParkBuilder::new()
        .with_rotor_diameter(command.rotor_diameter)
        .with_spacing_profile(command.spacing.into())
        .with_min_edge_distance(command.min_edge_distance)
        .with_weighting(command.weighting.into())
        .build()?;

    let config = ScenarioConfig::default()
        .with_turbine_count(command.turbines)
        .with_substation(command.substation);
    let placement = ScenarioGenerator::new(config).populate(&mut park, &mut rng)?;
    park.connect_all(&mut rng)?;

    let admission = command.threshold.map_or(Admission::All, Admission::LongerThan);
    let routing = if command.avoid_crossings {
        CableRouting::AvoidCrossings
    } else {
        CableRouting::AllowCrossings
    };
    let mst = park.spanning_topology(admission, routing)?;
    let cables: Vec<Cable> = mst.edges().iter().map(Cable::from).collect();
    let crossing = park.check_cables(&cables, command.crossing_check.into())?;

    let topology = mst.topology();
    let floor = if command.require_branching {
        DegreeFloor::MoreThanOne
    } else {
        DegreeFloor::AtLeastOne
    };
    let aggregation = AggregationSelector::new()
        .with_policy(command.policy.into())
        .with_degree_floor(floor)
        .select(&topology)
        .ok()
        .map(|choice| (choice.node(), choice.basis()));

    Ok(RunSummary {
        seed: command.seed,
        turbines: placement.placed(),
        rejected: placement.rejected(),
        substation: placement.substation_placed(),
        candidate_edges: park.graph().edge_count(),
        cables: mst.edges().len(),
        total_weight: mst.total_weight(),
        spanning_tree: mst.is_spanning_tree(),
        components: mst.component_count(),
        crossing,
        aggregation,
        diameter: diameter(&topology).ok(),
        average_clustering: average_clustering(&topology).ok(),
        percolation: percolate(&topology, command.removals, &mut rng),
    })
}

/// Renders `summary` to `writer` as a plain-text report.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &RunSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "seed: {}", summary.seed)?;
    writeln!(
        writer,
        "turbines: {} placed, {} rejected",
        summary.turbines, summary.rejected
    )?;
    writeln!(writer, "substation: {}", yes_no(summary.substation))?;
    writeln!(writer, "candidate edges: {}", summary.candidate_edges)?;
    writeln!(
        writer,
        "cables: {} (total weight {}, {} component(s), spanning tree: {})",
        summary.cables,
        summary.total_weight,
        summary.components,
        yes_no(summary.spanning_tree)
    )?;
    match summary.crossing.crossing() {
        Some((first, second)) => writeln!(
            writer,
            "crossing: {}-{} with {}-{} ({:?})",
            first.source(),
            first.target(),
            second.source(),
            second.target(),
            summary.crossing.strategy()
        )?,
        None => writeln!(
            writer,
            "crossing: none ({:?})",
            summary.crossing.strategy()
        )?,
    }
    match summary.aggregation {
        Some((node, SelectionBasis::Consensus)) => writeln!(writer, "aggregation node: {node}")?,
        Some((node, SelectionBasis::HighestDegreeFallback)) => {
            writeln!(writer, "aggregation node: {node} (highest degree fallback)")?;
        }
        None => writeln!(writer, "aggregation node: none eligible")?,
    }
    match summary.diameter {
        Some(hops) => writeln!(writer, "diameter: {hops}")?,
        None => writeln!(writer, "diameter: undefined")?,
    }
    if let Some(value) = summary.average_clustering {
        writeln!(writer, "average clustering: {value:.3}")?;
    }
    let run = summary.percolation.run();
    match &summary.percolation {
        PercolationOutcome::Completed(_) => writeln!(
            writer,
            "percolation: ratio {:.3} after {} removal(s)",
            run.ratio(),
            run.removed().len()
        )?,
        PercolationOutcome::NetworkFailed {
            removals_completed, ..
        } => writeln!(
            writer,
            "percolation: network failed after {removals_completed} removal(s), ratio {:.3}",
            run.ratio()
        )?,
    }
    Ok(())
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

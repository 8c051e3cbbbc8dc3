//! End-to-end runs from input files.

use std::path::Path;

use tracing::info;

use crate::config::{AccountingConfig, ConfigError};
use crate::flow::{OdError, accumulate};
use crate::ingest::{self, IngestError};
use crate::network::{NetworkError, StationGraph};
use crate::rebalance::{PlanError, PlanSummary, verify_plan};
use crate::report::FlowReport;

/// Any failure of a run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Od(#[from] OdError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}

/// Read the topology file and build the graph with its boundaries.
pub fn load_network(topology: &Path, config: &AccountingConfig) -> Result<StationGraph, RunError> {
    let records = ingest::read_topology(topology, &config.root_marker)?;
    let graph = StationGraph::build(records)?.with_boundaries(&config.boundaries()?)?;
    Ok(graph)
}

/// Account every OD cell over the network and report the counters.
pub fn run_flows(
    topology: &Path,
    od: &Path,
    config: &AccountingConfig,
) -> Result<FlowReport, RunError> {
    let mut graph = load_network(topology, config)?;
    let matrix = ingest::read_od_matrix(od)?;
    let entries = matrix.resolve(&graph)?;
    let summary = accumulate(&mut graph, &entries)?;

    info!(
        stations = graph.len(),
        entries = summary.entries,
        wagons = summary.wagons,
        "flow accounting complete"
    );

    Ok(FlowReport::from_graph(&graph))
}

/// Check an externally solved empty-wagon plan against the network.
pub fn check_empty_plan(
    topology: &Path,
    losses: &Path,
    plan: &Path,
    config: &AccountingConfig,
) -> Result<PlanSummary, RunError> {
    let graph = load_network(topology, config)?;
    let losses = ingest::read_losses(losses)?;
    let transfers = ingest::read_transfers(plan)?;
    let summary = verify_plan(&graph, &losses, &transfers)?;

    info!(
        empty_distance = summary.empty_distance,
        wagons_moved = summary.wagons_moved,
        "empty-wagon plan balances"
    );

    Ok(summary)
}

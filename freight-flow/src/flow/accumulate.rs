//! Decomposition of OD traffic into per-node counters.
//!
//! Every entry is routed along its tree path. The origin records a
//! departure and half-section traffic, interior nodes record through
//! traffic and whole-section traffic, and the destination records an
//! arrival and inner half-section traffic. Same-station entries record a
//! matching departure and arrival on the one node.

use tracing::{debug, trace};

use super::od::{OdEntry, OdError};
use super::DestinationClass;
use crate::domain::Direction;
use crate::network::{StationGraph, StationId, resolve_path, step_direction};

/// Totals for one accumulation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Entries applied, both local and routed.
    pub entries: usize,
    /// Entries that started and ended in the same unit.
    pub local_entries: usize,
    /// Wagons applied across all entries.
    pub wagons: u64,
}

/// A resolved entry, ready to mutate counters.
enum Plan {
    Local {
        station: StationId,
        volume: u64,
        direction: Direction,
    },
    Route {
        path: Vec<StationId>,
        volume: u64,
    },
}

impl Plan {
    fn volume(&self) -> u64 {
        match *self {
            Plan::Local { volume, .. } => volume,
            Plan::Route { volume, .. } => volume,
        }
    }
}

/// Apply `entries` to the counters of `graph`.
///
/// All paths are resolved before any counter changes, so an error leaves
/// the graph exactly as it was. Zero-volume entries are ignored. Counters
/// only ever grow: running the same entries twice doubles every counter.
///
/// Fails with [`OdError::VolumeOverflow`] when the pass could push any
/// node total past `u64::MAX`.
pub fn accumulate(
    graph: &mut StationGraph,
    entries: &[OdEntry],
) -> Result<PassSummary, OdError> {
    let mut plans = Vec::with_capacity(entries.len());

    for entry in entries {
        match *entry {
            _ if entry.volume() == 0 => continue,
            OdEntry::Local {
                station,
                volume,
                direction,
            } => plans.push(Plan::Local {
                station,
                volume,
                direction,
            }),
            OdEntry::Journey {
                origin,
                destination,
                volume,
            } => {
                if origin == destination {
                    return Err(OdError::MissingDirectionTag(graph.name(origin).clone()));
                }
                let path = resolve_path(graph, origin, destination)?;
                trace!(
                    origin = %graph.name(origin),
                    destination = %graph.name(destination),
                    hops = path.len() - 1,
                    "resolved path"
                );
                plans.push(Plan::Route { path, volume });
            }
        }
    }

    check_headroom(graph, &plans)?;

    let mut summary = PassSummary::default();

    for plan in &plans {
        match plan {
            Plan::Local {
                station,
                volume,
                direction,
            } => {
                record_local(graph, *station, *volume, *direction);
                summary.local_entries += 1;
                summary.wagons += volume;
            }
            Plan::Route { path, volume } => {
                record_route(graph, path, *volume);
                summary.wagons += volume;
            }
        }
        summary.entries += 1;
    }

    debug!(
        entries = summary.entries,
        local = summary.local_entries,
        wagons = summary.wagons,
        "accumulated OD flows"
    );

    Ok(summary)
}

/// Reject a pass whose wagons do not fit in the counters.
///
/// A pass adds at most twice its wagons to any heavy total (a local entry
/// records both a departure and an arrival) and at most its wagons to any
/// interval total. Checking node totals bounds every field as well.
fn check_headroom(graph: &StationGraph, plans: &[Plan]) -> Result<(), OdError> {
    let growth = plans
        .iter()
        .try_fold(0u64, |acc, plan| acc.checked_add(plan.volume()))
        .and_then(|wagons| wagons.checked_mul(2))
        .ok_or(OdError::VolumeOverflow)?;

    let largest = graph
        .ids()
        .map(|id| {
            let node = graph.node(id);
            node.heavy().total().max(node.interval().total())
        })
        .max()
        .unwrap_or(0);

    largest
        .checked_add(growth)
        .map(|_| ())
        .ok_or(OdError::VolumeOverflow)
}

fn record_local(
    graph: &mut StationGraph,
    station: StationId,
    volume: u64,
    direction: Direction,
) {
    let node = graph.node_mut(station);
    node.heavy_mut().record_depart(direction, volume);
    node.heavy_mut().record_arrive(direction, volume);
    node.interval_mut().record_half(DestinationClass::Inner, volume);
}

/// Record one routed journey. `path` has at least two nodes.
fn record_route(graph: &mut StationGraph, path: &[StationId], volume: u64) {
    let last = path.len() - 1;
    let class = graph.destination_class(path[last]);

    for (i, &id) in path.iter().enumerate() {
        if i == 0 {
            let direction = step_direction(graph, id, path[1]);
            let node = graph.node_mut(id);
            node.heavy_mut().record_depart(direction, volume);
            node.interval_mut().record_half(class, volume);
        } else if i == last {
            let direction = step_direction(graph, path[i - 1], id);
            let node = graph.node_mut(id);
            node.heavy_mut().record_arrive(direction, volume);
            node.interval_mut().record_half(DestinationClass::Inner, volume);
        } else {
            let direction = step_direction(graph, id, path[i + 1]);
            let node = graph.node_mut(id);
            node.heavy_mut().record_through(direction, volume);
            node.interval_mut().record_whole(class, volume);
        }
    }
}

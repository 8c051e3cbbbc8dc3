//! Routing between two stations through their lowest common ancestor.

use std::collections::HashMap;

use super::{NetworkError, StationGraph, StationId};
use crate::domain::Direction;

/// Resolve the unique tree path from `origin` to `destination`.
///
/// The path climbs from `origin` to the lowest common ancestor (LCA) of the
/// two stations, then descends to `destination`. The first element is
/// always `origin`, the last is `destination`, and the LCA appears exactly
/// once at the turning point.
pub fn resolve_path(
    graph: &StationGraph,
    origin: StationId,
    destination: StationId,
) -> Result<Vec<StationId>, NetworkError> {
    let origin_chain: Vec<StationId> = graph.ancestors(origin).collect();
    let dest_positions: HashMap<StationId, usize> = graph
        .ancestors(destination)
        .enumerate()
        .map(|(pos, id)| (id, pos))
        .collect();

    let (origin_pos, dest_pos) = origin_chain
        .iter()
        .enumerate()
        .find_map(|(pos, id)| dest_positions.get(id).map(|&dest_pos| (pos, dest_pos)))
        .ok_or_else(|| NetworkError::DisconnectedPath {
            origin: graph.name(origin).clone(),
            destination: graph.name(destination).clone(),
        })?;

    let mut path = Vec::with_capacity(origin_pos + dest_pos + 1);
    path.extend_from_slice(&origin_chain[..=origin_pos]);

    // The descent is the destination chain below the LCA, reversed.
    let descent: Vec<StationId> = graph.ancestors(destination).take(dest_pos).collect();
    path.extend(descent.into_iter().rev());

    Ok(path)
}

/// Direction of a single step between adjacent nodes.
///
/// A step onto `from`'s parent runs up; any other step runs down towards a
/// child.
pub fn step_direction(graph: &StationGraph, from: StationId, to: StationId) -> Direction {
    if graph.parent(from) == Some(to) {
        Direction::Up
    } else {
        Direction::Down
    }
}

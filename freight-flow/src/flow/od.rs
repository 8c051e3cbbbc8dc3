//! Origin-destination traffic entries.

use tracing::trace;

use crate::domain::{Direction, OdVolume, StationName};
use crate::network::{NetworkError, StationGraph, StationId};

/// Errors raised while turning OD cells into routable entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OdError {
    /// A cell named a station the network does not have
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Same-station traffic without a `u`/`d` tag
    #[error("traffic from {0} to itself needs a direction tag")]
    MissingDirectionTag(StationName),

    /// Between-station traffic carrying a `u`/`d` tag
    #[error("traffic from {origin} to {destination} must not carry a direction tag")]
    UnexpectedDirectionTag {
        origin: StationName,
        destination: StationName,
    },

    /// Applying the pass would push a counter past `u64::MAX`
    #[error("wagon counts overflow the flow counters")]
    VolumeOverflow,
}

/// One OD matrix cell, still keyed by station name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OdCell {
    pub origin: StationName,
    pub destination: StationName,
    pub volume: OdVolume,
}

/// A sparse OD matrix as read from input: only present cells are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OdMatrix {
    cells: Vec<OdCell>,
}

impl OdMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, origin: StationName, destination: StationName, volume: OdVolume) {
        self.cells.push(OdCell {
            origin,
            destination,
            volume,
        });
    }

    pub fn cells(&self) -> &[OdCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Total wagons across all cells, saturating at `u64::MAX`.
    pub fn total_volume(&self) -> u64 {
        self.cells
            .iter()
            .map(|c| c.volume.volume())
            .fold(0, u64::saturating_add)
    }

    /// Resolve every cell against `graph`.
    ///
    /// Zero-volume cells are dropped. Station names are checked for every
    /// cell, zero or not.
    pub fn resolve(&self, graph: &StationGraph) -> Result<Vec<OdEntry>, OdError> {
        let mut entries = Vec::with_capacity(self.cells.len());

        for cell in &self.cells {
            let origin = graph.find(cell.origin.as_str())?;
            let destination = graph.find(cell.destination.as_str())?;

            if cell.volume.volume() == 0 {
                trace!(origin = %cell.origin, destination = %cell.destination, "skipping empty cell");
                continue;
            }

            let entry = match (origin == destination, cell.volume) {
                (true, OdVolume::Tagged { volume, direction }) => OdEntry::Local {
                    station: origin,
                    volume,
                    direction,
                },
                (true, OdVolume::Plain(_)) => {
                    return Err(OdError::MissingDirectionTag(cell.origin.clone()));
                }
                (false, OdVolume::Plain(volume)) => OdEntry::Journey {
                    origin,
                    destination,
                    volume,
                },
                (false, OdVolume::Tagged { .. }) => {
                    return Err(OdError::UnexpectedDirectionTag {
                        origin: cell.origin.clone(),
                        destination: cell.destination.clone(),
                    });
                }
            };
            entries.push(entry);
        }

        Ok(entries)
    }
}

/// A routable unit of traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OdEntry {
    /// Traffic that starts and ends in the same unit, travelling in the
    /// tagged direction.
    Local {
        station: StationId,
        volume: u64,
        direction: Direction,
    },
    /// Traffic between two different nodes.
    Journey {
        origin: StationId,
        destination: StationId,
        volume: u64,
    },
}

impl OdEntry {
    pub fn volume(&self) -> u64 {
        match *self {
            OdEntry::Local { volume, .. } => volume,
            OdEntry::Journey { volume, .. } => volume,
        }
    }
}

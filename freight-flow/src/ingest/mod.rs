//! Readers for run inputs: the station adjacency list, the OD matrix and
//! the empty-wagon plan tables.

mod empty_plan;
mod error;
mod od_matrix;
mod topology;

pub use empty_plan::{parse_losses, parse_transfers, read_losses, read_transfers};
pub use error::IngestError;
pub use od_matrix::{parse_od_matrix, read_od_matrix};
pub use topology::{parse_topology, read_topology};

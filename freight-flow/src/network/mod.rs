//! Station network topology and routing.
//!
//! The network is a rooted binary tree held in an arena. Nodes refer to
//! their parent and children by [`StationId`], so the tree has no ownership
//! cycles and every component borrows the one [`StationGraph`] of a run.

mod error;
mod graph;
mod path;

pub use error::NetworkError;
pub use graph::{
    Ancestors, Boundaries, NodeKind, StationGraph, StationId, StationNode, StationRecord,
};
pub use path::{resolve_path, step_direction};

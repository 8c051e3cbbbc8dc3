//! Network construction and routing errors.
//!
//! All of these reject malformed input. None of them are transient, so
//! callers surface them immediately instead of retrying.

use crate::domain::StationName;

/// Errors raised while building the station tree or routing across it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// No topology records were supplied
    #[error("network has no stations")]
    EmptyNetwork,

    /// The same station name was declared twice
    #[error("duplicate station: {0}")]
    DuplicateStation(StationName),

    /// A second parentless record was found
    #[error("station {station} declared as a second root (root is {root})")]
    MultipleRoots {
        station: StationName,
        root: StationName,
    },

    /// A child record names a parent that has not been declared yet
    #[error("station {station} references parent {parent} before it is declared")]
    UnresolvedParent {
        station: StationName,
        parent: StationName,
    },

    /// A junction already has both child slots filled
    #[error("station {parent} already has two children, cannot attach {child}")]
    TooManyChildren {
        parent: StationName,
        child: StationName,
    },

    /// A lookup named a station that is not in the network
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// A boundary sentinel has children of its own
    #[error("boundary station {0} must be a leaf")]
    BoundaryNotLeaf(StationName),

    /// Both boundaries were pointed at the same station
    #[error("boundary stations must differ, both are {0}")]
    SharedBoundary(StationName),

    /// Two stations have no common ancestor
    #[error("stations {origin} and {destination} share no common ancestor")]
    DisconnectedPath {
        origin: StationName,
        destination: StationName,
    },
}

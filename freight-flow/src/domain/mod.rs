//! Domain types for freight flow accounting.
//!
//! Value types validate on construction, so code that receives them can
//! trust their contents.

mod direction;
mod station;
mod volume;

pub use direction::Direction;
pub use station::{InvalidStationName, StationName};
pub use volume::{InvalidVolume, OdVolume};

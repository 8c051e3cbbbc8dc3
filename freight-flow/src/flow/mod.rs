//! Flow accounting over the station tree.

mod accumulate;
mod counters;
mod od;

pub use accumulate::{PassSummary, accumulate};
pub use counters::{DestinationClass, HeavyFlow, IntervalFlow};
pub use od::{OdCell, OdEntry, OdError, OdMatrix};

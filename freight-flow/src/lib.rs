//! Freight wagon flow accounting.
//!
//! Builds a rail network modelled as a rooted binary tree of stations and
//! segments, routes origin-destination wagon traffic along the tree, and
//! decomposes it into directional flows per station and half-/whole-section
//! totals per segment, including hand-offs to two neighbouring
//! administrations.

pub mod config;
pub mod domain;
pub mod flow;
pub mod ingest;
pub mod network;
pub mod rebalance;
pub mod report;
pub mod run;

#[cfg(test)]
mod testing;

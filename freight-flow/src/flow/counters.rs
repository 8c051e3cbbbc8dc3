//! Per-node flow counters.
//!
//! Totals are always computed from the fields, never stored, so they cannot
//! drift from the counters they summarise.

use std::ops::AddAssign;

use serde::Serialize;

use crate::domain::Direction;

/// Where a journey ends, as far as segment accounting is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationClass {
    /// Work traffic that stays inside the administration.
    Inner,
    /// Hand-off to administration A.
    ToA,
    /// Hand-off to administration F.
    ToF,
}

/// Directional loaded-wagon counters for one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeavyFlow {
    pub up_through: u64,
    pub down_through: u64,
    pub up_arrive: u64,
    pub down_arrive: u64,
    pub up_depart: u64,
    pub down_depart: u64,
}

impl HeavyFlow {
    pub fn record_through(&mut self, direction: Direction, volume: u64) {
        match direction {
            Direction::Up => self.up_through += volume,
            Direction::Down => self.down_through += volume,
        }
    }

    pub fn record_arrive(&mut self, direction: Direction, volume: u64) {
        match direction {
            Direction::Up => self.up_arrive += volume,
            Direction::Down => self.down_arrive += volume,
        }
    }

    pub fn record_depart(&mut self, direction: Direction, volume: u64) {
        match direction {
            Direction::Up => self.up_depart += volume,
            Direction::Down => self.down_depart += volume,
        }
    }

    /// Sum of all six directional counters, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        [
            self.up_through,
            self.down_through,
            self.up_arrive,
            self.down_arrive,
            self.up_depart,
            self.down_depart,
        ]
        .into_iter()
        .fold(0, u64::saturating_add)
    }
}

impl AddAssign for HeavyFlow {
    fn add_assign(&mut self, rhs: Self) {
        self.up_through += rhs.up_through;
        self.down_through += rhs.down_through;
        self.up_arrive += rhs.up_arrive;
        self.down_arrive += rhs.down_arrive;
        self.up_depart += rhs.up_depart;
        self.down_depart += rhs.down_depart;
    }
}

/// Half-section and whole-section aggregates for one segment node.
///
/// Half-section traffic starts or ends in the segment; whole-section
/// traffic runs through all of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IntervalFlow {
    pub half_inner: u64,
    pub half_to_a: u64,
    pub half_to_f: u64,
    pub whole_inner: u64,
    pub whole_to_a: u64,
    pub whole_to_f: u64,
}

impl IntervalFlow {
    pub fn record_half(&mut self, class: DestinationClass, volume: u64) {
        match class {
            DestinationClass::Inner => self.half_inner += volume,
            DestinationClass::ToA => self.half_to_a += volume,
            DestinationClass::ToF => self.half_to_f += volume,
        }
    }

    pub fn record_whole(&mut self, class: DestinationClass, volume: u64) {
        match class {
            DestinationClass::Inner => self.whole_inner += volume,
            DestinationClass::ToA => self.whole_to_a += volume,
            DestinationClass::ToF => self.whole_to_f += volume,
        }
    }

    /// Sum of all six aggregates, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        [
            self.half_inner,
            self.half_to_a,
            self.half_to_f,
            self.whole_inner,
            self.whole_to_a,
            self.whole_to_f,
        ]
        .into_iter()
        .fold(0, u64::saturating_add)
    }
}

impl AddAssign for IntervalFlow {
    fn add_assign(&mut self, rhs: Self) {
        self.half_inner += rhs.half_inner;
        self.half_to_a += rhs.half_to_a;
        self.half_to_f += rhs.half_to_f;
        self.whole_inner += rhs.whole_inner;
        self.whole_to_a += rhs.whole_to_a;
        self.whole_to_f += rhs.whole_to_f;
    }
}

//! Empty-wagon redistribution plan checking.
//!
//! Unloading leaves some stations with spare empty wagons and loading
//! leaves others short. A redistribution plan moves empties along tree
//! intervals so every station ends balanced. Plans are produced by an
//! external solver; this module checks them against the network and
//! reports their cost.
//!
//! An interval is the tree edge between a node and its parent, named after
//! the child node. `up` wagons move from the child to the parent, `down`
//! wagons from the parent to the child. For every node other than the two
//! boundary sentinels:
//!
//! ```text
//! loss + inbound - outbound == 0
//! ```
//!
//! Boundary sentinels exchange wagons with neighbouring administrations
//! and are not required to balance.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::StationName;
use crate::network::{NetworkError, StationGraph};

/// Empty-wagon surplus (positive) or deficit (negative) at one station.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StationLoss {
    pub station: StationName,
    pub loss: i64,
}

/// Empty wagons moved across one interval.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IntervalTransfer {
    /// The child node of the interval.
    pub interval: StationName,
    pub distance: u64,
    pub up: u32,
    pub down: u32,
}

/// Errors found while checking a plan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// A station or interval name is not in the network
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The root has no parent, so it has no interval
    #[error("root station {0} has no interval")]
    RootInterval(StationName),

    /// The same interval appears twice in the plan
    #[error("interval above {0} listed more than once")]
    DuplicateInterval(StationName),

    /// The same station appears twice in the losses
    #[error("loss for {0} listed more than once")]
    DuplicateLoss(StationName),

    /// A station does not balance under the plan
    #[error("station {station} is left with {residual} empty wagons")]
    Imbalance { station: StationName, residual: i64 },

    /// Wagon counts or distances too large to total
    #[error("empty-wagon totals overflow at {0}")]
    Overflow(StationName),
}

/// Cost of a balanced plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    /// Sum over intervals of distance times wagons moved.
    pub empty_distance: u64,
    /// Wagons moved, counted once per interval crossed.
    pub wagons_moved: u64,
    /// Intervals carrying at least one wagon.
    pub intervals_used: usize,
}

/// Check that `transfers` balance every non-boundary station given
/// `losses`, and total the empty-wagon distance.
///
/// Stations without a loss entry count as zero. Intervals without a
/// transfer carry nothing. The first unbalanced station in declaration
/// order is reported.
pub fn verify_plan(
    graph: &StationGraph,
    losses: &[StationLoss],
    transfers: &[IntervalTransfer],
) -> Result<PlanSummary, PlanError> {
    let mut balance = vec![0i64; graph.len()];
    let mut has_loss = vec![false; graph.len()];

    for entry in losses {
        let id = graph.find(entry.station.as_str())?;
        if std::mem::replace(&mut has_loss[id.index()], true) {
            return Err(PlanError::DuplicateLoss(entry.station.clone()));
        }
        balance[id.index()] = balance[id.index()]
            .checked_add(entry.loss)
            .ok_or_else(|| PlanError::Overflow(entry.station.clone()))?;
    }

    let mut seen = vec![false; graph.len()];
    let mut summary = PlanSummary::default();

    for transfer in transfers {
        let child = graph.find(transfer.interval.as_str())?;
        let Some(parent) = graph.parent(child) else {
            return Err(PlanError::RootInterval(transfer.interval.clone()));
        };
        if std::mem::replace(&mut seen[child.index()], true) {
            return Err(PlanError::DuplicateInterval(transfer.interval.clone()));
        }

        let overflow = || PlanError::Overflow(transfer.interval.clone());

        let net_up = i64::from(transfer.up) - i64::from(transfer.down);
        balance[child.index()] = balance[child.index()]
            .checked_sub(net_up)
            .ok_or_else(overflow)?;
        balance[parent.index()] = balance[parent.index()]
            .checked_add(net_up)
            .ok_or_else(overflow)?;

        let moved = u64::from(transfer.up) + u64::from(transfer.down);
        if moved > 0 {
            summary.intervals_used += 1;
            summary.wagons_moved = summary
                .wagons_moved
                .checked_add(moved)
                .ok_or_else(overflow)?;
            summary.empty_distance = transfer
                .distance
                .checked_mul(moved)
                .and_then(|cost| summary.empty_distance.checked_add(cost))
                .ok_or_else(overflow)?;
        }
    }

    for id in graph.ids() {
        if graph.is_boundary(id) {
            continue;
        }
        let residual = balance[id.index()];
        if residual != 0 {
            warn!(station = %graph.name(id), residual, "unbalanced empty-wagon plan");
            return Err(PlanError::Imbalance {
                station: graph.name(id).clone(),
                residual,
            });
        }
    }

    debug!(
        empty_distance = summary.empty_distance,
        wagons_moved = summary.wagons_moved,
        intervals_used = summary.intervals_used,
        "verified empty-wagon plan"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Boundaries;
    use crate::testing::{graph, name};

    /// `F0 - S1 - S2 - S3`, with `F0` as the hand-off towards F and a spare
    /// leaf `A0` under `S3` towards A.
    fn line() -> StationGraph {
        graph(&[
            ("S1", None),
            ("F0", Some("S1")),
            ("S2", Some("S1")),
            ("S3", Some("S2")),
            ("A0", Some("S3")),
        ])
        .with_boundaries(&Boundaries {
            to_a: name("A0"),
            to_f: name("F0"),
        })
        .unwrap()
    }

    fn loss(station: &str, loss: i64) -> StationLoss {
        StationLoss {
            station: name(station),
            loss,
        }
    }

    fn transfer(interval: &str, distance: u64, up: u32, down: u32) -> IntervalTransfer {
        IntervalTransfer {
            interval: name(interval),
            distance,
            up,
            down,
        }
    }

    #[test]
    fn balanced_plan() {
        let g = line();
        // S3 has 4 spare, S1 is short 4: move them up through S2.
        let losses = [loss("S3", 4), loss("S1", -4)];
        let transfers = [transfer("S3", 30, 4, 0), transfer("S2", 20, 4, 0)];

        let summary = verify_plan(&g, &losses, &transfers).unwrap();
        assert_eq!(
            summary,
            PlanSummary {
                empty_distance: 4 * 30 + 4 * 20,
                wagons_moved: 8,
                intervals_used: 2,
            }
        );
    }

    #[test]
    fn boundaries_supply_freely() {
        let g = line();
        // S2 is short 3, supplied from the F hand-off through S1.
        let losses = [loss("S2", -3)];
        let transfers = [transfer("F0", 0, 3, 0), transfer("S2", 20, 0, 3)];

        let summary = verify_plan(&g, &losses, &transfers).unwrap();
        assert_eq!(summary.empty_distance, 60);
        assert_eq!(summary.intervals_used, 2);
    }

    #[test]
    fn unused_intervals_are_free() {
        let g = line();
        let transfers = [transfer("S2", 20, 0, 0)];
        let summary = verify_plan(&g, &[], &transfers).unwrap();
        assert_eq!(summary, PlanSummary::default());
    }

    #[test]
    fn imbalance_reported() {
        let g = line();
        let losses = [loss("S3", 4), loss("S1", -4)];
        let transfers = [transfer("S3", 30, 4, 0)];

        let err = verify_plan(&g, &losses, &transfers).unwrap_err();
        assert_eq!(
            err,
            PlanError::Imbalance {
                station: name("S1"),
                residual: -4,
            }
        );
    }

    #[test]
    fn root_has_no_interval() {
        let g = line();
        let err = verify_plan(&g, &[], &[transfer("S1", 10, 1, 0)]).unwrap_err();
        assert_eq!(err, PlanError::RootInterval(name("S1")));
    }

    #[test]
    fn duplicates_rejected() {
        let g = line();
        let err = verify_plan(&g, &[], &[transfer("S2", 1, 0, 0), transfer("S2", 1, 0, 0)])
            .unwrap_err();
        assert_eq!(err, PlanError::DuplicateInterval(name("S2")));

        let err = verify_plan(&g, &[loss("S2", 1), loss("S2", -1)], &[]).unwrap_err();
        assert_eq!(err, PlanError::DuplicateLoss(name("S2")));
    }

    #[test]
    fn overflow_reported() {
        let g = line();
        let err = verify_plan(&g, &[], &[transfer("S2", u64::MAX, 1, 1)]).unwrap_err();
        assert_eq!(err, PlanError::Overflow(name("S2")));

        let transfers = [transfer("S2", u64::MAX / 2, 1, 1), transfer("S3", 2, 1, 1)];
        let err = verify_plan(&g, &[], &transfers).unwrap_err();
        assert_eq!(err, PlanError::Overflow(name("S3")));

        let losses = [loss("S2", i64::MAX), loss("S3", 1)];
        let transfers = [transfer("S3", 1, 1, 0)];
        let err = verify_plan(&g, &losses, &transfers).unwrap_err();
        assert_eq!(err, PlanError::Overflow(name("S3")));
    }

    #[test]
    fn unknown_station() {
        let g = line();
        let err = verify_plan(&g, &[loss("Q", 1)], &[]).unwrap_err();
        assert_eq!(
            err,
            PlanError::Network(NetworkError::UnknownStation("Q".into()))
        );
    }

    #[test]
    fn error_display() {
        let err = PlanError::Imbalance {
            station: name("S1"),
            residual: -4,
        };
        assert_eq!(err.to_string(), "station S1 is left with -4 empty wagons");
    }
}

//! Shared fixtures for unit tests.

use proptest::prelude::*;

use crate::domain::StationName;
use crate::network::{Boundaries, StationGraph, StationId, StationRecord};

pub(crate) fn name(s: &str) -> StationName {
    StationName::parse(s).unwrap()
}

pub(crate) fn records(pairs: &[(&str, Option<&str>)]) -> Vec<StationRecord> {
    pairs
        .iter()
        .map(|(station, parent)| StationRecord::from_strs(station, *parent).unwrap())
        .collect()
}

pub(crate) fn graph(pairs: &[(&str, Option<&str>)]) -> StationGraph {
    StationGraph::build(records(pairs)).unwrap()
}

pub(crate) fn id(g: &StationGraph, station: &str) -> StationId {
    g.find(station).unwrap()
}

/// Topology of the M administration, with `N` towards A and `O` towards F.
pub(crate) const M_NETWORK: &[(&str, Option<&str>)] = &[
    ("A-B", None),
    ("B", Some("A-B")),
    ("N", Some("A-B")),
    ("B-C", Some("B")),
    ("C", Some("B-C")),
    ("C-G", Some("C")),
    ("C-D", Some("C")),
    ("G", Some("C-G")),
    ("G-H", Some("G")),
    ("H", Some("G-H")),
    ("H-I", Some("H")),
    ("H-K", Some("H")),
    ("I", Some("H-I")),
    ("I-J", Some("I")),
    ("J", Some("I-J")),
    ("K", Some("H-K")),
    ("K-R", Some("K")),
    ("K-L", Some("K")),
    ("R", Some("K-R")),
    ("L", Some("K-L")),
    ("D", Some("C-D")),
    ("D-E", Some("D")),
    ("E", Some("D-E")),
    ("E-F", Some("E")),
    ("F", Some("E-F")),
    ("O", Some("F")),
];

pub(crate) fn m_network() -> StationGraph {
    graph(M_NETWORK)
        .with_boundaries(&Boundaries {
            to_a: name("N"),
            to_f: name("O"),
        })
        .unwrap()
}

/// Random binary trees of 1 to 25 nodes named `S0`, `S1`, ...
pub(crate) fn arb_graph() -> impl Strategy<Value = StationGraph> {
    prop::collection::vec(any::<prop::sample::Index>(), 0..24).prop_map(|choices| {
        let mut records = vec![StationRecord::from_strs("S0", None).unwrap()];
        // (node, children so far) for nodes with a free child slot
        let mut open: Vec<(usize, u8)> = vec![(0, 0)];

        for (i, choice) in choices.iter().enumerate() {
            let child = i + 1;
            let slot = choice.index(open.len());
            let (parent, children) = open[slot];

            records.push(
                StationRecord::from_strs(&format!("S{child}"), Some(&format!("S{parent}")))
                    .unwrap(),
            );

            if children == 1 {
                open.swap_remove(slot);
            } else {
                open[slot].1 += 1;
            }
            open.push((child, 0));
        }

        StationGraph::build(records).unwrap()
    })
}

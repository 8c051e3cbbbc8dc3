//! Read-only summaries of accumulated counters.

use std::fmt;

use serde::Serialize;

use crate::domain::StationName;
use crate::flow::{HeavyFlow, IntervalFlow};
use crate::network::{NodeKind, StationGraph};

/// Loaded-wagon counters for one station or segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationReport {
    pub name: StationName,
    pub kind: NodeKind,
    #[serde(flatten)]
    pub flow: HeavyFlow,
    pub total: u64,
}

/// Half- and whole-section aggregates for one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentReport {
    pub name: StationName,
    #[serde(flatten)]
    pub flow: IntervalFlow,
    pub total: u64,
}

/// Snapshot of every counter in a graph, in declaration order.
///
/// Boundary sentinels are left out of the station listing; only segment
/// nodes appear in the segment listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowReport {
    pub stations: Vec<StationReport>,
    pub segments: Vec<SegmentReport>,
}

impl FlowReport {
    pub fn from_graph(graph: &StationGraph) -> Self {
        let mut stations = Vec::new();
        let mut segments = Vec::new();

        for id in graph.ids() {
            let kind = graph.kind(id);
            if kind == NodeKind::Boundary {
                continue;
            }

            let node = graph.node(id);
            stations.push(StationReport {
                name: node.name().clone(),
                kind,
                flow: *node.heavy(),
                total: node.heavy().total(),
            });

            if kind == NodeKind::Segment {
                segments.push(SegmentReport {
                    name: node.name().clone(),
                    flow: *node.interval(),
                    total: node.interval().total(),
                });
            }
        }

        Self { stations, segments }
    }

    pub fn station(&self, name: &str) -> Option<&StationReport> {
        self.stations.iter().find(|s| s.name.as_str() == name)
    }

    pub fn segment(&self, name: &str) -> Option<&SegmentReport> {
        self.segments.iter().find(|s| s.name.as_str() == name)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for FlowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Loaded wagon flows")?;
        for s in &self.stations {
            let h = &s.flow;
            writeln!(
                f,
                "  {}: up through {}, up arrive {}, up depart {}, down through {}, down arrive {}, down depart {}, total {}",
                s.name,
                h.up_through,
                h.up_arrive,
                h.up_depart,
                h.down_through,
                h.down_arrive,
                h.down_depart,
                s.total
            )?;
        }

        writeln!(f, "Segment flows")?;
        for s in &self.segments {
            let i = &s.flow;
            writeln!(f, "  {}:", s.name)?;
            writeln!(
                f,
                "    half:  inner {}, to A {}, to F {}",
                i.half_inner, i.half_to_a, i.half_to_f
            )?;
            writeln!(
                f,
                "    whole: inner {}, to A {}, to F {}",
                i.whole_inner, i.whole_to_a, i.whole_to_f
            )?;
            writeln!(f, "    total {}", s.total)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{OdEntry, accumulate};
    use crate::testing::{id, m_network};

    fn sample() -> FlowReport {
        let mut g = m_network();
        let entries = [
            OdEntry::Journey {
                origin: id(&g, "B"),
                destination: id(&g, "O"),
                volume: 6,
            },
            OdEntry::Journey {
                origin: id(&g, "C-D"),
                destination: id(&g, "E"),
                volume: 2,
            },
        ];
        accumulate(&mut g, &entries).unwrap();
        FlowReport::from_graph(&g)
    }

    #[test]
    fn boundaries_are_not_listed() {
        let report = sample();
        assert!(report.station("N").is_none());
        assert!(report.station("O").is_none());
        assert_eq!(report.stations.len(), 24);
    }

    #[test]
    fn segments_are_listed_separately() {
        let report = sample();
        assert!(report.segment("B").is_none());
        assert!(report.segment("A-B").is_some());
        assert!(report.segments.iter().all(|s| s.name.is_segment()));
        assert_eq!(report.segments.len(), 12);
    }

    #[test]
    fn totals_match_fields() {
        let report = sample();
        for s in &report.stations {
            assert_eq!(s.total, s.flow.total());
        }
        for s in &report.segments {
            assert_eq!(s.total, s.flow.total());
        }

        let cd = report.segment("C-D").unwrap();
        assert_eq!(cd.flow.whole_to_f, 6);
        assert_eq!(cd.flow.half_inner, 2);
        assert_eq!(cd.total, 8);

        let b = report.station("B").unwrap();
        assert_eq!(b.flow.down_depart, 6);
        assert_eq!(b.total, 6);
    }

    #[test]
    fn json_is_flat() {
        let report = sample();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        let first = &json["stations"][0];
        assert_eq!(first["name"], "A-B");
        assert_eq!(first["kind"], "segment");
        assert_eq!(first["up_through"], 0);
        assert_eq!(first["total"], 0);

        let cd = json["segments"]
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["name"] == "C-D")
            .unwrap();
        assert_eq!(cd["whole_to_f"], 6);
        assert_eq!(cd["total"], 8);
    }

    #[test]
    fn text_mentions_every_node() {
        let report = sample();
        let text = report.to_string();
        assert!(text.starts_with("Loaded wagon flows\n"));
        assert!(text.contains("  B: up through 0, up arrive 0, up depart 0, down through 0, down arrive 0, down depart 6, total 6"));
        assert!(text.contains("  C-D:\n    half:  inner 2, to A 0, to F 0\n    whole: inner 0, to A 0, to F 6\n    total 8"));
        assert!(!text.contains("  O:"));
    }
}

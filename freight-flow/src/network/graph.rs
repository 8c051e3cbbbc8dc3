//! Station tree construction.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace};

use super::NetworkError;
use crate::domain::{InvalidStationName, StationName};
use crate::flow::{DestinationClass, HeavyFlow, IntervalFlow};

/// Index of a node in a [`StationGraph`].
///
/// Ids are only meaningful for the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StationId(usize);

impl StationId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One line of topology input: a station and the station upstream of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRecord {
    pub name: StationName,
    /// `None` for the root of the network.
    pub parent: Option<StationName>,
}

impl StationRecord {
    pub fn new(name: StationName, parent: Option<StationName>) -> Self {
        Self { name, parent }
    }

    /// Build a record from raw strings.
    pub fn from_strs(name: &str, parent: Option<&str>) -> Result<Self, InvalidStationName> {
        Ok(Self {
            name: StationName::parse(name)?,
            parent: parent.map(StationName::parse).transpose()?,
        })
    }
}

/// The two sentinel leaves where traffic is handed to neighbouring
/// administrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundaries {
    /// Hand-off point towards administration A.
    pub to_a: StationName,
    /// Hand-off point towards administration F.
    pub to_f: StationName,
}

/// What a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Station,
    Segment,
    Boundary,
}

/// A station or segment in the tree, with its flow counters.
#[derive(Debug, Clone)]
pub struct StationNode {
    name: StationName,
    parent: Option<StationId>,
    left: Option<StationId>,
    right: Option<StationId>,
    heavy: HeavyFlow,
    interval: IntervalFlow,
}

impl StationNode {
    fn new(name: StationName, parent: Option<StationId>) -> Self {
        Self {
            name,
            parent,
            left: None,
            right: None,
            heavy: HeavyFlow::default(),
            interval: IntervalFlow::default(),
        }
    }

    pub fn name(&self) -> &StationName {
        &self.name
    }

    pub fn parent(&self) -> Option<StationId> {
        self.parent
    }

    pub fn left(&self) -> Option<StationId> {
        self.left
    }

    pub fn right(&self) -> Option<StationId> {
        self.right
    }

    /// Children in attachment order.
    pub fn children(&self) -> impl Iterator<Item = StationId> + '_ {
        self.left.into_iter().chain(self.right)
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn heavy(&self) -> &HeavyFlow {
        &self.heavy
    }

    pub fn interval(&self) -> &IntervalFlow {
        &self.interval
    }

    pub(crate) fn heavy_mut(&mut self) -> &mut HeavyFlow {
        &mut self.heavy
    }

    pub(crate) fn interval_mut(&mut self) -> &mut IntervalFlow {
        &mut self.interval
    }

    /// Attach a child to the first free slot.
    fn attach(&mut self, child: StationId) -> bool {
        if self.left.is_none() {
            self.left = Some(child);
            true
        } else if self.right.is_none() {
            self.right = Some(child);
            true
        } else {
            false
        }
    }
}

/// The station tree of one accounting run.
///
/// Nodes live in a single arena in declaration order. The graph is built
/// once, then only flow counters change.
#[derive(Debug, Clone)]
pub struct StationGraph {
    nodes: Vec<StationNode>,
    by_name: HashMap<StationName, StationId>,
    root: StationId,
    to_a: Option<StationId>,
    to_f: Option<StationId>,
}

impl StationGraph {
    /// Build the tree from records ordered parent-before-child.
    ///
    /// Children fill the parent's left slot first, then the right one.
    pub fn build<I>(records: I) -> Result<Self, NetworkError>
    where
        I: IntoIterator<Item = StationRecord>,
    {
        let mut nodes: Vec<StationNode> = Vec::new();
        let mut by_name: HashMap<StationName, StationId> = HashMap::new();
        let mut root: Option<StationId> = None;

        for record in records {
            if by_name.contains_key(&record.name) {
                return Err(NetworkError::DuplicateStation(record.name));
            }

            let id = StationId(nodes.len());

            let parent = match &record.parent {
                None => {
                    if let Some(existing) = root {
                        return Err(NetworkError::MultipleRoots {
                            station: record.name,
                            root: nodes[existing.0].name.clone(),
                        });
                    }
                    root = Some(id);
                    trace!(station = %record.name, "root station");
                    None
                }
                Some(parent_name) => {
                    let Some(&parent) = by_name.get(parent_name) else {
                        return Err(NetworkError::UnresolvedParent {
                            station: record.name,
                            parent: parent_name.clone(),
                        });
                    };

                    if !nodes[parent.0].attach(id) {
                        return Err(NetworkError::TooManyChildren {
                            parent: parent_name.clone(),
                            child: record.name,
                        });
                    }
                    trace!(station = %record.name, parent = %parent_name, "attached station");
                    Some(parent)
                }
            };

            by_name.insert(record.name.clone(), id);
            nodes.push(StationNode::new(record.name, parent));
        }

        let root = root.ok_or(NetworkError::EmptyNetwork)?;

        debug!(
            stations = nodes.len(),
            root = %nodes[root.0].name,
            "built station graph"
        );

        Ok(Self {
            nodes,
            by_name,
            root,
            to_a: None,
            to_f: None,
        })
    }

    /// Designate the two administration hand-off sentinels.
    ///
    /// Both must exist, differ, and be leaves.
    pub fn with_boundaries(mut self, boundaries: &Boundaries) -> Result<Self, NetworkError> {
        if boundaries.to_a == boundaries.to_f {
            return Err(NetworkError::SharedBoundary(boundaries.to_a.clone()));
        }

        let to_a = self.find(boundaries.to_a.as_str())?;
        let to_f = self.find(boundaries.to_f.as_str())?;

        for id in [to_a, to_f] {
            if !self.node(id).is_leaf() {
                return Err(NetworkError::BoundaryNotLeaf(self.node(id).name.clone()));
            }
        }

        self.to_a = Some(to_a);
        self.to_f = Some(to_f);
        Ok(self)
    }

    /// Look up a station by name.
    pub fn find(&self, name: &str) -> Result<StationId, NetworkError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| NetworkError::UnknownStation(name.to_string()))
    }

    /// Access a node.
    ///
    /// Panics if `id` was issued by a different graph with more nodes.
    pub fn node(&self, id: StationId) -> &StationNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: StationId) -> &mut StationNode {
        &mut self.nodes[id.0]
    }

    pub fn name(&self, id: StationId) -> &StationName {
        &self.nodes[id.0].name
    }

    pub fn parent(&self, id: StationId) -> Option<StationId> {
        self.nodes[id.0].parent
    }

    pub fn root(&self) -> StationId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = StationId> + '_ {
        (0..self.nodes.len()).map(StationId)
    }

    /// `id` followed by each of its ancestors up to and including the root.
    pub fn ancestors(&self, id: StationId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: Some(id),
        }
    }

    pub fn boundary_a(&self) -> Option<StationId> {
        self.to_a
    }

    pub fn boundary_f(&self) -> Option<StationId> {
        self.to_f
    }

    pub fn is_boundary(&self, id: StationId) -> bool {
        self.to_a == Some(id) || self.to_f == Some(id)
    }

    pub fn kind(&self, id: StationId) -> NodeKind {
        if self.is_boundary(id) {
            NodeKind::Boundary
        } else if self.name(id).is_segment() {
            NodeKind::Segment
        } else {
            NodeKind::Station
        }
    }

    /// Classify a journey by the node it ends at.
    pub fn destination_class(&self, destination: StationId) -> DestinationClass {
        if self.to_f == Some(destination) {
            DestinationClass::ToF
        } else if self.to_a == Some(destination) {
            DestinationClass::ToA
        } else {
            DestinationClass::Inner
        }
    }
}

/// Iterator over a node and its ancestors, see [`StationGraph::ancestors`].
pub struct Ancestors<'a> {
    graph: &'a StationGraph,
    next: Option<StationId>,
}

impl Iterator for Ancestors<'_> {
    type Item = StationId;

    fn next(&mut self) -> Option<StationId> {
        let current = self.next?;
        self.next = self.graph.parent(current);
        Some(current)
    }
}

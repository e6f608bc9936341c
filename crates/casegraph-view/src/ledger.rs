//! In-memory rendering delegate
//!
//! Records what a rendering layer was told. Used by the terminal front end,
//! which draws lists rather than a laid-out graph, and by tests.

use casegraph_domain::{Edge, EdgeKey, Person, PersonId, RenderDelegate};
use std::collections::{BTreeMap, HashMap};

/// A centering request as received by the delegate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centering {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
    /// Zoom multiplier
    pub scale: f64,
}

/// Rendering delegate that keeps visibility flags and positions in memory
#[derive(Debug, Clone, Default)]
pub struct VisibilityLedger {
    nodes: BTreeMap<PersonId, bool>,
    edges: BTreeMap<EdgeKey, bool>,
    positions: HashMap<PersonId, (f64, f64)>,
    last_center: Option<Centering>,
    updates: usize,
}

impl VisibilityLedger {
    /// Empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a layout position for a node
    pub fn set_position(&mut self, id: impl Into<PersonId>, x: f64, y: f64) {
        self.positions.insert(id.into(), (x, y));
    }

    /// Whether a node is currently shown
    pub fn is_node_visible(&self, id: &str) -> bool {
        self.nodes.get(id).copied().unwrap_or(false)
    }

    /// Whether an edge is currently shown
    pub fn is_edge_visible(&self, key: EdgeKey) -> bool {
        self.edges.get(&key).copied().unwrap_or(false)
    }

    /// Ids of every shown node
    pub fn visible_nodes(&self) -> Vec<&PersonId> {
        self.nodes
            .iter()
            .filter(|(_, &visible)| visible)
            .map(|(id, _)| id)
            .collect()
    }

    /// Last centering request
    pub fn last_center(&self) -> Option<Centering> {
        self.last_center
    }

    /// Total visibility updates received
    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl RenderDelegate for VisibilityLedger {
    fn load_graph(&mut self, nodes: &[Person], edges: &[Edge]) {
        self.nodes = nodes.iter().map(|p| (p.id.clone(), true)).collect();
        self.edges = (0..edges.len()).map(|i| (EdgeKey(i), true)).collect();
    }

    fn set_node_visibility(&mut self, id: &PersonId, visible: bool) {
        self.nodes.insert(id.clone(), visible);
        self.updates += 1;
    }

    fn set_edge_visibility(&mut self, key: EdgeKey, visible: bool) {
        self.edges.insert(key, visible);
        self.updates += 1;
    }

    fn position_of(&self, id: &PersonId) -> Option<(f64, f64)> {
        self.positions.get(id).copied()
    }

    fn center_on(&mut self, x: f64, y: f64, scale: f64) {
        self.last_center = Some(Centering { x, y, scale });
    }
}

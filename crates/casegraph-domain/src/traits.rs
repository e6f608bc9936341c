//! Trait definitions for external interactions
//!
//! Layout and drawing belong to a rendering layer outside this workspace. The
//! core only tells it what to show and where to look.

use crate::{Edge, EdgeKey, Person, PersonId};

/// Zoom multiplier applied when centering on a focused person
pub const FOCUS_ZOOM: f64 = 1.5;

/// Request for the rendering layer to center on a person
///
/// The core never computes coordinates; the rendering layer resolves the
/// person's current position when it honours the directive.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterDirective {
    /// Person to center on
    pub person_id: PersonId,
    /// Zoom multiplier
    pub scale: f64,
}

impl CenterDirective {
    /// Directive with the standard focus zoom
    pub fn focus(person_id: PersonId) -> Self {
        Self {
            person_id,
            scale: FOCUS_ZOOM,
        }
    }
}

/// Rendering and layout delegate
///
/// Implemented by whatever draws the graph (a physics layout, a terminal
/// listing, a test recorder).
pub trait RenderDelegate {
    /// Hand the full node and edge set to the layout
    fn load_graph(&mut self, nodes: &[Person], edges: &[Edge]);

    /// Show or hide a node
    fn set_node_visibility(&mut self, id: &PersonId, visible: bool);

    /// Show or hide an edge
    fn set_edge_visibility(&mut self, key: EdgeKey, visible: bool);

    /// Current on-screen position of a node, if laid out
    fn position_of(&self, id: &PersonId) -> Option<(f64, f64)>;

    /// Center the viewport on a point with the given zoom
    fn center_on(&mut self, x: f64, y: f64, scale: f64);
}

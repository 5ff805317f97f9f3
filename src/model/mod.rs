//! Data model for the dock layout tree
//!
//! The tree is a closed set of node variants: [`Panel`] leaves live inside
//! [`TabGroup`]s, and tab groups are arranged by [`SplitContainer`]s along a
//! row or column axis. A [`Workbench`] owns the root container and is the
//! only mutation entry point; callers never edit nodes directly, so the
//! structural invariants (non-empty non-root containers, size/children
//! parity, unique ids) hold between any two public calls.

mod node;
mod workbench;

pub use node::{LayoutNode, Panel, PanelContent, SplitContainer, TabGroup};
pub use workbench::Workbench;

use serde::{Deserialize, Serialize};

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a node in the layout tree.
///
/// Assigned at creation, stable for the node's lifetime, and never reused
/// by the owning workbench - not even after the node is destroyed or a
/// layout is reloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Id generator, owned by the workbench.
#[derive(Debug, Clone)]
pub(crate) struct NodeIdGen {
    next: u64,
}

impl NodeIdGen {
    pub(crate) fn new() -> Self {
        Self { next: 1 }
    }

    /// Resume numbering after `highest`, used when restoring a saved layout.
    pub(crate) fn after(highest: u64) -> Self {
        Self { next: highest + 1 }
    }

    pub(crate) fn fresh(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

// ============================================================================
// Axis & Placement
// ============================================================================

/// Axis along which a split container arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Children side by side, left to right
    Row,
    /// Children stacked, top to bottom
    Column,
}

/// Requested placement of a panel on the workbench.
///
/// The four directional placements may be absolute (at the outer border of
/// the whole workbench) or relative to a reference panel; `Tab` always
/// requires a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Left,
    Top,
    Right,
    Bottom,
    Tab,
}

impl Placement {
    /// The split axis this placement expands along; `None` for `Tab`.
    pub fn axis(&self) -> Option<Axis> {
        match self {
            Placement::Left | Placement::Right => Some(Axis::Row),
            Placement::Top | Placement::Bottom => Some(Axis::Column),
            Placement::Tab => None,
        }
    }

    /// Whether the new sibling lands before (left/top) or after the
    /// reference slot.
    pub(crate) fn inserts_before(&self) -> bool {
        matches!(self, Placement::Left | Placement::Top)
    }
}

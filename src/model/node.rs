//! Tree node variants
//!
//! The variant set is fixed: panels never appear directly inside a split
//! container, and split containers never hold panels. Mutating accessors are
//! crate-private; hosts go through the workbench API.

use std::fmt;

use super::{Axis, NodeId};

// ============================================================================
// Panel content
// ============================================================================

/// Content hosted inside a panel, opaque to the layout engine.
///
/// The engine carries the handle along while the panel moves through the
/// tree but never looks inside. Hosts typically wrap a widget or view
/// handle; content is not serialized and is reconstructed through a
/// [`crate::codec::PanelFactory`] on load.
pub trait PanelContent: fmt::Debug {}

/// Unit content for panels that carry no payload (placeholders, tests).
impl PanelContent for () {}

// ============================================================================
// Panel (leaf)
// ============================================================================

/// A leaf node: opaque content with a title and a stable identity.
#[derive(Debug)]
pub struct Panel {
    id: NodeId,
    title: String,
    content: Box<dyn PanelContent>,
}

impl Panel {
    pub(crate) fn new(id: NodeId, title: String, content: Box<dyn PanelContent>) -> Self {
        Self { id, title, content }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn content(&self) -> &dyn PanelContent {
        self.content.as_ref()
    }

    pub fn content_mut(&mut self) -> &mut dyn PanelContent {
        self.content.as_mut()
    }
}

// ============================================================================
// TabGroup
// ============================================================================

/// A container whose children are exclusively panels, shown one at a time.
///
/// Insertion order is tab order. Exactly one child is active while the
/// group is non-empty; an empty group is eligible for removal and never
/// survives a public mutation.
#[derive(Debug)]
pub struct TabGroup {
    id: NodeId,
    panels: Vec<Panel>,
    active: Option<NodeId>,
}

impl TabGroup {
    pub(crate) fn with_panel(id: NodeId, panel: Panel) -> Self {
        let active = Some(panel.id());
        Self {
            id,
            panels: vec![panel],
            active,
        }
    }

    pub(crate) fn restore(id: NodeId, panels: Vec<Panel>, active: NodeId) -> Self {
        Self {
            id,
            panels,
            active: Some(active),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Panels in tab order.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn contains(&self, panel: NodeId) -> bool {
        self.panels.iter().any(|p| p.id() == panel)
    }

    /// Id of the active (visible) panel, `None` only while empty.
    pub fn active_id(&self) -> Option<NodeId> {
        self.active
    }

    /// The active (visible) panel.
    pub fn active_panel(&self) -> Option<&Panel> {
        self.active.and_then(|id| self.panels.iter().find(|p| p.id() == id))
    }

    /// Append a panel and make it active.
    pub(crate) fn push_panel(&mut self, panel: Panel) {
        self.active = Some(panel.id());
        self.panels.push(panel);
    }

    /// Activate a panel by id. Returns true if the active panel changed.
    pub(crate) fn activate(&mut self, panel: NodeId) -> bool {
        if !self.contains(panel) || self.active == Some(panel) {
            return false;
        }
        self.active = Some(panel);
        true
    }

    /// Remove a panel by id. If it was active, the first remaining panel
    /// becomes active.
    pub(crate) fn remove_panel(&mut self, panel: NodeId) -> Option<Panel> {
        let index = self.panels.iter().position(|p| p.id() == panel)?;
        let removed = self.panels.remove(index);
        if self.active == Some(panel) {
            self.active = self.panels.first().map(|p| p.id());
        }
        Some(removed)
    }

    pub(crate) fn panel_mut(&mut self, panel: NodeId) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.id() == panel)
    }
}

// ============================================================================
// SplitContainer
// ============================================================================

/// A container that arranges child containers along one axis with
/// proportional sizes.
///
/// `ratios` always has one positive entry per child. The weights are
/// relative; they need not sum to one.
#[derive(Debug)]
pub struct SplitContainer {
    id: NodeId,
    axis: Axis,
    children: Vec<LayoutNode>,
    ratios: Vec<f32>,
}

impl SplitContainer {
    pub(crate) fn new(id: NodeId, axis: Axis) -> Self {
        Self {
            id,
            axis,
            children: Vec::new(),
            ratios: Vec::new(),
        }
    }

    pub(crate) fn restore(id: NodeId, axis: Axis, children: Vec<LayoutNode>, ratios: Vec<f32>) -> Self {
        Self {
            id,
            axis,
            children,
            ratios,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub(crate) fn set_axis(&mut self, axis: Axis) {
        self.axis = axis;
    }

    /// Child containers, in layout order.
    pub fn children(&self) -> &[LayoutNode] {
        &self.children
    }

    /// Proportional sizes, one per child.
    pub fn ratios(&self) -> &[f32] {
        &self.ratios
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<LayoutNode> {
        &mut self.children
    }

    /// Insert a child, giving every sibling an equal share.
    pub(crate) fn insert_child(&mut self, index: usize, node: LayoutNode) {
        self.children.insert(index, node);
        self.equalize_ratios();
    }

    /// Append a child, giving every sibling an equal share.
    pub(crate) fn push_child(&mut self, node: LayoutNode) {
        self.children.push(node);
        self.equalize_ratios();
    }

    /// Remove a child slot. The remaining weights keep their values.
    pub(crate) fn remove_child_at(&mut self, index: usize) -> LayoutNode {
        self.ratios.remove(index);
        self.children.remove(index)
    }

    pub(crate) fn clear(&mut self) {
        self.children.clear();
        self.ratios.clear();
    }

    fn equalize_ratios(&mut self) {
        let share = 1.0 / self.children.len() as f32;
        self.ratios = vec![share; self.children.len()];
    }

    // ------------------------------------------------------------------------
    // Tree queries (depth-first, left-to-right)
    // ------------------------------------------------------------------------

    /// All panels under this container, in canonical enumeration order.
    pub fn flat_panels(&self) -> Vec<&Panel> {
        let mut panels = Vec::new();
        self.collect_panels(&mut panels);
        panels
    }

    fn collect_panels<'a>(&'a self, panels: &mut Vec<&'a Panel>) {
        for child in &self.children {
            match child {
                LayoutNode::Tab(group) => panels.extend(group.panels()),
                LayoutNode::Split(inner) => inner.collect_panels(panels),
            }
        }
    }

    /// Find a panel anywhere under this container.
    pub fn find_panel(&self, panel: NodeId) -> Option<&Panel> {
        self.group_containing(panel)
            .and_then(|group| group.panels().iter().find(|p| p.id() == panel))
    }

    /// The tab group holding `panel`, if any.
    pub fn group_containing(&self, panel: NodeId) -> Option<&TabGroup> {
        for child in &self.children {
            match child {
                LayoutNode::Tab(group) if group.contains(panel) => return Some(group),
                LayoutNode::Split(inner) => {
                    if let Some(found) = inner.group_containing(panel) {
                        return Some(found);
                    }
                }
                _ => {}
            }
        }
        None
    }

    pub(crate) fn group_containing_mut(&mut self, panel: NodeId) -> Option<&mut TabGroup> {
        for child in &mut self.children {
            match child {
                LayoutNode::Tab(group) if group.contains(panel) => return Some(group),
                LayoutNode::Split(inner) => {
                    if let Some(found) = inner.group_containing_mut(panel) {
                        return Some(found);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

// ============================================================================
// LayoutNode
// ============================================================================

/// A node in the layout tree: a tab group or a nested split container.
#[derive(Debug)]
pub enum LayoutNode {
    Tab(TabGroup),
    Split(SplitContainer),
}

impl LayoutNode {
    pub fn id(&self) -> NodeId {
        match self {
            LayoutNode::Tab(group) => group.id(),
            LayoutNode::Split(split) => split.id(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        match self {
            LayoutNode::Tab(group) => group.is_empty(),
            LayoutNode::Split(split) => split.is_empty(),
        }
    }
}

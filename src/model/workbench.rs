//! Workbench - the public mutation and query API over the layout tree

use std::collections::HashSet;

use crate::codec::{self, DocumentNode, PanelFactory};
use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::events::{ChangeNotifier, SubscriptionId};
use crate::placement;

use super::{Axis, LayoutNode, NodeId, NodeIdGen, Panel, PanelContent, Placement, SplitContainer, TabGroup};

/// Owns the root split container and is the only way to mutate the tree.
///
/// Every operation completes fully - tree mutated, invariants restored -
/// before returning, then emits a single "layout changed" notification.
/// The workbench is single-threaded and synchronous; a multi-threaded host
/// must serialize access to it.
#[derive(Debug)]
pub struct Workbench {
    id: NodeId,
    root: SplitContainer,
    ids: NodeIdGen,
    notifier: ChangeNotifier,
    config: BenchConfig,
}

impl Workbench {
    pub fn new() -> Self {
        Self::with_config(BenchConfig::default())
    }

    pub fn with_config(config: BenchConfig) -> Self {
        let mut ids = NodeIdGen::new();
        let id = ids.fresh();
        let root = SplitContainer::new(ids.fresh(), Axis::Row);
        Self {
            id,
            root,
            ids,
            notifier: ChangeNotifier::new(),
            config,
        }
    }

    pub(crate) fn from_parts(root: SplitContainer, mut ids: NodeIdGen, config: BenchConfig) -> Self {
        let id = ids.fresh();
        Self {
            id,
            root,
            ids,
            notifier: ChangeNotifier::new(),
            config,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The root split container. Read-only; all edits go through methods.
    pub fn root(&self) -> &SplitContainer {
        &self.root
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create a panel and place it on the workbench.
    ///
    /// The first panel ever added is placed directly regardless of the
    /// requested direction. `Tab` placement requires a reference that
    /// resolves to an existing panel; a directional placement with a stale
    /// reference is rejected the same way.
    pub fn add_panel(
        &mut self,
        title: impl Into<String>,
        content: Box<dyn PanelContent>,
        placement: Placement,
        reference: Option<NodeId>,
    ) -> Result<NodeId, BenchError> {
        let title = title.into();
        match (placement, reference) {
            (Placement::Tab, None) => {
                return Err(BenchError::InvalidPlacement(
                    "tab placement requires a reference panel".to_string(),
                ));
            }
            (_, Some(reference)) if self.find_panel(reference).is_none() => {
                return Err(BenchError::InvalidPlacement(format!(
                    "reference panel {reference} no longer exists"
                )));
            }
            _ => {}
        }

        let id = self.ids.fresh();
        tracing::debug!("Adding panel \"{}\" ({}) at {:?}", title, id, placement);
        let panel = Panel::new(id, title, content);
        placement::place_panel(&mut self.root, &mut self.ids, panel, placement, reference)?;

        self.finish_mutation();
        Ok(id)
    }

    /// Remove a panel, destroying it.
    ///
    /// An emptied tab group is removed from its parent split container, and
    /// emptied split containers cascade upward until a container with a
    /// remaining child (or the root) is reached.
    pub fn remove_panel(&mut self, id: NodeId) -> Result<(), BenchError> {
        let Some(panel) = self
            .root
            .group_containing_mut(id)
            .and_then(|group| group.remove_panel(id))
        else {
            return Err(BenchError::NodeNotFound(id));
        };
        tracing::debug!("Removing panel \"{}\" ({})", panel.title(), id);

        placement::prune_empty(&mut self.root);
        self.finish_mutation();
        Ok(())
    }

    /// Move a panel to a new placement, keeping its identity and content.
    ///
    /// The panel is inserted at its destination before its old location is
    /// cleaned up, so cascading removal can never restructure the tree
    /// under the reference first.
    pub fn move_panel(
        &mut self,
        id: NodeId,
        placement: Placement,
        reference: Option<NodeId>,
    ) -> Result<(), BenchError> {
        if self.find_panel(id).is_none() {
            return Err(BenchError::NodeNotFound(id));
        }
        match (placement, reference) {
            (Placement::Tab, None) => {
                return Err(BenchError::InvalidPlacement(
                    "tab placement requires a reference panel".to_string(),
                ));
            }
            (_, Some(reference)) if reference == id => {
                return Err(BenchError::InvalidPlacement(format!(
                    "panel {id} cannot be placed relative to itself"
                )));
            }
            (_, Some(reference)) if self.find_panel(reference).is_none() => {
                return Err(BenchError::InvalidPlacement(format!(
                    "reference panel {reference} no longer exists"
                )));
            }
            _ => {}
        }
        tracing::debug!("Moving panel {} to {:?} (reference {:?})", id, placement, reference);

        // Detach, leaving the emptied group in place until after insertion.
        let Some(panel) = self
            .root
            .group_containing_mut(id)
            .and_then(|group| group.remove_panel(id))
        else {
            return Err(BenchError::NodeNotFound(id));
        };
        placement::place_panel(&mut self.root, &mut self.ids, panel, placement, reference)?;
        placement::prune_empty(&mut self.root);

        self.finish_mutation();
        Ok(())
    }

    /// Make a panel the active (visible) child of its tab group.
    pub fn activate_panel(&mut self, id: NodeId) -> Result<(), BenchError> {
        let Some(group) = self.root.group_containing_mut(id) else {
            return Err(BenchError::NodeNotFound(id));
        };
        if group.activate(id) {
            tracing::debug!("Activated panel {}", id);
            self.finish_mutation();
        }
        Ok(())
    }

    /// Rename a panel.
    pub fn set_panel_title(&mut self, id: NodeId, title: impl Into<String>) -> Result<(), BenchError> {
        let title = title.into();
        let Some(panel) = self
            .root
            .group_containing_mut(id)
            .and_then(|group| group.panel_mut(id))
        else {
            return Err(BenchError::NodeNotFound(id));
        };
        if panel.title() != title {
            panel.set_title(title);
            self.finish_mutation();
        }
        Ok(())
    }

    /// Remove every panel. The root container is the only node left, with
    /// zero children; calling this on an empty workbench is a no-op.
    pub fn clear_all(&mut self) {
        if self.root.is_empty() {
            return;
        }
        tracing::debug!("Clearing all panels");
        self.root.clear();
        self.finish_mutation();
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn find_panel(&self, id: NodeId) -> Option<&Panel> {
        self.root.find_panel(id)
    }

    /// All panels, depth-first and left-to-right. This is the canonical
    /// enumeration order, shared with the layout codec.
    pub fn panels(&self) -> Vec<&Panel> {
        self.root.flat_panels()
    }

    /// The tab group holding a panel. Hosts use this to feed the
    /// drop-target resolver the group under the pointer.
    pub fn group_containing(&self, panel: NodeId) -> Option<&TabGroup> {
        self.root.group_containing(panel)
    }

    // ========================================================================
    // Change notification
    // ========================================================================

    /// Subscribe to the "layout changed" event. Listeners are invoked
    /// synchronously, once per externally-visible mutation, with no
    /// payload; re-query the tree on receipt.
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    /// Remove a listener. Returns false if the handle is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Serialize the layout into a document. Content handles are not
    /// serialized; only structure, ids, and titles.
    pub fn save(&self) -> DocumentNode {
        codec::save_layout(self)
    }

    /// Replace the whole tree with a saved layout.
    ///
    /// All-or-nothing: on any error the current tree is left untouched.
    /// Subscriptions survive the reload and fire once on success.
    pub fn load(&mut self, doc: &DocumentNode, factory: &dyn PanelFactory) -> Result<(), BenchError> {
        let (root, ids) = codec::load_tree(doc, factory)?;
        self.root = root;
        self.ids = ids;
        tracing::debug!("Loaded layout with {} panels", self.root.flat_panels().len());
        self.finish_mutation();
        Ok(())
    }

    fn finish_mutation(&mut self) {
        if self.config.debug_layout {
            self.assert_invariants();
        }
        self.notifier.emit();
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Invariant Validation
// ============================================================================

impl Workbench {
    /// Validate the structural invariants, panicking with a description on
    /// the first violation.
    ///
    /// Runs automatically after every mutation when
    /// [`BenchConfig::debug_layout`] is set; tests call it directly.
    pub fn assert_invariants(&self) {
        let mut seen = HashSet::new();
        seen.insert(self.id);
        check_split(&self.root, true, &mut seen);
    }
}

fn check_split(split: &SplitContainer, is_root: bool, seen: &mut HashSet<NodeId>) {
    assert!(seen.insert(split.id()), "duplicate node id {}", split.id());
    assert_eq!(
        split.ratios().len(),
        split.children().len(),
        "split container {} has {} children but {} size entries",
        split.id(),
        split.children().len(),
        split.ratios().len()
    );
    for ratio in split.ratios() {
        assert!(
            *ratio > 0.0,
            "split container {} has non-positive size entry {}",
            split.id(),
            ratio
        );
    }
    assert!(
        is_root || !split.is_empty(),
        "non-root split container {} is empty",
        split.id()
    );

    for child in split.children() {
        match child {
            LayoutNode::Tab(group) => check_group(group, seen),
            LayoutNode::Split(inner) => check_split(inner, false, seen),
        }
    }
}

fn check_group(group: &TabGroup, seen: &mut HashSet<NodeId>) {
    assert!(seen.insert(group.id()), "duplicate node id {}", group.id());
    assert!(!group.is_empty(), "tab group {} is empty", group.id());
    assert!(
        group.active_id().is_some_and(|active| group.contains(active)),
        "tab group {} has no valid active panel",
        group.id()
    );
    for panel in group.panels() {
        assert!(seen.insert(panel.id()), "duplicate node id {}", panel.id());
    }
}

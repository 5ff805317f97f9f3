//! Placement resolution
//!
//! Pure tree-edit functions behind the workbench mutations: given the
//! current tree shape and a requested placement, apply the minimal edit
//! (tab append, sibling insert, intermediate split, or root re-wrap). No
//! geometry, no notification; callers validate references before handing a
//! panel in.

use crate::error::BenchError;
use crate::model::{LayoutNode, NodeId, NodeIdGen, Panel, Placement, SplitContainer, TabGroup};

/// Insert `panel` into the tree under `root` according to `placement`.
pub(crate) fn place_panel(
    root: &mut SplitContainer,
    ids: &mut NodeIdGen,
    panel: Panel,
    placement: Placement,
    reference: Option<NodeId>,
) -> Result<(), BenchError> {
    match (placement, reference) {
        (Placement::Tab, Some(reference)) => {
            let Some(group) = root.group_containing_mut(reference) else {
                return Err(BenchError::InvalidPlacement(format!(
                    "reference panel {reference} no longer exists"
                )));
            };
            group.push_panel(panel);
            Ok(())
        }
        (Placement::Tab, None) => Err(BenchError::InvalidPlacement(
            "tab placement requires a reference panel".to_string(),
        )),
        (_, Some(reference)) => {
            let mut slot = Some(panel);
            if insert_beside(root, ids, &mut slot, reference, placement) {
                Ok(())
            } else {
                Err(BenchError::InvalidPlacement(format!(
                    "reference panel {reference} no longer exists"
                )))
            }
        }
        (_, None) => {
            insert_absolute(root, ids, panel, placement);
            Ok(())
        }
    }
}

/// Insert a new tab group for `panel` beside the group holding `reference`.
///
/// When the parent split already runs along the placement's axis the new
/// group becomes a plain sibling. A single-child parent has no meaningful
/// orientation yet and is re-axed instead of wrapped. Otherwise the
/// reference group is wrapped in an intermediate split with the requested
/// axis, keeping its slot (and its weight) in the parent.
///
/// Returns false if `reference` is not under `split`; `slot` then still
/// holds the panel.
fn insert_beside(
    split: &mut SplitContainer,
    ids: &mut NodeIdGen,
    slot: &mut Option<Panel>,
    reference: NodeId,
    placement: Placement,
) -> bool {
    let axis = match placement.axis() {
        Some(axis) => axis,
        None => return false,
    };

    let position = split
        .children()
        .iter()
        .position(|child| matches!(child, LayoutNode::Tab(group) if group.contains(reference)));

    if let Some(index) = position {
        let Some(panel) = slot.take() else {
            return false;
        };
        let group = TabGroup::with_panel(ids.fresh(), panel);

        if split.axis() == axis || split.len() == 1 {
            split.set_axis(axis);
            let at = if placement.inserts_before() { index } else { index + 1 };
            split.insert_child(at, LayoutNode::Tab(group));
        } else {
            let inner_id = ids.fresh();
            let current = std::mem::replace(
                &mut split.children_mut()[index],
                LayoutNode::Split(SplitContainer::new(inner_id, axis)),
            );
            let LayoutNode::Split(inner) = &mut split.children_mut()[index] else {
                unreachable!("intermediate container was just installed");
            };
            inner.push_child(current);
            let at = if placement.inserts_before() { 0 } else { 1 };
            inner.insert_child(at, LayoutNode::Tab(group));
        }
        return true;
    }

    for child in split.children_mut() {
        if let LayoutNode::Split(inner) = child {
            if insert_beside(inner, ids, slot, reference, placement) {
                return true;
            }
        }
    }
    false
}

/// Insert a new tab group for `panel` at the outer border of the workbench.
///
/// A mismatched root axis is re-balanced exactly once: the existing root
/// content is wrapped into a child of a fresh root with the requested axis.
/// No deeper rebalancing is ever attempted.
fn insert_absolute(root: &mut SplitContainer, ids: &mut NodeIdGen, panel: Panel, placement: Placement) {
    let Some(axis) = placement.axis() else {
        // Tab without reference is rejected before this point
        return;
    };
    let group = TabGroup::with_panel(ids.fresh(), panel);

    if root.is_empty() {
        root.set_axis(axis);
        root.push_child(LayoutNode::Tab(group));
    } else if root.axis() == axis {
        let at = if placement.inserts_before() { 0 } else { root.len() };
        root.insert_child(at, LayoutNode::Tab(group));
    } else {
        let new_root = SplitContainer::new(ids.fresh(), axis);
        let old_root = std::mem::replace(root, new_root);
        root.push_child(LayoutNode::Split(old_root));
        let at = if placement.inserts_before() { 0 } else { 1 };
        root.insert_child(at, LayoutNode::Tab(group));
    }
}

/// Remove empty tab groups and split containers, cascading upward.
///
/// Depth-first, so a child split emptied by its own pruning is gone before
/// its parent is judged. The root itself is kept even with zero children.
pub(crate) fn prune_empty(root: &mut SplitContainer) {
    let mut index = 0;
    while index < root.len() {
        let child = &mut root.children_mut()[index];
        if let LayoutNode::Split(inner) = child {
            prune_empty(inner);
        }
        if child.is_empty() {
            root.remove_child_at(index);
        } else {
            index += 1;
        }
    }
}

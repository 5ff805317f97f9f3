//! Layout persistence
//!
//! Converts the tree to a JSON-compatible plain document and reconstructs
//! an equivalent tree from one. Every node carries a `kind` tag
//! (`"split"`, `"tab"`, `"panel"`); reconstruction dispatches over the
//! closed set of kinds - never over type names - and materializes panel
//! content through a caller-supplied [`PanelFactory`].
//!
//! Loading is all-or-nothing: a malformed node or an unregistered panel
//! leaves nothing half-built.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::model::{Axis, LayoutNode, NodeId, NodeIdGen, Panel, PanelContent, SplitContainer, TabGroup, Workbench};

// ============================================================================
// Document tree
// ============================================================================

/// A node of the persisted layout document.
///
/// The root of a saved layout is always a `Split`. Ids are decimal strings;
/// they round-trip losslessly and the workbench never hands them out again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DocumentNode {
    /// Split container: children arranged along an axis with proportional
    /// sizes, preserved verbatim
    #[serde(rename_all = "camelCase")]
    Split {
        id: String,
        axis: Axis,
        relative_sizes: Vec<f32>,
        children: Vec<DocumentNode>,
    },
    /// Tab group: panel children in tab order, one of them active
    #[serde(rename_all = "camelCase")]
    Tab {
        id: String,
        active_child_id: String,
        children: Vec<DocumentNode>,
    },
    /// Panel leaf: title only; content is reconstructed by the factory
    Panel { id: String, title: String },
}

/// Serialize a layout document to a JSON string.
pub fn to_json(doc: &DocumentNode) -> Result<String, BenchError> {
    serde_json::to_string_pretty(doc).map_err(|e| BenchError::MalformedDocument(e.to_string()))
}

/// Parse a layout document from JSON.
///
/// Unknown kinds and shape mismatches surface as
/// [`BenchError::MalformedDocument`].
pub fn from_json(json: &str) -> Result<DocumentNode, BenchError> {
    serde_json::from_str(json).map_err(|e| BenchError::MalformedDocument(e.to_string()))
}

// ============================================================================
// Panel factories
// ============================================================================

/// Reconstructs panel content during load from the saved title and id.
///
/// Content handles are never serialized, so the caller must supply
/// something able to rebuild or re-attach content. Return `None` for an
/// unknown panel; load surfaces it as
/// [`BenchError::UnregisteredPanelKind`].
pub trait PanelFactory {
    fn create(&self, title: &str, id: NodeId) -> Option<Box<dyn PanelContent>>;
}

impl<F> PanelFactory for F
where
    F: Fn(&str, NodeId) -> Option<Box<dyn PanelContent>>,
{
    fn create(&self, title: &str, id: NodeId) -> Option<Box<dyn PanelContent>> {
        self(title, id)
    }
}

/// Panel factory backed by an explicit title registry, populated at
/// start-up by the host.
#[derive(Default)]
pub struct PanelRegistry {
    factories: HashMap<String, Box<dyn Fn(NodeId) -> Box<dyn PanelContent>>>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a content factory for panels saved under `title`.
    pub fn register(
        &mut self,
        title: impl Into<String>,
        factory: impl Fn(NodeId) -> Box<dyn PanelContent> + 'static,
    ) {
        self.factories.insert(title.into(), Box::new(factory));
    }

    pub fn is_registered(&self, title: &str) -> bool {
        self.factories.contains_key(title)
    }
}

impl PanelFactory for PanelRegistry {
    fn create(&self, title: &str, id: NodeId) -> Option<Box<dyn PanelContent>> {
        self.factories.get(title).map(|factory| factory(id))
    }
}

impl fmt::Debug for PanelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut titles: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        titles.sort_unstable();
        f.debug_struct("PanelRegistry").field("titles", &titles).finish()
    }
}

// ============================================================================
// Save
// ============================================================================

/// Serialize a workbench layout into a document.
pub fn save_layout(bench: &Workbench) -> DocumentNode {
    save_split(bench.root())
}

fn save_split(split: &SplitContainer) -> DocumentNode {
    DocumentNode::Split {
        id: split.id().to_string(),
        axis: split.axis(),
        relative_sizes: split.ratios().to_vec(),
        children: split.children().iter().map(save_node).collect(),
    }
}

fn save_node(node: &LayoutNode) -> DocumentNode {
    match node {
        LayoutNode::Tab(group) => save_group(group),
        LayoutNode::Split(split) => save_split(split),
    }
}

fn save_group(group: &TabGroup) -> DocumentNode {
    // A tab group in a live tree is never empty, so it has an active panel
    let active_child_id = group
        .active_id()
        .map(|id| id.to_string())
        .unwrap_or_default();
    DocumentNode::Tab {
        id: group.id().to_string(),
        active_child_id,
        children: group
            .panels()
            .iter()
            .map(|panel| DocumentNode::Panel {
                id: panel.id().to_string(),
                title: panel.title().to_string(),
            })
            .collect(),
    }
}

// ============================================================================
// Load
// ============================================================================

/// Reconstruct a workbench from a document, with default configuration.
///
/// See [`Workbench::load`] for loading into an existing workbench (keeping
/// its configuration and subscribers).
pub fn load_layout(doc: &DocumentNode, factory: &dyn PanelFactory) -> Result<Workbench, BenchError> {
    let (root, ids) = load_tree(doc, factory)?;
    Ok(Workbench::from_parts(root, ids, BenchConfig::default()))
}

/// Build the tree and a continuing id generator from a document.
pub(crate) fn load_tree(
    doc: &DocumentNode,
    factory: &dyn PanelFactory,
) -> Result<(SplitContainer, NodeIdGen), BenchError> {
    if !matches!(doc, DocumentNode::Split { .. }) {
        return Err(BenchError::MalformedDocument(
            "root node must be a split container".to_string(),
        ));
    }

    let mut loader = Loader {
        factory,
        seen: HashSet::new(),
        highest: 0,
    };
    let root = loader.load_split(doc, true)?;
    Ok((root, NodeIdGen::after(loader.highest)))
}

struct Loader<'a> {
    factory: &'a dyn PanelFactory,
    seen: HashSet<u64>,
    highest: u64,
}

impl Loader<'_> {
    fn parse_id(&mut self, raw: &str) -> Result<NodeId, BenchError> {
        let value: u64 = raw
            .parse()
            .map_err(|_| BenchError::MalformedDocument(format!("invalid node id \"{raw}\"")))?;
        if !self.seen.insert(value) {
            return Err(BenchError::MalformedDocument(format!(
                "duplicate node id \"{raw}\""
            )));
        }
        self.highest = self.highest.max(value);
        Ok(NodeId(value))
    }

    fn load_split(&mut self, doc: &DocumentNode, is_root: bool) -> Result<SplitContainer, BenchError> {
        let DocumentNode::Split {
            id,
            axis,
            relative_sizes,
            children,
        } = doc
        else {
            return Err(BenchError::MalformedDocument(
                "expected a split container node".to_string(),
            ));
        };

        let id = self.parse_id(id)?;
        if relative_sizes.len() != children.len() {
            return Err(BenchError::MalformedDocument(format!(
                "split {id} has {} children but {} size entries",
                children.len(),
                relative_sizes.len()
            )));
        }
        if relative_sizes.iter().any(|size| *size <= 0.0) {
            return Err(BenchError::MalformedDocument(format!(
                "split {id} has a non-positive size entry"
            )));
        }
        if children.is_empty() && !is_root {
            return Err(BenchError::MalformedDocument(format!(
                "non-root split {id} has no children"
            )));
        }

        let mut nodes = Vec::with_capacity(children.len());
        for child in children {
            let node = match child {
                DocumentNode::Split { .. } => LayoutNode::Split(self.load_split(child, false)?),
                DocumentNode::Tab { .. } => LayoutNode::Tab(self.load_group(child)?),
                DocumentNode::Panel { id, .. } => {
                    return Err(BenchError::MalformedDocument(format!(
                        "panel {id} cannot be a direct child of a split container"
                    )));
                }
            };
            nodes.push(node);
        }

        Ok(SplitContainer::restore(id, *axis, nodes, relative_sizes.clone()))
    }

    fn load_group(&mut self, doc: &DocumentNode) -> Result<TabGroup, BenchError> {
        let DocumentNode::Tab {
            id,
            active_child_id,
            children,
        } = doc
        else {
            return Err(BenchError::MalformedDocument(
                "expected a tab group node".to_string(),
            ));
        };

        let id = self.parse_id(id)?;
        if children.is_empty() {
            return Err(BenchError::MalformedDocument(format!(
                "tab group {id} has no panels"
            )));
        }

        let mut panels = Vec::with_capacity(children.len());
        let mut active = None;
        for child in children {
            let DocumentNode::Panel { id: panel_id, title } = child else {
                return Err(BenchError::MalformedDocument(format!(
                    "tab group {id} may only contain panels"
                )));
            };
            let is_active = panel_id == active_child_id;
            let panel_id = self.parse_id(panel_id)?;
            let Some(content) = self.factory.create(title, panel_id) else {
                return Err(BenchError::UnregisteredPanelKind {
                    title: title.clone(),
                    id: panel_id,
                });
            };
            if is_active {
                active = Some(panel_id);
            }
            panels.push(Panel::new(panel_id, title.clone(), content));
        }

        let Some(active) = active else {
            return Err(BenchError::MalformedDocument(format!(
                "tab group {id} activeChildId \"{active_child_id}\" does not match any child"
            )));
        };
        Ok(TabGroup::restore(id, panels, active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Placement;

    fn sample_bench() -> Workbench {
        let mut bench = Workbench::new();
        let log = bench
            .add_panel("Log", Box::new(()), Placement::Bottom, None)
            .unwrap();
        bench
            .add_panel("Chart", Box::new(()), Placement::Right, Some(log))
            .unwrap();
        bench
    }

    #[test]
    fn test_document_json_shape() {
        let doc = save_layout(&sample_bench());
        let value: serde_json::Value = serde_json::from_str(&to_json(&doc).unwrap()).unwrap();

        assert_eq!(value["kind"], "split");
        assert_eq!(value["axis"], "row");
        assert_eq!(value["relativeSizes"].as_array().unwrap().len(), 2);

        let group = &value["children"][0];
        assert_eq!(group["kind"], "tab");
        assert!(group["activeChildId"].is_string());

        let panel = &group["children"][0];
        assert_eq!(panel["kind"], "panel");
        assert_eq!(panel["title"], "Log");
        assert!(panel["id"].is_string());
    }

    #[test]
    fn test_unknown_kind_is_malformed() {
        let err = from_json(r#"{"kind": "blob", "id": "1"}"#).unwrap_err();
        assert!(matches!(err, BenchError::MalformedDocument(_)));
    }

    #[test]
    fn test_json_round_trip_preserves_document() {
        let doc = save_layout(&sample_bench());
        let parsed = from_json(&to_json(&doc).unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_registry_reports_registered_titles() {
        let mut registry = PanelRegistry::new();
        registry.register("Log", |_| Box::new(()));

        assert!(registry.is_registered("Log"));
        assert!(!registry.is_registered("Chart"));
        assert!(registry.create("Log", NodeId(1)).is_some());
        assert!(registry.create("Chart", NodeId(1)).is_none());
    }
}

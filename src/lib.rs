//! dockbench - tiling dock-layout engine
//!
//! The structural core of an IDE-like workbench: arbitrary content panels
//! can be attached, split into resizable regions, grouped into tabs, moved
//! by drag gesture, and persisted/restored as a layout document.
//!
//! The engine owns structure only. It never interprets panel contents,
//! never paints, and consumes already-computed pointer coordinates; the
//! host UI renders the tree and drives it through [`Workbench`]:
//!
//! ```
//! use dockbench::{Placement, Workbench};
//!
//! let mut bench = Workbench::new();
//! let log = bench.add_panel("Log", Box::new(()), Placement::Bottom, None).unwrap();
//! bench.add_panel("Chart", Box::new(()), Placement::Right, Some(log)).unwrap();
//! assert_eq!(bench.panels().len(), 2);
//! ```

pub mod codec;
pub mod config;
pub mod drop;
pub mod error;
pub mod events;
pub mod model;

mod placement;

// Re-export commonly used types
pub use codec::{from_json, load_layout, save_layout, to_json, DocumentNode, PanelFactory, PanelRegistry};
pub use config::{BenchConfig, DropConfig};
pub use drop::{DropIntent, DropTargetResolver, Rect};
pub use error::BenchError;
pub use events::SubscriptionId;
pub use model::{Axis, LayoutNode, NodeId, Panel, PanelContent, Placement, SplitContainer, TabGroup, Workbench};

//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use dockbench::{NodeId, Panel, PanelContent, PanelRegistry, Placement, Workbench};

/// Panel content stub carrying a label so tests can tell handles apart.
#[derive(Debug, PartialEq, Eq)]
pub struct StubContent(pub &'static str);

impl PanelContent for StubContent {}

pub fn content(label: &'static str) -> Box<dyn PanelContent> {
    Box::new(StubContent(label))
}

/// Opt into test log output via RUST_LOG (e.g. RUST_LOG=dockbench=debug).
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Workbench with one panel per title, each added with absolute Bottom
/// placement (so they stack as separate groups in a column).
pub fn bench_with(titles: &[&'static str]) -> (Workbench, Vec<NodeId>) {
    let mut bench = Workbench::new();
    let ids = titles
        .iter()
        .map(|title| {
            bench
                .add_panel(*title, content(title), Placement::Bottom, None)
                .expect("absolute placement cannot fail")
        })
        .collect();
    (bench, ids)
}

/// Panel titles in canonical enumeration order.
pub fn titles(bench: &Workbench) -> Vec<String> {
    bench.panels().iter().map(|p| p.title().to_string()).collect()
}

/// Registry able to rebuild every panel created by [`content`].
pub fn registry_for(titles: &[&'static str]) -> PanelRegistry {
    let mut registry = PanelRegistry::new();
    for title in titles {
        let title = *title;
        registry.register(title, move |_| Box::new(StubContent(title)));
    }
    registry
}

/// Debug rendering of a panel's content, for identity checks across moves.
pub fn content_label(panel: &Panel) -> String {
    format!("{:?}", panel.content())
}

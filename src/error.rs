//! Error types for workbench and codec operations

use thiserror::Error;

use crate::model::NodeId;

/// Error type for all workbench and codec operations.
///
/// Every error is raised synchronously at the call that caused it and
/// nothing is retried internally; re-issuing a corrected call is up to the
/// caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BenchError {
    /// Tab placement without a resolvable reference, or a reference panel
    /// that no longer exists
    #[error("invalid placement: {0}")]
    InvalidPlacement(String),

    /// An operation referenced an id that is not on the workbench
    #[error("no node with id {0} on the workbench")]
    NodeNotFound(NodeId),

    /// A layout document failed validation during load
    #[error("malformed layout document: {0}")]
    MalformedDocument(String),

    /// The panel factory could not materialize a saved panel
    #[error("no panel content registered for \"{title}\" (id {id})")]
    UnregisteredPanelKind { title: String, id: NodeId },
}

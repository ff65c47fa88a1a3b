//! Error types shared by the graph arena and the function catalog.

use thiserror::Error;

use crate::graph::NodeId;

/// Errors returned by graph and catalog operations.
///
/// Short-input conditions inside the function library are not errors: they
/// resolve to the node's default output and never surface here.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The handle does not name a node in this graph.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// The node is still an input of other nodes and cannot be released.
    #[error("node {node} is still an input of {dependents} node(s)")]
    NodeInUse { node: NodeId, dependents: usize },

    /// No catalog entry has this name.
    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    /// The catalog index is past the end of the function set.
    #[error("function index {index} out of range (catalog has {len} entries)")]
    FunctionIndexOutOfRange { index: usize, len: usize },

    /// The graph configuration could not be parsed.
    #[error("invalid graph config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;

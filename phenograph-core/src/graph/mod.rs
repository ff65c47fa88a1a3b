//! Decision Graph
//!
//! This module implements the memoized computation graph that backs an
//! evolved decision function.
//!
//! # Overview
//!
//! The graph is a directed acyclic graph (DAG) where:
//!
//! - Nodes are constants or apply a [`FunctionId`](crate::function::FunctionId)
//!   to the outputs of their ordered inputs
//! - Input edges point from a node to the nodes it reads; the reverse
//!   (dependent) edges exist only to propagate cache invalidation
//!
//! Reading a node's output pulls values down through its inputs, caching
//! every intermediate result. Mutating a node pushes invalidation up through
//! its dependents.
//!
//! # Design Decisions
//!
//! 1. All nodes live in one arena and refer to each other by [`NodeId`], so a
//!    dependent edge can never dangle. Several parents may share one input
//!    subgraph.
//!
//! 2. Input lists are ordered and may repeat a node; dependent sets are
//!    unordered and kept symmetric with the input lists on every mutation.
//!
//! 3. Acyclicity is a precondition and is never checked.

mod arena;
mod inputs;
mod node;
mod shared;

pub use arena::{EvalStats, Graph};
pub(crate) use inputs::NodeInputs;
pub use node::{InputList, Node, NodeId};
pub use shared::SharedGraph;

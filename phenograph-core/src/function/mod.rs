//! Node Functions
//!
//! This module holds the primitive functions a decision-graph node can apply
//! and the catalog that names them.
//!
//! # Overview
//!
//! - `catalog`: [`FunctionId`], the index-stable list of function identities.
//!   Index 0 is [`FunctionId::Constant`], the identity of a node that simply
//!   outputs its default value.
//! - `library`: the implementations. They are private to the crate and only
//!   run when [`Graph::output`](crate::graph::Graph::output) recomputes a
//!   node.
//!
//! Functions are pure: they read their node's inputs through a borrowed view
//! and never mutate graph structure.

mod catalog;
mod library;
mod reduce;

pub use catalog::{Arity, FunctionId};

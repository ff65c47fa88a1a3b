//! Phenograph Core
//!
//! This crate provides memoized decision graphs for genetic-programming
//! phenotypes. It implements:
//!
//! - A node arena with lazy, cached evaluation
//! - Cache invalidation pushed through dependent edges on every mutation
//! - A library of variable-arity numeric primitives
//! - An index-stable function catalog for encoding node behavior
//!
//! Building, mutating and crossing over graphs is left to the genetic
//! algorithm driving this crate; it only reads outputs as fitness signals.
//!
//! # Architecture
//!
//! - `graph`: the node arena, evaluation and invalidation
//! - `function`: the function catalog and its implementations
//! - `config`: graph tunables
//! - `error`: the crate error type
//!
//! # Example
//!
//! ```rust
//! use phenograph_core::{FunctionId, Graph};
//!
//! let mut graph = Graph::new();
//! let value = graph.add_constant(5.0);
//! let condition = graph.add_constant(1.0);
//! let gate = graph.add_function(FunctionId::Gate);
//! graph.add_inputs(gate, &[value, condition]).unwrap();
//!
//! assert_eq!(graph.output(gate).unwrap(), 5.0);
//!
//! // Closing the gate invalidates it before the next read.
//! graph.set_default_output(condition, 0.0).unwrap();
//! assert!(!graph.is_cache_valid(gate).unwrap());
//! assert_eq!(graph.output(gate).unwrap(), 0.0);
//! ```

pub mod config;
pub mod error;
pub mod function;
pub mod graph;

pub use config::GraphConfig;
pub use error::{GraphError, Result};
pub use function::{Arity, FunctionId};
pub use graph::{EvalStats, Graph, Node, NodeId, SharedGraph};

//! Graph Nodes
//!
//! This module defines the vertices stored in a [`Graph`](super::Graph).

use std::fmt;

use indexmap::IndexSet;
use smallvec::SmallVec;

use crate::function::FunctionId;

/// Handle to a node in a [`Graph`](super::Graph).
///
/// Handles are allocated by the graph and never reused, so a handle to a
/// released node cannot alias a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Input list storage. Most evolved nodes have only a handful of inputs.
pub type InputList = SmallVec<[NodeId; 4]>;

/// A node in a decision graph.
///
/// A node is either a constant (its function is [`FunctionId::Constant`]) or
/// applies a function to the outputs of its ordered inputs. The output is
/// memoized until the node, or anything it transitively reads, is mutated.
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// Nodes this node reads from, in order. Duplicates are allowed.
    inputs: InputList,

    function: FunctionId,

    /// Output of a constant node, and the fallback for functions whose
    /// inputs are not connected.
    default_output: f64,

    /// Nodes that list this node as an input. Only used for invalidation.
    dependents: IndexSet<NodeId>,

    /// Last computed output; `None` when the cache is invalid.
    cached_output: Option<f64>,
}

impl Node {
    /// Create a constant node with the given output.
    pub fn constant(value: f64) -> Self {
        Self {
            default_output: value,
            ..Self::default()
        }
    }

    /// Create a node applying `function`, with a default output of 0.
    pub fn with_function(function: FunctionId) -> Self {
        Self {
            function,
            ..Self::default()
        }
    }

    /// Builder-style setter for the default output.
    pub fn default_output_of(mut self, value: f64) -> Self {
        self.default_output = value;
        self
    }

    pub fn function(&self) -> FunctionId {
        self.function
    }

    pub fn default_output(&self) -> f64 {
        self.default_output
    }

    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn dependents(&self) -> &IndexSet<NodeId> {
        &self.dependents
    }

    /// Check if the cached output is valid.
    pub fn is_cache_valid(&self) -> bool {
        self.cached_output.is_some()
    }

    /// The cached output, if valid.
    pub fn cached_output(&self) -> Option<f64> {
        self.cached_output
    }

    pub(crate) fn set_function(&mut self, function: FunctionId) {
        self.function = function;
    }

    /// Returns true if the value changed.
    pub(crate) fn set_default_output(&mut self, value: f64) -> bool {
        if self.default_output != value {
            self.default_output = value;
            true
        } else {
            false
        }
    }

    pub(crate) fn inputs_mut(&mut self) -> &mut InputList {
        &mut self.inputs
    }

    pub(crate) fn take_inputs(&mut self) -> InputList {
        std::mem::take(&mut self.inputs)
    }

    pub(crate) fn add_dependent(&mut self, node_id: NodeId) {
        self.dependents.insert(node_id);
    }

    pub(crate) fn remove_dependent(&mut self, node_id: NodeId) {
        self.dependents.shift_remove(&node_id);
    }

    pub(crate) fn store_output(&mut self, value: f64) {
        self.cached_output = Some(value);
    }

    pub(crate) fn invalidate(&mut self) {
        self.cached_output = None;
    }

    /// Drop state that only makes sense inside a graph, before insertion.
    pub(crate) fn detached(mut self) -> Self {
        self.inputs.clear();
        self.dependents.clear();
        self.cached_output = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_node_is_zero_constant() {
        let node = Node::default();
        assert_eq!(node.function(), FunctionId::Constant);
        assert_eq!(node.default_output(), 0.0);
        assert!(node.inputs().is_empty());
        assert!(!node.is_cache_valid());
    }

    #[test]
    fn builders() {
        let constant = Node::constant(2.5);
        assert_eq!(constant.default_output(), 2.5);
        assert!(constant.function().is_constant());

        let gate = Node::with_function(FunctionId::Gate).default_output_of(-1.0);
        assert_eq!(gate.function(), FunctionId::Gate);
        assert_eq!(gate.default_output(), -1.0);
    }

    #[test]
    fn default_output_reports_changes() {
        let mut node = Node::constant(1.0);
        assert!(!node.set_default_output(1.0));
        assert!(node.set_default_output(2.0));
        assert!(node.set_default_output(f64::NAN));
        assert!(node.set_default_output(f64::NAN));
    }

    #[test]
    fn dependent_management() {
        let mut node = Node::default();
        let a = NodeId::from(1);
        let b = NodeId::from(2);

        node.add_dependent(a);
        node.add_dependent(b);
        node.add_dependent(a);
        assert_eq!(node.dependents().len(), 2);

        node.remove_dependent(a);
        assert!(!node.dependents().contains(&a));
        assert!(node.dependents().contains(&b));
    }

    #[test]
    fn cache_transitions() {
        let mut node = Node::constant(3.0);
        node.store_output(3.0);
        assert_eq!(node.cached_output(), Some(3.0));

        node.invalidate();
        assert!(!node.is_cache_valid());
    }

    #[test]
    fn node_ids_display_with_hash() {
        assert_eq!(NodeId::from(7).to_string(), "#7");
        assert_eq!(NodeId::from(7).raw(), 7);
    }
}

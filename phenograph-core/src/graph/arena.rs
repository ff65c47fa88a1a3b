//! Graph Arena
//!
//! [`Graph`] owns every node of a decision graph and addresses them by
//! [`NodeId`]. Input edges point from a node to the nodes it reads; each input
//! keeps the reverse edge in its dependent set so mutations can be pushed
//! upward.
//!
//! # Algorithm
//!
//! Reads pull, writes push:
//!
//! 1. `output` returns the cached value if valid. Otherwise it applies the
//!    node's function, which reads inputs through their own memoized outputs,
//!    then stores the result.
//! 2. Any mutation of a node's function, inputs or default output marks the
//!    node invalid and walks every dependent edge transitively. The walk does
//!    not stop at nodes that are already invalid; it terminates because the
//!    graph is acyclic.
//!
//! Acyclicity is the caller's responsibility and is not checked. Wiring a
//! cycle makes `output` and invalidation recurse without bound.
//!
//! # Thread Safety
//!
//! A graph has no internal locking. Use [`SharedGraph`](super::SharedGraph)
//! to share one between threads.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use super::inputs::NodeInputs;
use super::node::{InputList, Node, NodeId};
use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::function::FunctionId;

/// Counters describing the evaluation work a graph has done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalStats {
    /// Function applications, i.e. cache misses.
    pub recomputations: u64,
    /// Reads answered from a valid cache.
    pub cache_hits: u64,
    /// Nodes visited by invalidation walks, counting repeats.
    pub invalidations: u64,
}

/// An arena of decision-graph nodes.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// All nodes, indexed by ID. Iterates in insertion order.
    nodes: IndexMap<NodeId, Node>,
    next_id: u64,
    config: GraphConfig,
    stats: EvalStats,
}

impl Graph {
    /// Create an empty graph with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn stats(&self) -> EvalStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = EvalStats::default();
    }

    /// Add a standalone node and return its handle.
    ///
    /// Edges carried by `node` are discarded; wire it with
    /// [`add_input`](Self::add_input) and friends.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId::from(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node.detached());
        id
    }

    /// Add a constant node.
    pub fn add_constant(&mut self, value: f64) -> NodeId {
        self.add_node(Node::constant(value))
    }

    /// Add a node applying `function`, with a default output of 0.
    pub fn add_function(&mut self, function: FunctionId) -> NodeId {
        self.add_node(Node::with_function(function))
    }

    /// Get a reference to a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Get the total number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Handles of all nodes, in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn inputs(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.get(id)?.inputs())
    }

    pub fn dependents(&self, id: NodeId) -> Result<&IndexSet<NodeId>> {
        Ok(self.get(id)?.dependents())
    }

    pub fn default_output(&self, id: NodeId) -> Result<f64> {
        Ok(self.get(id)?.default_output())
    }

    pub fn is_cache_valid(&self, id: NodeId) -> Result<bool> {
        Ok(self.get(id)?.is_cache_valid())
    }

    /// Get the output of a node, recomputing it only if its cache is invalid.
    ///
    /// Evaluation recurses once per level of input edges, so a chain of
    /// invalid nodes tens of thousands deep can overflow the thread's stack.
    /// Reading a long chain bottom-up keeps each call shallow.
    pub fn output(&mut self, id: NodeId) -> Result<f64> {
        self.get(id)?;
        Ok(self.evaluate(id))
    }

    /// Outputs of all inputs of `id`, in input order.
    pub fn input_values(&mut self, id: NodeId) -> Result<Vec<f64>> {
        self.with_inputs(id, |inputs| inputs.values())
    }

    /// Outputs of the inputs of `id` at `indices`, in the order given.
    ///
    /// The inner `None` means some index was out of range; it is not an error.
    pub fn input_values_at<const N: usize>(
        &mut self,
        id: NodeId,
        indices: [usize; N],
    ) -> Result<Option<[f64; N]>> {
        self.with_inputs(id, |inputs| inputs.values_at(indices))
    }

    /// Replace the function of a node.
    pub fn set_function(&mut self, id: NodeId, function: FunctionId) -> Result<()> {
        self.get_mut(id)?.set_function(function);
        debug!(node = %id, %function, "set node function");
        self.invalidate(id);
        Ok(())
    }

    /// Set the default output. Caches are only invalidated if the value
    /// actually changes.
    pub fn set_default_output(&mut self, id: NodeId, value: f64) -> Result<()> {
        if self.get_mut(id)?.set_default_output(value) {
            self.invalidate(id);
        }
        Ok(())
    }

    /// Append one input to a node.
    pub fn add_input(&mut self, id: NodeId, input: NodeId) -> Result<()> {
        self.add_inputs(id, &[input])
    }

    /// Append several inputs to a node with a single invalidation pass.
    pub fn add_inputs(&mut self, id: NodeId, inputs: &[NodeId]) -> Result<()> {
        self.get(id)?;
        self.ensure_all(inputs)?;

        self.get_mut(id)?.inputs_mut().extend_from_slice(inputs);
        self.register_dependent(id, inputs);
        debug!(node = %id, added = inputs.len(), "appended node inputs");
        self.invalidate(id);
        Ok(())
    }

    /// Replace the whole input list of a node.
    ///
    /// The node is removed from the dependent sets of its previous inputs, so
    /// a detached input no longer invalidates it.
    pub fn set_inputs(&mut self, id: NodeId, inputs: &[NodeId]) -> Result<()> {
        self.get(id)?;
        self.ensure_all(inputs)?;

        let previous = self.get_mut(id)?.take_inputs();
        self.unregister_dependent(id, &previous);
        self.get_mut(id)?.inputs_mut().extend_from_slice(inputs);
        self.register_dependent(id, inputs);
        debug!(
            node = %id,
            previous = previous.len(),
            current = inputs.len(),
            "replaced node inputs"
        );
        self.invalidate(id);
        Ok(())
    }

    /// Release a node that nothing depends on.
    ///
    /// Returns the removed node. Fails with [`GraphError::NodeInUse`] while
    /// the node is still an input of another node.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node> {
        let dependents = self.get(id)?.dependents().len();
        if dependents > 0 {
            return Err(GraphError::NodeInUse {
                node: id,
                dependents,
            });
        }

        let node = self
            .nodes
            .shift_remove(&id)
            .ok_or(GraphError::UnknownNode(id))?;
        self.unregister_dependent(id, node.inputs());
        debug!(node = %id, "removed node");
        Ok(node)
    }

    /// Release every node not reachable from `roots` through input edges.
    ///
    /// Returns the number of nodes removed. Surviving nodes keep their
    /// caches, since none of their inputs change.
    pub fn retain_reachable(&mut self, roots: &[NodeId]) -> Result<usize> {
        self.ensure_all(roots)?;

        let mut reachable = HashSet::new();
        let mut stack: Vec<NodeId> = roots.to_vec();
        while let Some(id) = stack.pop() {
            if !reachable.insert(id) {
                continue;
            }
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.inputs().iter().copied());
            }
        }

        let before = self.nodes.len();
        self.nodes.retain(|id, _| reachable.contains(id));
        for node in self.nodes.values_mut() {
            let stale: Vec<NodeId> = node
                .dependents()
                .iter()
                .copied()
                .filter(|dependent| !reachable.contains(dependent))
                .collect();
            for dependent in stale {
                node.remove_dependent(dependent);
            }
        }

        let removed = before - self.nodes.len();
        debug!(roots = roots.len(), removed, "pruned unreachable nodes");
        Ok(removed)
    }

    /// Memoized evaluation of a node known to be in the graph.
    pub(crate) fn evaluate(&mut self, id: NodeId) -> f64 {
        let node = self
            .nodes
            .get(&id)
            .expect("input handles stay registered while referenced");
        if let Some(value) = node.cached_output() {
            self.stats.cache_hits += 1;
            return value;
        }

        let function = node.function();
        let default_output = node.default_output();
        let inputs = InputList::from_slice(node.inputs());
        let value = function.apply(&mut NodeInputs::new(self, &inputs, default_output));

        self.stats.recomputations += 1;
        trace!(node = %id, %function, value, "recomputed node output");
        if let Some(node) = self.nodes.get_mut(&id) {
            node.store_output(value);
        }
        value
    }

    fn with_inputs<R>(
        &mut self,
        id: NodeId,
        read: impl FnOnce(&mut NodeInputs<'_>) -> R,
    ) -> Result<R> {
        let node = self.get(id)?;
        let default_output = node.default_output();
        let inputs = InputList::from_slice(node.inputs());
        Ok(read(&mut NodeInputs::new(self, &inputs, default_output)))
    }

    /// Mark `start` and everything that transitively reads it as invalid.
    fn invalidate(&mut self, start: NodeId) {
        let mut pending = vec![start];
        let mut visited = 0u64;
        while let Some(id) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.invalidate();
                visited += 1;
                pending.extend(node.dependents().iter().copied());
            }
        }
        self.stats.invalidations += visited;
        trace!(node = %start, visited, "invalidated dependents");
    }

    fn register_dependent(&mut self, dependent: NodeId, inputs: &[NodeId]) {
        for input in inputs {
            if let Some(node) = self.nodes.get_mut(input) {
                node.add_dependent(dependent);
            }
        }
    }

    fn unregister_dependent(&mut self, dependent: NodeId, inputs: &[NodeId]) {
        for input in inputs {
            if let Some(node) = self.nodes.get_mut(input) {
                node.remove_dependent(dependent);
            }
        }
    }

    fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(&id).ok_or(GraphError::UnknownNode(id))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(&id).ok_or(GraphError::UnknownNode(id))
    }

    fn ensure_all(&self, ids: &[NodeId]) -> Result<()> {
        match ids.iter().copied().find(|id| !self.nodes.contains_key(id)) {
            Some(missing) => Err(GraphError::UnknownNode(missing)),
            None => Ok(()),
        }
    }
}

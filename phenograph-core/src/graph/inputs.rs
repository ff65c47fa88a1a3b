//! Input view handed to node functions.

use super::arena::Graph;
use super::node::NodeId;

/// Read access to one node's inputs during evaluation.
///
/// Reading an input value goes through that input's memoized output, so
/// functions only pull the inputs they actually look at.
pub(crate) struct NodeInputs<'a> {
    graph: &'a mut Graph,
    inputs: &'a [NodeId],
    default_output: f64,
}

impl<'a> NodeInputs<'a> {
    pub(crate) fn new(graph: &'a mut Graph, inputs: &'a [NodeId], default_output: f64) -> Self {
        Self {
            graph,
            inputs,
            default_output,
        }
    }

    /// The node's default output.
    pub fn default_output(&self) -> f64 {
        self.default_output
    }

    /// Input count from which reductions run in parallel.
    pub fn parallel_threshold(&self) -> usize {
        self.graph.config().parallel_threshold
    }

    /// Outputs of all inputs, in input order.
    pub fn values(&mut self) -> Vec<f64> {
        let inputs = self.inputs;
        let graph = &mut *self.graph;
        inputs.iter().map(|&input| graph.evaluate(input)).collect()
    }

    /// Outputs of the inputs at `indices`, in the order given.
    ///
    /// Returns `None` if any index is out of range, so fixed-arity functions
    /// can fall back to the default output on under-connected nodes.
    pub fn values_at<const N: usize>(&mut self, indices: [usize; N]) -> Option<[f64; N]> {
        let inputs = self.inputs;
        if indices.iter().any(|&index| index >= inputs.len()) {
            return None;
        }
        let graph = &mut *self.graph;
        Some(indices.map(|index| graph.evaluate(inputs[index])))
    }
}

#[cfg(test)]
mod tests {
    use crate::function::FunctionId;
    use crate::graph::Graph;

    #[test]
    fn indexed_values_keep_requested_order() {
        let mut graph = Graph::new();
        let node = graph.add_function(FunctionId::Sum);
        let a = graph.add_constant(1.0);
        let b = graph.add_constant(2.0);
        let c = graph.add_constant(3.0);
        graph.add_inputs(node, &[a, b, c]).unwrap();

        assert_eq!(graph.input_values_at(node, [2, 0]).unwrap(), Some([3.0, 1.0]));
        assert_eq!(graph.input_values_at(node, [1, 1]).unwrap(), Some([2.0, 2.0]));
        assert_eq!(graph.input_values_at(node, [0, 3]).unwrap(), None);
        assert_eq!(graph.input_values_at(node, []).unwrap(), Some([]));
    }

    #[test]
    fn indexed_read_only_evaluates_requested_inputs() {
        let mut graph = Graph::new();
        let node = graph.add_function(FunctionId::Not);
        let first = graph.add_constant(0.0);
        let second = graph.add_constant(4.0);
        graph.add_inputs(node, &[first, second]).unwrap();

        assert_eq!(graph.output(node).unwrap(), 1.0);
        assert!(graph.is_cache_valid(first).unwrap());
        assert!(!graph.is_cache_valid(second).unwrap());
    }
}

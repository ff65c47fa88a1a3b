//! Shared graph handle.
//!
//! [`Graph`] does no synchronization of its own. When a driver needs to read
//! and mutate one graph from several threads, it wraps it in a
//! [`SharedGraph`], which serializes every access behind a mutex.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::arena::Graph;
use super::node::NodeId;
use crate::error::Result;

/// A cloneable, thread-safe handle to one graph.
#[derive(Debug, Clone, Default)]
pub struct SharedGraph {
    inner: Arc<Mutex<Graph>>,
}

impl SharedGraph {
    pub fn new(graph: Graph) -> Self {
        Self {
            inner: Arc::new(Mutex::new(graph)),
        }
    }

    /// Lock the graph for a sequence of operations.
    pub fn lock(&self) -> MutexGuard<'_, Graph> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the graph.
    pub fn with<R>(&self, f: impl FnOnce(&mut Graph) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Evaluate a node under the lock.
    pub fn output(&self, id: NodeId) -> Result<f64> {
        self.inner.lock().output(id)
    }

    /// Take the graph back if this is the last handle.
    pub fn try_unwrap(self) -> std::result::Result<Graph, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl From<Graph> for SharedGraph {
    fn from(graph: Graph) -> Self {
        Self::new(graph)
    }
}

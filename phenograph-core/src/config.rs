//! Graph Configuration
//!
//! Tunables for a [`Graph`](crate::graph::Graph). Every field has a default,
//! so an empty JSON object is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Input count at which reductions switch to rayon by default.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Configuration for a graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Minimum number of inputs before sum/product style reductions are
    /// evaluated in parallel. `usize::MAX` keeps every reduction sequential.
    pub parallel_threshold: usize,
}

impl GraphConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// A configuration that never reduces in parallel.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

//! The input dataset: nodes and links as supplied by the host

use super::link::Link;
use super::node::Node;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur loading a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to parse graph dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read graph dataset: {0}")]
    Io(#[from] std::io::Error),
}

/// A parsed node-link dataset
///
/// This is the consumed wire format (camelCase field names, opaque
/// presentation attributes). Validation beyond shape — unknown link
/// endpoints, a missing root — happens in [`GraphStore::build`] and
/// degrades rather than fails.
///
/// [`GraphStore::build`]: super::store::GraphStore::build
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl GraphData {
    /// Parse a dataset from a JSON string
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a dataset from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Add a node
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Add a link
    pub fn with_link(mut self, source: &str, target: &str) -> Self {
        self.links.push(Link::new(source, target));
        self
    }
}

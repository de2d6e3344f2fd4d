//! Links and their canonical undirected identity

use super::node::NodeId;
use serde::{Deserialize, Serialize};

/// An undirected link between two nodes, as it appears in the dataset
///
/// Source/target carry no direction semantics; adjacency is folded
/// symmetrically. Links referencing unknown nodes are dropped at build
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
}

impl Link {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Canonical key for an undirected link: the lesser id always comes first
///
/// `EdgeKey::new(a, b) == EdgeKey::new(b, a)`. Every component that keys
/// highlighted links uses this type, so undirected comparison never
/// depends on which endpoint a link listed first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey(NodeId, NodeId);

impl EdgeKey {
    pub fn new(a: &NodeId, b: &NodeId) -> Self {
        if a.as_str() <= b.as_str() {
            Self(a.clone(), b.clone())
        } else {
            Self(b.clone(), a.clone())
        }
    }

    /// The two endpoints in canonical order
    pub fn endpoints(&self) -> (&NodeId, &NodeId) {
        (&self.0, &self.1)
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.0, self.1)
    }
}

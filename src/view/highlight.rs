//! Highlight resolution: ancestor path plus child fringe
//!
//! Given a focus node, emphasis covers the chain from the focus up to
//! the root and the focus's direct children that have already been
//! revealed. Everything else dims. An unreachable focus produces empty
//! sets — the "dim everything" contract.

use crate::graph::{EdgeKey, GraphStore, NodeId};
use std::collections::HashSet;

/// The node and link sets emphasized for the active node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlights {
    pub nodes: HashSet<NodeId>,
    pub links: HashSet<EdgeKey>,
}

impl Highlights {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}

/// Compute the highlight sets for a focus node
///
/// The ancestor path is never gated by visibility — the chain to the
/// root is always emphasized in full. The child fringe covers only
/// direct children currently in `visible`, with the edge connecting the
/// focus to each.
pub fn resolve(store: &GraphStore, visible: &HashSet<NodeId>, focus: &NodeId) -> Highlights {
    let mut highlights = Highlights::default();

    if !store.is_reachable(focus) {
        return highlights;
    }

    let mut current = focus.clone();
    loop {
        highlights.nodes.insert(current.clone());
        match store.parent_of(&current) {
            Some(parent) => {
                highlights.nodes.insert(parent.clone());
                highlights.links.insert(EdgeKey::new(&current, parent));
                current = parent.clone();
            }
            None => break,
        }
    }

    for child in store.children_of(focus) {
        if visible.contains(child) {
            highlights.nodes.insert(child.clone());
            highlights.links.insert(EdgeKey::new(focus, child));
        }
    }

    highlights
}

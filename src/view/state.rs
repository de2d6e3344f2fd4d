//! DisclosureState: the mutable view-state of the explorer
//!
//! Owns the visible set, the active node, and the current highlight
//! sets. Mutated only through `reveal_neighbors` and `activate`; the
//! visible set grows monotonically and is never pruned.

use super::highlight::{self, Highlights};
use crate::graph::{GraphStore, NodeId};
use std::collections::HashSet;
use tracing::debug;

/// Mutable view-state over an immutable [`GraphStore`]
#[derive(Debug, Clone)]
pub struct DisclosureState {
    visible: HashSet<NodeId>,
    active: Option<NodeId>,
    highlights: Highlights,
}

impl DisclosureState {
    /// Start minimal: only the root is visible and emphasized
    pub fn new(root: &NodeId) -> Self {
        let mut highlights = Highlights::default();
        highlights.nodes.insert(root.clone());
        Self {
            visible: HashSet::from([root.clone()]),
            active: None,
            highlights,
        }
    }

    /// Reveal every neighbor of `id`
    ///
    /// A no-op for unknown or isolated ids. Idempotent: the visible set
    /// is a union. Returns whether anything new became visible.
    pub fn reveal_neighbors(&mut self, store: &GraphStore, id: &NodeId) -> bool {
        let neighbors = store.neighbors_of(id);
        if neighbors.is_empty() {
            return false;
        }
        let mut changed = false;
        for neighbor in neighbors {
            changed |= self.visible.insert(neighbor.clone());
        }
        changed
    }

    /// Make `id` the active node and recompute highlights
    ///
    /// An unknown id is a no-op that leaves the active node and the
    /// highlight sets unchanged. Returns whether the activation took.
    pub fn activate(&mut self, store: &GraphStore, id: &NodeId) -> bool {
        if !store.contains(id) {
            debug!(node = %id, "activation ignored for unknown node");
            return false;
        }
        self.highlights = highlight::resolve(store, &self.visible, id);
        self.active = Some(id.clone());
        true
    }

    /// The currently visible node ids
    pub fn visible(&self) -> &HashSet<NodeId> {
        &self.visible
    }

    /// Whether a node has been revealed
    pub fn is_visible(&self, id: &NodeId) -> bool {
        self.visible.contains(id)
    }

    /// The active node, if any
    pub fn active(&self) -> Option<&NodeId> {
        self.active.as_ref()
    }

    /// The current highlight sets
    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }
}

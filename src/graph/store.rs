//! GraphStore: the immutable dataset plus derived indices
//!
//! Built once from a `GraphData`, then read-only. Derives a symmetric
//! adjacency index and a BFS hierarchy rooted at the designated root.
//! Neighbor lists preserve link iteration order, so BFS parent
//! assignment is deterministic: the first link that reaches a node wins.

use super::dataset::GraphData;
use super::node::{Node, NodeId};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

const NO_NEIGHBORS: &[NodeId] = &[];

/// A hierarchy fact for a node reachable from the root
#[derive(Debug, Clone)]
struct HierarchyEntry {
    /// None for the root itself
    parent: Option<NodeId>,
    depth: u32,
}

/// The immutable node-link dataset with derived indices
///
/// Unknown-endpoint links are dropped during build (counted and
/// debug-logged, never an error). A root id absent from the node set
/// yields an empty hierarchy: every hierarchy query returns absence.
#[derive(Debug)]
pub struct GraphStore {
    root: NodeId,
    nodes: HashMap<NodeId, Node>,
    node_order: Vec<NodeId>,
    links: Vec<(NodeId, NodeId)>,
    adjacency: HashMap<NodeId, Vec<NodeId>>,
    hierarchy: HashMap<NodeId, HierarchyEntry>,
    children: HashMap<NodeId, Vec<NodeId>>,
}

impl GraphStore {
    /// Build a store from a dataset
    ///
    /// Pure with respect to its inputs and deterministic: adjacency and
    /// child lists follow the dataset's link iteration order.
    pub fn build(data: GraphData, root: impl Into<NodeId>) -> Self {
        let root = root.into();

        let mut nodes = HashMap::new();
        let mut node_order = Vec::with_capacity(data.nodes.len());
        for node in data.nodes {
            if !nodes.contains_key(&node.id) {
                node_order.push(node.id.clone());
            }
            nodes.insert(node.id.clone(), node);
        }

        let mut links = Vec::new();
        let mut adjacency: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        let mut dropped = 0usize;
        for link in data.links {
            if !nodes.contains_key(&link.source) || !nodes.contains_key(&link.target) {
                dropped += 1;
                continue;
            }
            let forward = adjacency.entry(link.source.clone()).or_default();
            if !forward.contains(&link.target) {
                forward.push(link.target.clone());
            }
            let backward = adjacency.entry(link.target.clone()).or_default();
            if !backward.contains(&link.source) {
                backward.push(link.source.clone());
            }
            links.push((link.source, link.target));
        }
        if dropped > 0 {
            debug!(dropped, "dropped links with unknown endpoints");
        }

        let mut store = Self {
            root,
            nodes,
            node_order,
            links,
            adjacency,
            hierarchy: HashMap::new(),
            children: HashMap::new(),
        };
        store.build_hierarchy();
        store
    }

    /// BFS from the root; the node that first discovers a neighbor
    /// becomes its parent.
    fn build_hierarchy(&mut self) {
        if !self.nodes.contains_key(&self.root) {
            return;
        }

        self.hierarchy.insert(
            self.root.clone(),
            HierarchyEntry {
                parent: None,
                depth: 0,
            },
        );

        let mut queue = VecDeque::from([self.root.clone()]);
        while let Some(current) = queue.pop_front() {
            let depth = self.hierarchy[&current].depth;
            let neighbors = match self.adjacency.get(&current) {
                Some(neighbors) => neighbors.clone(),
                None => continue,
            };
            for neighbor in neighbors {
                if self.hierarchy.contains_key(&neighbor) {
                    continue;
                }
                self.hierarchy.insert(
                    neighbor.clone(),
                    HierarchyEntry {
                        parent: Some(current.clone()),
                        depth: depth + 1,
                    },
                );
                self.children
                    .entry(current.clone())
                    .or_default()
                    .push(neighbor.clone());
                queue.push_back(neighbor);
            }
        }
    }

    /// The designated root id
    pub fn root(&self) -> &NodeId {
        &self.root
    }

    /// Look up a node by id
    pub fn node_by_id(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Whether the node set contains the id
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Directly connected node ids, in link iteration order
    ///
    /// Empty for unknown or isolated ids.
    pub fn neighbors_of(&self, id: &NodeId) -> &[NodeId] {
        self.adjacency
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(NO_NEIGHBORS)
    }

    /// The BFS parent, or None for the root and for unreachable ids
    pub fn parent_of(&self, id: &NodeId) -> Option<&NodeId> {
        self.hierarchy.get(id).and_then(|entry| entry.parent.as_ref())
    }

    /// BFS depth from the root, or None if unreachable
    pub fn depth_of(&self, id: &NodeId) -> Option<u32> {
        self.hierarchy.get(id).map(|entry| entry.depth)
    }

    /// Direct hierarchy children, in discovery order
    ///
    /// Empty for leaves and for unreachable ids.
    pub fn children_of(&self, id: &NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(NO_NEIGHBORS)
    }

    /// Whether the id has a hierarchy entry (is reachable from the root)
    pub fn is_reachable(&self, id: &NodeId) -> bool {
        self.hierarchy.contains_key(id)
    }

    /// All nodes, in dataset order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// All valid links, in dataset order
    pub fn links(&self) -> impl Iterator<Item = &(NodeId, NodeId)> {
        self.links.iter()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of valid links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

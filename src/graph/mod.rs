//! Core graph data structures and derived indices

mod dataset;
mod link;
mod node;
mod store;


pub use dataset::{DatasetError, GraphData};
pub use link::{EdgeKey, Link};
pub use node::{ContentMode, Node, NodeId};
pub use store::GraphStore;

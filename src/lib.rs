//! Canopy: Progressive-Disclosure Graph Engine
//!
//! An explorable node-link graph whose nodes disclose detail on
//! interaction: activating a node reveals its neighbors, highlights the
//! path from the root, and routes its content — markdown, raw markup,
//! or an externally supplied panel bundle — to a rendering surface.
//!
//! # Core Concepts
//!
//! - **GraphStore**: the immutable dataset plus derived adjacency and
//!   BFS hierarchy
//! - **DisclosureState**: the monotonically growing visible set, the
//!   active node, and highlight sets
//! - **PanelManager**: cancellable loading and teardown of panel
//!   bundles, gated by a monotonic load token
//!
//! # Example
//!
//! ```
//! use canopy::{GraphData, GraphStore, Node};
//!
//! let data = GraphData::default()
//!     .with_node(Node::new("root"))
//!     .with_node(Node::new("a"))
//!     .with_link("root", "a");
//! let store = GraphStore::build(data, "root");
//! assert_eq!(store.depth_of(&"a".into()), Some(1));
//! ```

mod api;
pub mod content;
mod graph;
mod panel;
pub mod view;

pub use api::CanopyApi;
pub use content::{ContentRouter, RouteOutcome};
pub use graph::{ContentMode, DatasetError, EdgeKey, GraphData, GraphStore, Link, Node, NodeId};
pub use panel::{
    bundle_path, is_valid_panel_id, AssetFetcher, AssetKind, AssetOutcome, BehaviorContext,
    BehaviorError, BehaviorHost, BehaviorRegistry, Cleanup, CleanupFn, ContainerHandle,
    DetailSurface, DirFetcher, InjectedStyle, MemorySurface, NullBehaviorHost, PanelBehavior,
    PanelManager, PanelState, StyleHandle, SurfaceContent,
};
pub use view::{DisclosureState, Highlights};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

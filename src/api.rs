//! Single consumer-facing entry point
//!
//! `CanopyApi` wires the store, the disclosure state, the content
//! router, and the panel manager together. Hosts call it; they never
//! reach into the collaborators directly.

use crate::content::{ContentRouter, RouteOutcome};
use crate::graph::{ContentMode, GraphStore, NodeId};
use crate::panel::{
    AssetFetcher, BehaviorHost, DetailSurface, PanelManager, PanelState,
};
use crate::view::{DisclosureState, Highlights};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The explorer engine behind a single API
pub struct CanopyApi {
    store: Arc<GraphStore>,
    state: Mutex<DisclosureState>,
    panels: Arc<PanelManager>,
    router: ContentRouter,
    surface: Arc<dyn DetailSurface>,
}

impl CanopyApi {
    /// Create an engine over a store, a surface, and an asset fetcher
    pub fn new(
        store: Arc<GraphStore>,
        surface: Arc<dyn DetailSurface>,
        fetcher: Arc<dyn AssetFetcher>,
    ) -> Self {
        let panels = Arc::new(PanelManager::new(surface.clone(), fetcher));
        Self::with_panels(store, surface, panels)
    }

    /// Like [`CanopyApi::new`], with a behavior host for panel scripts
    pub fn with_behavior_host(
        store: Arc<GraphStore>,
        surface: Arc<dyn DetailSurface>,
        fetcher: Arc<dyn AssetFetcher>,
        host: Arc<dyn BehaviorHost>,
    ) -> Self {
        let panels = Arc::new(PanelManager::new(surface.clone(), fetcher).with_host(host));
        Self::with_panels(store, surface, panels)
    }

    /// Create an engine over an already-configured panel manager
    pub fn with_panels(
        store: Arc<GraphStore>,
        surface: Arc<dyn DetailSurface>,
        panels: Arc<PanelManager>,
    ) -> Self {
        let state = Mutex::new(DisclosureState::new(store.root()));
        let router = ContentRouter::new(panels.clone(), surface.clone());
        Self {
            store,
            state,
            panels,
            router,
            surface,
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, DisclosureState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Activate a node: recompute highlights, retitle, route content
    ///
    /// An unknown id is a no-op and returns `None`; the caller is
    /// expected to pass ids it got from the store, but an invalid one
    /// does no harm.
    pub async fn activate(&self, id: &str) -> Option<RouteOutcome> {
        let node_id = NodeId::from(id);
        let node = self.store.node_by_id(&node_id)?.clone();

        self.lock_state().activate(&self.store, &node_id);

        // Panel and raw-markup layouts are plain: no engine title.
        let plain = matches!(node.content_type, ContentMode::Panel | ContentMode::Html);
        self.surface
            .set_title(if plain { "" } else { node.display_title() });

        Some(self.router.route(&node).await)
    }

    /// Reveal the neighbors of a node
    ///
    /// Returns whether anything new became visible.
    pub fn reveal_neighbors(&self, id: &str) -> bool {
        self.lock_state()
            .reveal_neighbors(&self.store, &NodeId::from(id))
    }

    /// The underlying store
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// The panel manager (e.g. for clearing from host chrome)
    pub fn panels(&self) -> &Arc<PanelManager> {
        &self.panels
    }

    /// Snapshot of the visible node set
    pub fn visible_nodes(&self) -> HashSet<NodeId> {
        self.lock_state().visible().clone()
    }

    /// Whether a node has been revealed
    pub fn is_visible(&self, id: &str) -> bool {
        self.lock_state().is_visible(&NodeId::from(id))
    }

    /// The active node, if any
    pub fn active_node(&self) -> Option<NodeId> {
        self.lock_state().active().cloned()
    }

    /// Snapshot of the current highlight sets
    pub fn highlights(&self) -> Highlights {
        self.lock_state().highlights().clone()
    }

    /// The panel lifecycle state
    pub fn panel_state(&self) -> PanelState {
        self.panels.state()
    }
}

//! Content routing — which rendering path an activated node takes
//!
//! Dispatch is purely on the node's content mode. Non-panel modes clear
//! the panel manager first, so no mounted script or style outlives a
//! mode switch.

use super::markdown;
use crate::graph::{ContentMode, Node};
use crate::panel::{DetailSurface, PanelManager, PanelState};
use std::sync::Arc;

/// Which path a node's content was dispatched to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Handed to the panel lifecycle manager
    Panel(PanelState),
    /// Content rendered verbatim
    Markup,
    /// Content converted from markdown, then rendered
    Markdown,
}

/// Dispatches node content to the panel manager or the surface
pub struct ContentRouter {
    panels: Arc<PanelManager>,
    surface: Arc<dyn DetailSurface>,
}

impl ContentRouter {
    pub fn new(panels: Arc<PanelManager>, surface: Arc<dyn DetailSurface>) -> Self {
        Self { panels, surface }
    }

    /// Route a node's content to the right collaborator
    pub async fn route(&self, node: &Node) -> RouteOutcome {
        match node.content_type {
            ContentMode::Panel => {
                let state = self.panels.load_panel(node.panel_ref(), node).await;
                RouteOutcome::Panel(state)
            }
            ContentMode::Html => {
                self.panels.clear_panel();
                self.surface
                    .render_markup(node.content.as_deref().unwrap_or(""));
                RouteOutcome::Markup
            }
            ContentMode::Markdown => {
                self.panels.clear_panel();
                let markup = markdown::to_markup(node.content.as_deref().unwrap_or(""));
                self.surface.render_markup(&markup);
                RouteOutcome::Markdown
            }
        }
    }
}

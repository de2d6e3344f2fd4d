//! Shared helpers for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use canopy::{AssetFetcher, AssetOutcome, GraphData, Node};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::oneshot;

/// The root-a-b chain from the disclosure contract
pub fn chain_data() -> GraphData {
    GraphData::default()
        .with_node(Node::new("root"))
        .with_node(Node::new("a"))
        .with_node(Node::new("b"))
        .with_link("root", "a")
        .with_link("a", "b")
}

/// A root with three children, one of them a panel node
pub fn fan_data() -> GraphData {
    GraphData::default()
        .with_node(Node::new("root").with_label("Start"))
        .with_node(
            Node::new("docs")
                .with_title("Documentation")
                .with_content("# Docs\n\nRead me."),
        )
        .with_node(
            Node::new("raw")
                .with_content("<section>verbatim</section>")
                .with_mode(canopy::ContentMode::Html),
        )
        .with_node(
            Node::new("demo")
                .with_mode(canopy::ContentMode::Panel)
                .with_panel("demo-widget"),
        )
        .with_link("root", "docs")
        .with_link("root", "raw")
        .with_link("root", "demo")
}

/// A fetcher with scripted responses and optional per-path gates
///
/// A gated path's fetch does not resolve until the matching sender
/// fires, which lets a test hold one load in flight while another
/// overtakes it.
#[derive(Default)]
pub struct ScriptedFetcher {
    responses: Mutex<HashMap<String, String>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful response for a path
    pub fn provide(&self, path: &str, text: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), text.to_string());
    }

    /// Gate a path; its fetch blocks until the returned sender fires
    pub fn gate(&self, path: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(path.to_string(), rx);
        tx
    }

    /// Every path requested so far, in request order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn was_called(&self, path: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|p| p == path)
    }
}

#[async_trait]
impl AssetFetcher for ScriptedFetcher {
    async fn fetch_text(&self, path: &str) -> AssetOutcome {
        self.calls.lock().unwrap().push(path.to_string());
        let gate = self.gates.lock().unwrap().remove(path);
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        match self.responses.lock().unwrap().get(path) {
            Some(text) => AssetOutcome::Found(text.clone()),
            None => AssetOutcome::Absent,
        }
    }
}

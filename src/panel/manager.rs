//! Panel lifecycle management
//!
//! Loads, mounts, and tears down panel bundles. Concurrency correctness
//! rests on a single mechanism: a monotonic load token. Starting a load
//! or clearing bumps the token; every effect after an await re-checks it
//! under the session lock, so a stale continuation discards itself and a
//! fast newer load always wins over a slow older one. Fetches themselves
//! are never aborted — their results are discarded.

use super::behavior::{BehaviorContext, BehaviorHost, Cleanup, NullBehaviorHost};
use super::fetch::{bundle_path, AssetFetcher, AssetKind, AssetOutcome};
use super::is_valid_panel_id;
use super::surface::{ContainerHandle, DetailSurface, StyleHandle};
use crate::graph::Node;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Observable lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Loading { token: u64 },
    Mounted { token: u64, panel_id: String },
    Error { token: u64 },
}

impl Default for PanelState {
    fn default() -> Self {
        PanelState::Idle
    }
}

/// The one current panel session and its owned resources
#[derive(Default)]
struct Session {
    state: PanelState,
    panel_id: Option<String>,
    container: Option<ContainerHandle>,
    styles: Vec<StyleHandle>,
    cleanup: Cleanup,
    started_at: Option<DateTime<Utc>>,
}

/// Loads and tears down panel bundles against a rendering surface
///
/// At most one non-superseded load or mount exists at any time. All
/// mutation funnels through the session lock; the load token decides
/// whether a resumed continuation may still touch anything.
pub struct PanelManager {
    surface: Arc<dyn DetailSurface>,
    fetcher: Arc<dyn AssetFetcher>,
    host: Arc<dyn BehaviorHost>,
    token: AtomicU64,
    session: Mutex<Session>,
}

impl PanelManager {
    pub fn new(surface: Arc<dyn DetailSurface>, fetcher: Arc<dyn AssetFetcher>) -> Self {
        Self {
            surface,
            fetcher,
            host: Arc::new(NullBehaviorHost),
            token: AtomicU64::new(0),
            session: Mutex::new(Session::default()),
        }
    }

    /// Replace the behavior host
    pub fn with_host(mut self, host: Arc<dyn BehaviorHost>) -> Self {
        self.host = host;
        self
    }

    /// The current lifecycle state
    pub fn state(&self) -> PanelState {
        self.lock_session().state.clone()
    }

    /// The mounted panel id, if any
    pub fn current_panel(&self) -> Option<String> {
        self.lock_session().panel_id.clone()
    }

    /// When the current session mounted, if any
    pub fn mounted_at(&self) -> Option<DateTime<Utc>> {
        self.lock_session().started_at
    }

    // A surface or behavior panic must not wedge the manager; recover
    // the lock and keep going.
    fn lock_session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump_token(&self) -> u64 {
        self.token.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, token: u64) -> bool {
        self.token.load(Ordering::SeqCst) == token
    }

    /// Tear down the current session: run its cleanup (once), drop its
    /// injected styles. Leaves the lifecycle state to the caller.
    fn teardown_session(&self) {
        let (panel_id, cleanup, styles) = {
            let mut session = self.lock_session();
            session.container = None;
            session.started_at = None;
            (
                session.panel_id.take(),
                std::mem::take(&mut session.cleanup),
                std::mem::take(&mut session.styles),
            )
        };
        run_cleanup(panel_id.as_deref().unwrap_or("-"), cleanup);
        for handle in styles {
            self.surface.remove_style(handle);
        }
    }

    fn spawn_fetch(&self, path: String) -> JoinHandle<AssetOutcome> {
        let fetcher = Arc::clone(&self.fetcher);
        tokio::spawn(async move { fetcher.fetch_text(&path).await })
    }

    /// Load and mount a panel bundle for `node`
    ///
    /// Returns a snapshot of the lifecycle state once this call has no
    /// more effects to apply (which, for a superseded call, is whatever
    /// state the superseding call produced).
    pub async fn load_panel(&self, panel_id: &str, node: &Node) -> PanelState {
        if !is_valid_panel_id(panel_id) {
            warn!(panel_id, "rejected panel id; no request issued");
            let token = self.bump_token();
            self.teardown_session();
            self.surface.clear_attribution();
            self.surface.clear_content();
            self.surface
                .show_error(&format!("Panel \"{}\" is not available.", panel_id));
            self.lock_session().state = PanelState::Error { token };
            return self.state();
        }

        let token = self.bump_token();
        self.teardown_session();

        {
            let mut session = self.lock_session();
            self.surface.set_attribution(panel_id);
            self.surface.show_loading(panel_id);
            session.state = PanelState::Loading { token };
        }

        // All three requests go out together; effects are applied in
        // order below, each gated by the token.
        let markup_task = self.spawn_fetch(bundle_path(panel_id, AssetKind::Markup));
        let style_task = self.spawn_fetch(bundle_path(panel_id, AssetKind::Style));
        let behavior_task = self.spawn_fetch(bundle_path(panel_id, AssetKind::Behavior));

        let markup = join_fetch(markup_task).await;
        let container = {
            let mut session = self.lock_session();
            if !self.is_current(token) {
                debug!(panel_id, token, "stale markup discarded");
                return session.state.clone();
            }
            let markup = match markup.text() {
                Some(markup) => markup,
                None => {
                    self.surface.show_error(&format!(
                        "Panel content for \"{}\" could not be loaded.",
                        panel_id
                    ));
                    self.surface.clear_attribution();
                    session.state = PanelState::Idle;
                    return session.state.clone();
                }
            };
            let container = self.surface.mount(panel_id, &markup);
            session.panel_id = Some(panel_id.to_string());
            session.container = Some(container);
            session.started_at = Some(Utc::now());
            container
        };

        let style = join_fetch(style_task).await;
        {
            let mut session = self.lock_session();
            if !self.is_current(token) {
                debug!(panel_id, token, "stale style discarded");
                return session.state.clone();
            }
            if let Some(css) = style.text() {
                let handle = self.surface.inject_style(panel_id, &css);
                session.styles.push(handle);
            }
        }

        let behavior = join_fetch(behavior_task).await;
        if let Some(source) = behavior.text() {
            {
                let session = self.lock_session();
                if !self.is_current(token) {
                    debug!(panel_id, token, "stale behavior discarded");
                    return session.state.clone();
                }
            }
            let context = BehaviorContext {
                panel_id: panel_id.to_string(),
                node: node.clone(),
            };
            match self.host.execute(&source, &container, &context).await {
                Ok(cleanup) => {
                    let orphaned = {
                        let mut session = self.lock_session();
                        if self.is_current(token) {
                            session.cleanup = cleanup;
                            None
                        } else {
                            Some(cleanup)
                        }
                    };
                    // Superseded while the behavior was mounting: the
                    // winner already tore down, so this cleanup runs
                    // here — still exactly once.
                    if let Some(cleanup) = orphaned {
                        debug!(panel_id, "superseded during behavior mount; running cleanup");
                        run_cleanup(panel_id, cleanup);
                    }
                }
                Err(e) => {
                    // The mount stands; only the behavior failed.
                    error!(panel_id, error = %e, "panel behavior failed");
                }
            }
        }

        {
            let mut session = self.lock_session();
            if !self.is_current(token) {
                return session.state.clone();
            }
            session.state = PanelState::Mounted {
                token,
                panel_id: panel_id.to_string(),
            };
            session.state.clone()
        }
    }

    /// Invalidate any in-flight load and tear everything down
    ///
    /// Safe to call while idle; always lands in `Idle`.
    pub fn clear_panel(&self) {
        self.bump_token();
        self.teardown_session();
        self.surface.clear_attribution();
        self.surface.clear_content();
        self.lock_session().state = PanelState::Idle;
    }
}

/// Invoke a session cleanup, swallowing and logging failures
fn run_cleanup(panel_id: &str, cleanup: Cleanup) {
    if let Cleanup::Callback(callback) = cleanup {
        if let Err(e) = callback() {
            error!(panel_id, error = %e, "panel cleanup failed");
        }
    }
}

/// Resolve a spawned fetch, degrading task failure to absence
async fn join_fetch(task: JoinHandle<AssetOutcome>) -> AssetOutcome {
    match task.await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(error = %e, "panel asset task failed");
            AssetOutcome::Absent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::surface::{MemorySurface, SurfaceContent};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;

    /// Fetcher with canned responses; counts every request
    #[derive(Default)]
    struct CannedFetcher {
        responses: HashMap<String, String>,
        calls: AtomicUsize,
    }

    impl CannedFetcher {
        fn with(mut self, path: &str, text: &str) -> Self {
            self.responses.insert(path.to_string(), text.to_string());
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AssetFetcher for CannedFetcher {
        async fn fetch_text(&self, path: &str) -> AssetOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.responses.get(path) {
                Some(text) => AssetOutcome::Found(text.clone()),
                None => AssetOutcome::Absent,
            }
        }
    }

    fn manager_with(
        fetcher: Arc<CannedFetcher>,
    ) -> (Arc<PanelManager>, Arc<MemorySurface>) {
        let surface = Arc::new(MemorySurface::new());
        let manager = Arc::new(PanelManager::new(surface.clone(), fetcher));
        (manager, surface)
    }

    #[tokio::test]
    async fn full_bundle_mounts_with_style() {
        let fetcher = Arc::new(
            CannedFetcher::default()
                .with("panels/demo/panel.html", "<p>demo</p>")
                .with("panels/demo/panel.css", ".demo {}"),
        );
        let (manager, surface) = manager_with(fetcher);

        let state = manager.load_panel("demo", &Node::new("demo")).await;

        assert!(matches!(state, PanelState::Mounted { ref panel_id, .. } if panel_id == "demo"));
        assert_eq!(surface.attribution().as_deref(), Some("demo"));
        assert!(matches!(
            surface.content(),
            SurfaceContent::Panel { ref markup, .. } if markup == "<p>demo</p>"
        ));
        assert_eq!(surface.styles().len(), 1);
    }

    #[tokio::test]
    async fn missing_markup_aborts_to_idle() {
        let fetcher =
            Arc::new(CannedFetcher::default().with("panels/demo/panel.css", ".demo {}"));
        let (manager, surface) = manager_with(fetcher);

        let state = manager.load_panel("demo", &Node::new("demo")).await;

        assert_eq!(state, PanelState::Idle);
        assert_eq!(surface.attribution(), None);
        assert!(matches!(surface.content(), SurfaceContent::Error { .. }));
        // The style never got injected: the load aborted first.
        assert!(surface.styles().is_empty());
    }

    #[tokio::test]
    async fn missing_style_and_behavior_are_silent() {
        let fetcher =
            Arc::new(CannedFetcher::default().with("panels/demo/panel.html", "<p>demo</p>"));
        let (manager, surface) = manager_with(fetcher);

        let state = manager.load_panel("demo", &Node::new("demo")).await;

        assert!(matches!(state, PanelState::Mounted { .. }));
        assert!(surface.styles().is_empty());
    }

    #[tokio::test]
    async fn invalid_panel_id_never_fetches() {
        let fetcher = Arc::new(CannedFetcher::default());
        let (manager, surface) = manager_with(fetcher.clone());

        let state = manager.load_panel("../evil", &Node::new("n")).await;

        assert!(matches!(state, PanelState::Error { .. }));
        assert_eq!(fetcher.calls(), 0);
        assert!(matches!(surface.content(), SurfaceContent::Error { .. }));
    }

    #[tokio::test]
    async fn clear_when_idle_is_a_noop() {
        let fetcher = Arc::new(CannedFetcher::default());
        let (manager, surface) = manager_with(fetcher);

        manager.clear_panel();

        assert_eq!(manager.state(), PanelState::Idle);
        assert_eq!(surface.content(), SurfaceContent::Empty);
    }

    #[tokio::test]
    async fn clear_removes_styles_and_attribution() {
        let fetcher = Arc::new(
            CannedFetcher::default()
                .with("panels/demo/panel.html", "<p>demo</p>")
                .with("panels/demo/panel.css", ".demo {}"),
        );
        let (manager, surface) = manager_with(fetcher);

        manager.load_panel("demo", &Node::new("demo")).await;
        assert_eq!(surface.styles().len(), 1);

        manager.clear_panel();

        assert_eq!(manager.state(), PanelState::Idle);
        assert!(surface.styles().is_empty());
        assert_eq!(surface.attribution(), None);
        assert_eq!(manager.current_panel(), None);
    }

    #[tokio::test]
    async fn reload_replaces_previous_style() {
        let fetcher = Arc::new(
            CannedFetcher::default()
                .with("panels/a/panel.html", "<p>a</p>")
                .with("panels/a/panel.css", ".a {}")
                .with("panels/b/panel.html", "<p>b</p>")
                .with("panels/b/panel.css", ".b {}"),
        );
        let (manager, surface) = manager_with(fetcher);

        manager.load_panel("a", &Node::new("a")).await;
        manager.load_panel("b", &Node::new("b")).await;

        let styles = surface.styles();
        assert_eq!(styles.len(), 1);
        assert_eq!(styles[0].panel_id, "b");
        assert_eq!(manager.current_panel().as_deref(), Some("b"));
    }
}

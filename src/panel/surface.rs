//! The rendering boundary for detail content
//!
//! The engine never draws; it drives a `DetailSurface`. Real frontends
//! implement the trait over their widget tree. `MemorySurface` is the
//! in-crate implementation: fully inspectable, used by tests and the
//! CLI preview.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Opaque handle to a mounted panel container, minted by the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerHandle(u64);

impl ContainerHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Opaque handle to an injected style resource, minted by the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleHandle(u64);

impl StyleHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// The surface the engine renders detail content into
///
/// Implementations own presentation entirely. Methods are synchronous
/// and must be cheap; the engine calls them while holding its session
/// lock.
pub trait DetailSurface: Send + Sync {
    /// Set the detail title (empty string clears it)
    fn set_title(&self, title: &str);

    /// Show a loading indicator for a panel
    fn show_loading(&self, panel_id: &str);

    /// Show an inline error message
    fn show_error(&self, message: &str);

    /// Render markup directly (the non-panel content path)
    fn render_markup(&self, markup: &str);

    /// Mount panel markup inside a fresh container scoped to this load
    fn mount(&self, panel_id: &str, markup: &str) -> ContainerHandle;

    /// Inject a style resource tagged with the panel id
    fn inject_style(&self, panel_id: &str, css: &str) -> StyleHandle;

    /// Remove a previously injected style resource
    fn remove_style(&self, handle: StyleHandle);

    /// Attribute the surface to a panel id
    fn set_attribution(&self, panel_id: &str);

    /// Clear the panel attribution
    fn clear_attribution(&self);

    /// Clear rendered content
    fn clear_content(&self);
}

/// What a surface is currently showing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SurfaceContent {
    #[default]
    Empty,
    Loading {
        panel_id: String,
    },
    Error {
        message: String,
    },
    Markup(String),
    Panel {
        container: ContainerHandle,
        panel_id: String,
        markup: String,
    },
}

/// A style resource currently injected into a surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedStyle {
    pub handle: StyleHandle,
    pub panel_id: String,
    pub css: String,
}

#[derive(Debug, Default)]
struct SurfaceState {
    title: String,
    content: SurfaceContent,
    attribution: Option<String>,
    styles: Vec<InjectedStyle>,
}

/// An in-memory `DetailSurface` that records what it was told to show
#[derive(Debug, Default)]
pub struct MemorySurface {
    state: Mutex<SurfaceState>,
    counter: AtomicU64,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// The current title
    pub fn title(&self) -> String {
        self.state.lock().unwrap().title.clone()
    }

    /// What the surface is currently showing
    pub fn content(&self) -> SurfaceContent {
        self.state.lock().unwrap().content.clone()
    }

    /// The current panel attribution, if any
    pub fn attribution(&self) -> Option<String> {
        self.state.lock().unwrap().attribution.clone()
    }

    /// Styles currently injected, in injection order
    pub fn styles(&self) -> Vec<InjectedStyle> {
        self.state.lock().unwrap().styles.clone()
    }
}

impl DetailSurface for MemorySurface {
    fn set_title(&self, title: &str) {
        self.state.lock().unwrap().title = title.to_string();
    }

    fn show_loading(&self, panel_id: &str) {
        self.state.lock().unwrap().content = SurfaceContent::Loading {
            panel_id: panel_id.to_string(),
        };
    }

    fn show_error(&self, message: &str) {
        self.state.lock().unwrap().content = SurfaceContent::Error {
            message: message.to_string(),
        };
    }

    fn render_markup(&self, markup: &str) {
        self.state.lock().unwrap().content = SurfaceContent::Markup(markup.to_string());
    }

    fn mount(&self, panel_id: &str, markup: &str) -> ContainerHandle {
        let container = ContainerHandle(self.next_handle());
        self.state.lock().unwrap().content = SurfaceContent::Panel {
            container,
            panel_id: panel_id.to_string(),
            markup: markup.to_string(),
        };
        container
    }

    fn inject_style(&self, panel_id: &str, css: &str) -> StyleHandle {
        let handle = StyleHandle(self.next_handle());
        self.state.lock().unwrap().styles.push(InjectedStyle {
            handle,
            panel_id: panel_id.to_string(),
            css: css.to_string(),
        });
        handle
    }

    fn remove_style(&self, handle: StyleHandle) {
        self.state
            .lock()
            .unwrap()
            .styles
            .retain(|style| style.handle != handle);
    }

    fn set_attribution(&self, panel_id: &str) {
        self.state.lock().unwrap().attribution = Some(panel_id.to_string());
    }

    fn clear_attribution(&self) {
        self.state.lock().unwrap().attribution = None;
    }

    fn clear_content(&self) {
        self.state.lock().unwrap().content = SurfaceContent::Empty;
    }
}

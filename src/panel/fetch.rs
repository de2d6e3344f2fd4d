//! Asset fetching for panel bundles
//!
//! Panel assets live under a per-panel namespace by convention:
//! `panels/<id>/panel.{html,css,js}`. Absence is a normal outcome, not
//! an error; transport failures other than not-found degrade to absence
//! with a warning. The manager never sees a fetch error.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::warn;

/// The three asset roles in a panel bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// `panel.html` — required for a successful mount
    Markup,
    /// `panel.css` — optional scoped style
    Style,
    /// `panel.js` — optional behavior source
    Behavior,
}

impl AssetKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            AssetKind::Markup => "panel.html",
            AssetKind::Style => "panel.css",
            AssetKind::Behavior => "panel.js",
        }
    }
}

/// The conventional path of a bundle asset
pub fn bundle_path(panel_id: &str, kind: AssetKind) -> String {
    format!("panels/{}/{}", panel_id, kind.file_name())
}

/// The outcome of a bundle asset fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    Found(String),
    Absent,
}

impl AssetOutcome {
    /// The fetched text, if any
    pub fn text(self) -> Option<String> {
        match self {
            AssetOutcome::Found(text) => Some(text),
            AssetOutcome::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, AssetOutcome::Absent)
    }
}

/// The transport that resolves panel asset paths to text
///
/// Implementations own transport-level logging: not-found resolves to
/// `Absent` silently, any other failure resolves to `Absent` with a
/// warning.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch_text(&self, path: &str) -> AssetOutcome;
}

/// An `AssetFetcher` over a local directory tree
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AssetFetcher for DirFetcher {
    async fn fetch_text(&self, path: &str) -> AssetOutcome {
        let full = self.root.join(path);
        match tokio::fs::read_to_string(&full).await {
            Ok(text) => AssetOutcome::Found(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AssetOutcome::Absent,
            Err(e) => {
                warn!(path = %full.display(), error = %e, "panel asset request failed");
                AssetOutcome::Absent
            }
        }
    }
}

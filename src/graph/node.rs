//! Node representation in the disclosure graph

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a node
///
/// Serializes as a plain string (the dataset's semantic ID, e.g. "root"
/// or "docs-overview")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a NodeId from a string (semantic ID)
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// How a node's detail content is rendered
///
/// Unknown mode strings in a dataset fall back to `Markdown`, matching
/// the default rendering path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    /// Raw markup handed to the rendering boundary verbatim
    Html,
    /// An externally supplied panel bundle (markup + style + behavior)
    Panel,
    /// Long-form text passed through the markdown converter
    #[default]
    #[serde(other)]
    Markdown,
}

/// A node in the disclosure graph
///
/// Immutable after dataset load. Presentation attributes (position,
/// visual kind, sizing, colors) are captured opaquely — the engine never
/// interprets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Detail panel title (falls back to label, then id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Long-form content string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// How the content is rendered
    #[serde(default)]
    pub content_type: ContentMode,
    /// Panel bundle identifier (defaults to the node id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_id: Option<String>,
    /// Opaque presentation attributes (position, kind, sizing, ...)
    #[serde(flatten)]
    pub presentation: HashMap<String, serde_json::Value>,
}

impl Node {
    /// Create a new node with the given id
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            label: None,
            title: None,
            content: None,
            content_type: ContentMode::default(),
            panel_id: None,
            presentation: HashMap::new(),
        }
    }

    /// Set the display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the detail title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the content string
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the content mode
    pub fn with_mode(mut self, mode: ContentMode) -> Self {
        self.content_type = mode;
        self
    }

    /// Set an explicit panel bundle id
    pub fn with_panel(mut self, panel_id: impl Into<String>) -> Self {
        self.panel_id = Some(panel_id.into());
        self
    }

    /// The title shown above detail content: title, then label, then id
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.label.as_deref())
            .unwrap_or_else(|| self.id.as_str())
    }

    /// The panel bundle id this node resolves to
    pub fn panel_ref(&self) -> &str {
        self.panel_id.as_deref().unwrap_or_else(|| self.id.as_str())
    }
}

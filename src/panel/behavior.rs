//! Panel behavior execution boundary
//!
//! A bundle's behavior source runs against exactly two bindings: the
//! mounted container and a context carrying the panel id and the
//! originating node. Whatever the behavior hands back is normalized at
//! this boundary into a [`Cleanup`], so the lifecycle state machine
//! stays shape-agnostic. Execution failures never escape the boundary.

use super::surface::ContainerHandle;
use crate::graph::Node;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by behavior execution and teardown
#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior execution failed: {0}")]
    Execution(String),

    #[error("behavior cleanup failed: {0}")]
    Cleanup(String),
}

/// The context a behavior executes with
#[derive(Debug, Clone)]
pub struct BehaviorContext {
    pub panel_id: String,
    /// The originating node's full record
    pub node: Node,
}

/// A teardown callback registered by a mounted behavior
///
/// Consumed on invocation, so a cleanup can only ever run once.
pub type CleanupFn = Box<dyn FnOnce() -> Result<(), BehaviorError> + Send>;

/// The normalized teardown contract of a mounted behavior
#[derive(Default)]
pub enum Cleanup {
    /// The behavior registered nothing to tear down
    #[default]
    None,
    /// Invoke on teardown, exactly once
    Callback(CleanupFn),
}

impl Cleanup {
    /// Wrap a closure as a teardown callback
    pub fn callback(f: impl FnOnce() -> Result<(), BehaviorError> + Send + 'static) -> Self {
        Cleanup::Callback(Box::new(f))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cleanup::None)
    }
}

impl std::fmt::Debug for Cleanup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cleanup::None => f.write_str("Cleanup::None"),
            Cleanup::Callback(_) => f.write_str("Cleanup::Callback(..)"),
        }
    }
}

/// Executes fetched behavior sources
///
/// The host owns whatever execution model makes sense for the embedding
/// application — a script engine, a native registry, or nothing at all.
/// Returning `Err` marks the execution failed; the panel mount stands
/// either way.
#[async_trait]
pub trait BehaviorHost: Send + Sync {
    async fn execute(
        &self,
        source: &str,
        container: &ContainerHandle,
        context: &BehaviorContext,
    ) -> Result<Cleanup, BehaviorError>;
}

/// A host that ignores behavior sources entirely
///
/// The default when an embedder supplies no host: panels still mount
/// and style, their behavior scripts are discarded.
#[derive(Debug, Default)]
pub struct NullBehaviorHost;

#[async_trait]
impl BehaviorHost for NullBehaviorHost {
    async fn execute(
        &self,
        _source: &str,
        _container: &ContainerHandle,
        context: &BehaviorContext,
    ) -> Result<Cleanup, BehaviorError> {
        debug!(panel_id = %context.panel_id, "no behavior host configured; script ignored");
        Ok(Cleanup::None)
    }
}

/// Native behavior for a panel, registered by the embedding application
#[async_trait]
pub trait PanelBehavior: Send + Sync {
    async fn mount(
        &self,
        container: &ContainerHandle,
        context: &BehaviorContext,
    ) -> Result<Cleanup, BehaviorError>;
}

/// A `BehaviorHost` backed by a registry of native behaviors
///
/// The fetched script is the trigger; the registry supplies the code.
/// A panel whose id has no registered behavior mounts without one.
#[derive(Default)]
pub struct BehaviorRegistry {
    behaviors: DashMap<String, Arc<dyn PanelBehavior>>,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a behavior for a panel id, replacing any previous one
    pub fn register(&self, panel_id: impl Into<String>, behavior: Arc<dyn PanelBehavior>) {
        self.behaviors.insert(panel_id.into(), behavior);
    }

    pub fn contains(&self, panel_id: &str) -> bool {
        self.behaviors.contains_key(panel_id)
    }
}

#[async_trait]
impl BehaviorHost for BehaviorRegistry {
    async fn execute(
        &self,
        _source: &str,
        container: &ContainerHandle,
        context: &BehaviorContext,
    ) -> Result<Cleanup, BehaviorError> {
        let behavior = match self.behaviors.get(&context.panel_id) {
            Some(entry) => Arc::clone(entry.value()),
            None => {
                debug!(panel_id = %context.panel_id, "no registered behavior for panel");
                return Ok(Cleanup::None);
            }
        };
        behavior.mount(container, context).await
    }
}

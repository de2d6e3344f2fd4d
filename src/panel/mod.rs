//! Panel bundles: fetching, mounting, behavior, teardown

mod behavior;
mod fetch;
mod manager;
mod surface;

pub use behavior::{
    BehaviorContext, BehaviorError, BehaviorHost, BehaviorRegistry, Cleanup, CleanupFn,
    NullBehaviorHost, PanelBehavior,
};
pub use fetch::{bundle_path, AssetFetcher, AssetKind, AssetOutcome, DirFetcher};
pub use manager::{PanelManager, PanelState};
pub use surface::{
    ContainerHandle, DetailSurface, InjectedStyle, MemorySurface, StyleHandle, SurfaceContent,
};

/// Whether a panel id is acceptable for a bundle request
///
/// Only alphanumerics, hyphens, and underscores pass. Anything else is
/// rejected before any resource path is built, which keeps traversal
/// sequences out of the fetch layer entirely.
pub fn is_valid_panel_id(panel_id: &str) -> bool {
    !panel_id.is_empty()
        && panel_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

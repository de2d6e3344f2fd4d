//! Content transforms and routing

pub mod label;
pub mod markdown;
mod router;

pub use label::wrap_label;
pub use router::{ContentRouter, RouteOutcome};

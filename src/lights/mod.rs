//! Light data model and the per-frame collector that converts the host
//! renderer's visible-light list into view-space culling lights.

pub mod collect;
pub mod types;

pub use collect::LightSet;
pub use types::{Light, LightKind, VisibleLight};

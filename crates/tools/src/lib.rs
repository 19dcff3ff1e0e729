//! Developer tooling: debug panels and point-field inspection.
//!
//! # Invariants
//! - Panels never regenerate anything themselves. A committed edit yields a
//!   value and the caller decides what to rebuild.
//! - Live drags are previews; only `finish_change` commits.

mod inspector;
mod panel;

pub use inspector::{FieldSummary, PointFieldInspector};
pub use panel::{Control, ControlValue, DebugPanel, GalaxyPanel, PanelChange, PanelError};

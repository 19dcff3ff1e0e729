//! Scenes: static layouts plus explicit per-frame update functions.
//!
//! # Invariants
//! - Per-frame logic takes elapsed or delta time as a parameter; nothing
//!   schedules itself. An external loop owns the frame clock.
//! - Scene state is separate from the render context. Scenes push
//!   transforms into a [`RenderContext`](stargaze_render::RenderContext)
//!   only when asked to.

mod clock;
mod haunted;
mod mixer;
mod sandbox;
mod text;

pub use clock::{FrameClock, FrameTime};
pub use haunted::{
    FloatingGhost, Grave, GhostLight, GhostOrbit, HauntedScene, HouseLayout, scatter_graves,
};
pub use mixer::{AnimationClip, AnimationMixer, ModelPlacement, ModelViewer, default_models};
pub use sandbox::SandboxObject;
pub use text::{Aabb, TextStyle, center_translation};

/// Errors from scene operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("no animation clip at index {index} ({available} available)")]
    ClipNotFound { index: usize, available: usize },
}

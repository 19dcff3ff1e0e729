//! Rendering Adapter: renderer-agnostic render context.
//!
//! # Invariants
//! - No global scene state: camera, viewport and drawables live in an
//!   explicit [`RenderContext`] passed to whoever needs them.
//! - A drawable's GPU-side resources are released exactly once, when it
//!   leaves the registry.
//! - A galaxy regeneration disposes the previous cloud before the new one
//!   is added; an invalid parameter set leaves the current cloud in place.
//!
//! The actual GPU backend is external. [`DebugTextRenderer`] implements the
//! [`Renderer`] trait for CLI output and tests.

mod camera;
mod context;
mod drawable;
mod layer;
mod renderer;

pub use camera::PerspectiveCamera;
pub use context::{Fog, RenderContext, Viewport};
pub use drawable::{
    Blending, Drawable, DrawableKind, DrawableRegistry, PointCloudBuffers, PointVertex,
    PointsMaterial, Primitive,
};
pub use layer::{GALAXY_DRAWABLE, GalaxyLayer};
pub use renderer::{DebugTextRenderer, Renderer};

/// Errors surfaced by render-side operations.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("galaxy generation failed: {0}")]
    Galaxy(#[from] stargaze_galaxy::GalaxyError),
}

use stargaze_common::Color;

use crate::{DrawableRegistry, PerspectiveCamera};

/// Highest device pixel ratio the renderer is asked to honor.
const MAX_PIXEL_RATIO: f32 = 2.0;

/// Canvas size in CSS pixels plus the display's device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            device_pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Pixel ratio actually used for the backbuffer, capped at 2.
    pub fn pixel_ratio(&self) -> f32 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        }
    }

    /// Backbuffer size in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio();
        (
            (self.width as f32 * ratio).round() as u32,
            (self.height as f32 * ratio).round() as u32,
        )
    }
}

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

/// Everything a frame needs besides the scene logic itself.
///
/// Owned by the caller and passed explicitly; nothing in this crate keeps
/// a camera or scene in a global.
#[derive(Debug)]
pub struct RenderContext {
    pub camera: PerspectiveCamera,
    pub clear_color: Color,
    pub fog: Option<Fog>,
    pub shadows_enabled: bool,
    viewport: Viewport,
    drawables: DrawableRegistry,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(Viewport::default(), PerspectiveCamera::default())
    }
}

impl RenderContext {
    pub fn new(viewport: Viewport, mut camera: PerspectiveCamera) -> Self {
        camera.set_aspect(viewport.aspect());
        Self {
            camera,
            clear_color: Color::BLACK,
            fog: None,
            shadows_enabled: false,
            viewport,
            drawables: DrawableRegistry::new(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Apply a canvas resize: viewport, camera aspect and pixel ratio together.
    ///
    /// Returns false and leaves state untouched for a zero-sized canvas.
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) -> bool {
        if width == 0 || height == 0 {
            tracing::debug!(width, height, "ignoring zero-sized resize");
            return false;
        }
        self.viewport = Viewport::new(width, height, device_pixel_ratio);
        self.camera.set_aspect(self.viewport.aspect());
        tracing::debug!(
            width,
            height,
            pixel_ratio = self.viewport.pixel_ratio(),
            "viewport resized"
        );
        true
    }

    pub fn drawables(&self) -> &DrawableRegistry {
        &self.drawables
    }

    pub fn drawables_mut(&mut self) -> &mut DrawableRegistry {
        &mut self.drawables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn new_context_matches_viewport_aspect() {
        let ctx = RenderContext::new(Viewport::new(800, 400, 1.0), PerspectiveCamera::default());
        assert_eq!(ctx.camera.aspect, 2.0);
        assert!(ctx.drawables().is_empty());
    }

    #[test]
    fn resize_updates_camera_and_viewport() {
        let mut ctx = RenderContext::new(Viewport::default(), PerspectiveCamera::default());
        ctx.camera.position = Vec3::new(3.0, 3.0, 3.0);
        assert!(ctx.resize(1000, 500, 3.0));
        assert_eq!(ctx.viewport().width, 1000);
        assert_eq!(ctx.camera.aspect, 2.0);
        assert_eq!(ctx.viewport().pixel_ratio(), 2.0);
        assert_eq!(ctx.viewport().physical_size(), (2000, 1000));
        assert_eq!(ctx.camera.position, Vec3::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn zero_sized_resize_ignored() {
        let mut ctx =
            RenderContext::new(Viewport::new(640, 480, 1.0), PerspectiveCamera::default());
        assert!(!ctx.resize(0, 480, 1.0));
        assert_eq!(ctx.viewport().width, 640);
    }

    #[test]
    fn pixel_ratio_below_cap_passes_through() {
        assert_eq!(Viewport::new(10, 10, 1.5).pixel_ratio(), 1.5);
        assert_eq!(Viewport::new(10, 10, 0.0).pixel_ratio(), 1.0);
    }
}

use glam::Vec3;
use stargaze_common::{Color, DrawableId, Transform};
use stargaze_render::{Drawable, DrawableKind, Primitive, RenderContext};

/// The unit cube tweaked from the debug panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SandboxObject {
    elevation: f32,
    pub visible: bool,
    pub wireframe: bool,
    pub color: Color,
    id: Option<DrawableId>,
}

impl Default for SandboxObject {
    fn default() -> Self {
        Self {
            elevation: 0.0,
            visible: false,
            wireframe: false,
            color: Color::hex(0xff0000),
            id: None,
        }
    }
}

impl SandboxObject {
    pub const ELEVATION_MIN: f32 = -2.0;
    pub const ELEVATION_MAX: f32 = 2.0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    /// Set the cube's height, clamped to `[-2, 2]`.
    pub fn set_elevation(&mut self, elevation: f32) {
        self.elevation = elevation.clamp(Self::ELEVATION_MIN, Self::ELEVATION_MAX);
    }

    /// Show or hide the cube in `ctx`, keeping color and position current.
    ///
    /// Hidden objects are not registered at all.
    pub fn sync(&mut self, ctx: &mut RenderContext) {
        let registry = ctx.drawables_mut();
        if !self.visible {
            if let Some(id) = self.id.take() {
                registry.remove(id);
            }
            return;
        }
        let transform = Transform::from_position(Vec3::new(0.0, self.elevation, 0.0));
        if let Some(drawable) = self.id.and_then(|id| registry.get_mut(id)) {
            drawable.transform = transform;
            if let DrawableKind::Mesh {
                color, wireframe, ..
            } = &mut drawable.kind
            {
                *color = self.color;
                *wireframe = self.wireframe;
            }
            return;
        }
        let mut drawable = Drawable::mesh(
            "sandbox-cube",
            Primitive::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            self.color,
        )
        .with_transform(transform);
        if let DrawableKind::Mesh { wireframe, .. } = &mut drawable.kind {
            *wireframe = self.wireframe;
        }
        self.id = Some(registry.add(drawable));
    }
}

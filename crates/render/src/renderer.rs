use std::fmt::Write;

use crate::{DrawableKind, Primitive, RenderContext};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the context and produces output. It never touches the
/// drawable registry; scenes and layers own that.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given context.
    fn render(&self, ctx: &RenderContext) -> Self::Output;
}

/// Renders the context as human-readable text.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, ctx: &RenderContext) -> String {
        let mut out = String::new();
        let viewport = ctx.viewport();
        let cam = &ctx.camera;
        let _ = writeln!(
            out,
            "=== Frame ({}x{} @{:.1}x, clear={}) ===",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio(),
            ctx.clear_color
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.2}",
            cam.position.x,
            cam.position.y,
            cam.position.z,
            cam.target.x,
            cam.target.y,
            cam.target.z,
            cam.fov_degrees,
            cam.aspect
        );
        if let Some(fog) = ctx.fog {
            let _ = writeln!(out, "Fog: {} {:.1}..{:.1}", fog.color, fog.near, fog.far);
        }
        let _ = writeln!(out, "Drawables: {}", ctx.drawables().len());

        for (id, drawable) in ctx.drawables().iter() {
            let p = drawable.transform.position;
            let detail = match &drawable.kind {
                DrawableKind::PointCloud { buffers, material } => {
                    format!("points={} size={}", buffers.vertex_count(), material.size)
                }
                DrawableKind::Mesh {
                    primitive,
                    color,
                    wireframe,
                    ..
                } => {
                    let mode = if *wireframe { " wireframe" } else { "" };
                    format!("{} {}{}", primitive_name(primitive), color, mode)
                }
                DrawableKind::PointLight {
                    color, intensity, ..
                } => format!("light {color} x{intensity:.2}"),
                DrawableKind::AmbientLight { color, intensity } => {
                    format!("ambient {color} x{intensity:.2}")
                }
                DrawableKind::DirectionalLight { color, intensity } => {
                    format!("directional {color} x{intensity:.2}")
                }
            };
            let _ = writeln!(
                out,
                "  [{}] {} pos=({:.2}, {:.2}, {:.2}) {}",
                id.short(),
                drawable.name,
                p.x,
                p.y,
                p.z,
                detail
            );
        }

        out
    }
}

fn primitive_name(primitive: &Primitive) -> &'static str {
    match primitive {
        Primitive::Box { .. } => "box",
        Primitive::Sphere { .. } => "sphere",
        Primitive::Cone { .. } => "cone",
        Primitive::Plane { .. } => "plane",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Drawable, Fog, GalaxyLayer};
    use glam::Vec3;
    use stargaze_common::{Color, Transform};
    use stargaze_galaxy::{GalaxyParameters, PointFieldGenerator};

    #[test]
    fn debug_renderer_empty_context() {
        let ctx = RenderContext::default();
        let output = DebugTextRenderer::new().render(&ctx);

        assert!(output.contains("1280x720"));
        assert!(output.contains("Drawables: 0"));
        assert!(output.contains("fov=75"));
    }

    #[test]
    fn debug_renderer_with_drawables() {
        let mut ctx = RenderContext::default();
        ctx.fog = Some(Fog {
            color: Color::from_hex("#262837").unwrap(),
            near: 1.0,
            far: 15.0,
        });
        ctx.drawables_mut().add(
            Drawable::mesh("ghost", Primitive::Sphere { radius: 0.5 }, Color::WHITE)
                .with_transform(Transform::from_position(Vec3::new(1.0, 2.0, 3.0))),
        );
        let mut generator = PointFieldGenerator::seeded(9);
        GalaxyLayer::new()
            .regenerate(
                &mut ctx,
                &mut generator,
                &GalaxyParameters {
                    count: 42,
                    ..GalaxyParameters::default()
                },
            )
            .unwrap();

        let output = DebugTextRenderer::new().render(&ctx);
        assert!(output.contains("Drawables: 2"));
        assert!(output.contains("ghost pos=(1.00, 2.00, 3.00) sphere #ffffff"));
        assert!(output.contains("points=42"));
        assert!(output.contains("Fog: #262837"));
    }
}

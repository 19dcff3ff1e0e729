use stargaze_common::DrawableId;
use stargaze_galaxy::{GalaxyParameters, PointField, PointFieldGenerator, UniformSource};

use crate::{Drawable, PointsMaterial, RenderContext, RenderError};

/// Drawable name used for the galaxy point cloud.
pub const GALAXY_DRAWABLE: &str = "galaxy";

/// Slot holding the currently displayed galaxy point cloud.
///
/// All regeneration goes through [`GalaxyLayer::regenerate`], which disposes
/// the previous cloud before adding the new one, so at most one galaxy is
/// ever registered.
#[derive(Debug, Default)]
pub struct GalaxyLayer {
    current: Option<DrawableId>,
    regenerations: u64,
}

impl GalaxyLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the cloud currently in the registry.
    pub fn current(&self) -> Option<DrawableId> {
        self.current
    }

    pub fn regenerations(&self) -> u64 {
        self.regenerations
    }

    /// Replace the displayed galaxy with a freshly generated one.
    ///
    /// Invalid parameters fail before anything is disposed, leaving the
    /// current cloud on screen.
    pub fn regenerate<S: UniformSource>(
        &mut self,
        ctx: &mut RenderContext,
        generator: &mut PointFieldGenerator<S>,
        params: &GalaxyParameters,
    ) -> Result<DrawableId, RenderError> {
        let field = generator.generate(params)?;
        self.replace(ctx, &field, params)
    }

    /// Swap an already generated field in for the current cloud.
    ///
    /// Same validate, dispose, add sequence as [`GalaxyLayer::regenerate`];
    /// `params` supplies the material.
    pub fn replace(
        &mut self,
        ctx: &mut RenderContext,
        field: &PointField,
        params: &GalaxyParameters,
    ) -> Result<DrawableId, RenderError> {
        params.validate()?;
        self.clear(ctx);

        let material = PointsMaterial::galaxy(params);
        let id = ctx
            .drawables_mut()
            .add(Drawable::point_cloud(GALAXY_DRAWABLE, field, material));
        self.current = Some(id);
        self.regenerations += 1;

        tracing::info!(
            points = field.len(),
            branches = params.branches,
            regeneration = self.regenerations,
            "galaxy regenerated"
        );
        Ok(id)
    }

    /// Dispose the current cloud, if any. Returns true if one was removed.
    pub fn clear(&mut self, ctx: &mut RenderContext) -> bool {
        match self.current.take() {
            Some(id) => ctx.drawables_mut().remove(id).is_some(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DrawableKind;

    fn params(count: u32) -> GalaxyParameters {
        GalaxyParameters {
            count,
            ..GalaxyParameters::default()
        }
    }

    #[test]
    fn first_generation_adds_one_cloud() {
        let mut ctx = RenderContext::default();
        let mut generator = PointFieldGenerator::seeded(1);
        let mut layer = GalaxyLayer::new();

        let id = layer.regenerate(&mut ctx, &mut generator, &params(100)).unwrap();
        assert_eq!(layer.current(), Some(id));
        assert_eq!(ctx.drawables().len(), 1);
        assert_eq!(ctx.drawables().disposed_count(), 0);
    }

    #[test]
    fn regeneration_disposes_previous_cloud() {
        let mut ctx = RenderContext::default();
        let mut generator = PointFieldGenerator::seeded(2);
        let mut layer = GalaxyLayer::new();

        let first = layer.regenerate(&mut ctx, &mut generator, &params(100)).unwrap();
        let second = layer.regenerate(&mut ctx, &mut generator, &params(250)).unwrap();
        let third = layer.regenerate(&mut ctx, &mut generator, &params(50)).unwrap();

        assert_ne!(first, second);
        assert!(ctx.drawables().get(first).is_none());
        assert!(ctx.drawables().get(second).is_none());
        assert_eq!(ctx.drawables().len(), 1);
        assert_eq!(ctx.drawables().disposed_count(), 2);
        assert_eq!(layer.regenerations(), 3);

        match &ctx.drawables().get(third).unwrap().kind {
            DrawableKind::PointCloud { buffers, .. } => assert_eq!(buffers.vertex_count(), 50),
            other => panic!("unexpected drawable {other:?}"),
        }
    }

    #[test]
    fn invalid_params_keep_current_cloud() {
        let mut ctx = RenderContext::default();
        let mut generator = PointFieldGenerator::seeded(3);
        let mut layer = GalaxyLayer::new();

        let id = layer.regenerate(&mut ctx, &mut generator, &params(100)).unwrap();
        let bad = GalaxyParameters {
            branches: 0,
            ..params(100)
        };
        let err = layer.regenerate(&mut ctx, &mut generator, &bad).unwrap_err();
        assert!(matches!(err, RenderError::Galaxy(_)));
        assert_eq!(layer.current(), Some(id));
        assert_eq!(ctx.drawables().len(), 1);
        assert_eq!(ctx.drawables().disposed_count(), 0);
    }

    #[test]
    fn replace_shows_the_given_field() {
        let mut ctx = RenderContext::default();
        let mut generator = PointFieldGenerator::seeded(6);
        let mut layer = GalaxyLayer::new();
        layer.regenerate(&mut ctx, &mut generator, &params(30)).unwrap();

        let field = generator.generate(&params(20)).unwrap();
        let id = layer.replace(&mut ctx, &field, &params(20)).unwrap();

        assert_eq!(ctx.drawables().len(), 1);
        assert_eq!(ctx.drawables().disposed_count(), 1);
        assert_eq!(layer.regenerations(), 2);
        match &ctx.drawables().get(id).unwrap().kind {
            DrawableKind::PointCloud { buffers, .. } => {
                assert_eq!(*buffers, crate::PointCloudBuffers::upload(&field));
            }
            other => panic!("unexpected drawable {other:?}"),
        }
    }

    #[test]
    fn clear_disposes_once() {
        let mut ctx = RenderContext::default();
        let mut generator = PointFieldGenerator::seeded(4);
        let mut layer = GalaxyLayer::new();

        layer.regenerate(&mut ctx, &mut generator, &params(10)).unwrap();
        assert!(layer.clear(&mut ctx));
        assert!(!layer.clear(&mut ctx));
        assert!(ctx.drawables().is_empty());
        assert_eq!(ctx.drawables().disposed_count(), 1);
    }

    #[test]
    fn other_drawables_untouched() {
        let mut ctx = RenderContext::default();
        let light = ctx.drawables_mut().add(Drawable::point_light(
            "light",
            stargaze_common::Color::WHITE,
            1.0,
            7.0,
        ));
        let mut generator = PointFieldGenerator::seeded(5);
        let mut layer = GalaxyLayer::new();
        layer.regenerate(&mut ctx, &mut generator, &params(10)).unwrap();
        layer.regenerate(&mut ctx, &mut generator, &params(10)).unwrap();
        assert!(ctx.drawables().get(light).is_some());
        assert_eq!(ctx.drawables().len(), 2);
    }
}

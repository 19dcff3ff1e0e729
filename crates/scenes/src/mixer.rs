//! Model viewer: three placed models and a single-action animation mixer.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use stargaze_common::{Color, DrawableId, Transform};
use stargaze_render::{Drawable, Primitive, RenderContext};

use crate::{FrameClock, FrameTime, SceneError};

/// A named animation of fixed length.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    /// Seconds.
    pub duration: f32,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }

    /// Clips shipped with the fox model.
    pub fn fox() -> Vec<Self> {
        vec![
            Self::new("Survey", 3.4),
            Self::new("Walk", 0.7),
            Self::new("Run", 0.54),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Action {
    clip: usize,
    time: f32,
}

/// Plays at most one clip at a time and advances it by frame deltas.
#[derive(Debug, Clone, Default)]
pub struct AnimationMixer {
    clips: Vec<AnimationClip>,
    active: Option<Action>,
}

impl AnimationMixer {
    /// Build a mixer and start the first clip, if there is one.
    pub fn new(clips: Vec<AnimationClip>) -> Self {
        let active = (!clips.is_empty()).then_some(Action { clip: 0, time: 0.0 });
        Self { clips, active }
    }

    pub fn clips(&self) -> &[AnimationClip] {
        &self.clips
    }

    pub fn active_clip(&self) -> Option<&AnimationClip> {
        self.active.and_then(|a| self.clips.get(a.clip))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.map(|a| a.clip)
    }

    /// Local time of the active action.
    pub fn time(&self) -> Option<f32> {
        self.active.map(|a| a.time)
    }

    /// Stop the current action and start clip `index` from zero.
    ///
    /// An unknown index leaves the mixer stopped.
    pub fn play(&mut self, index: usize) -> Result<(), SceneError> {
        self.active = None;
        if index >= self.clips.len() {
            tracing::warn!(index, available = self.clips.len(), "no animation clip at index");
            return Err(SceneError::ClipNotFound {
                index,
                available: self.clips.len(),
            });
        }
        tracing::debug!(clip = %self.clips[index].name, "animation started");
        self.active = Some(Action {
            clip: index,
            time: 0.0,
        });
        Ok(())
    }

    pub fn stop(&mut self) {
        self.active = None;
    }

    /// Advance the active action by `delta` seconds, looping at the clip end.
    pub fn update(&mut self, delta: f32) {
        let Some(action) = self.active.as_mut() else {
            return;
        };
        let duration = self.clips[action.clip].duration;
        action.time += delta.max(0.0);
        if duration > 0.0 {
            action.time = action.time.rem_euclid(duration);
        } else {
            action.time = 0.0;
        }
    }
}

/// Where a loaded model is placed in the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPlacement {
    pub name: String,
    pub path: String,
    pub transform: Transform,
}

/// The fox, duck and flight helmet as the viewer lays them out.
pub fn default_models() -> Vec<ModelPlacement> {
    vec![
        ModelPlacement {
            name: "Fox".into(),
            path: "models/Fox/glTF/Fox.gltf".into(),
            transform: Transform::default().with_scale(0.025),
        },
        ModelPlacement {
            name: "Duck".into(),
            path: "models/Duck/glTF-Draco/Duck.gltf".into(),
            transform: Transform::from_position(Vec3::new(2.0, 0.0, 0.0)).with_yaw(-FRAC_PI_2),
        },
        ModelPlacement {
            name: "FlightHelmet".into(),
            path: "models/FlightHelmet/glTF/FlightHelmet.gltf".into(),
            transform: Transform::from_position(Vec3::new(-2.0, 0.0, 0.0)).with_scale(3.0),
        },
    ]
}

/// Model viewer scene: placements, the fox mixer and the frame clock.
#[derive(Debug, Clone)]
pub struct ModelViewer {
    pub models: Vec<ModelPlacement>,
    pub mixer: AnimationMixer,
    clock: FrameClock,
    ids: Vec<DrawableId>,
}

impl Default for ModelViewer {
    fn default() -> Self {
        Self::new(default_models(), AnimationMixer::new(AnimationClip::fox()))
    }
}

impl ModelViewer {
    pub fn new(models: Vec<ModelPlacement>, mixer: AnimationMixer) -> Self {
        Self {
            models,
            mixer,
            clock: FrameClock::new(),
            ids: Vec::new(),
        }
    }

    /// Register model stand-ins and lights, and aim the camera at the models.
    pub fn populate(&mut self, ctx: &mut RenderContext) {
        ctx.camera.position = Vec3::new(2.0, 2.0, 2.0);
        ctx.camera.target = Vec3::new(0.0, 0.75, 0.0);
        ctx.camera.far = 1500.0;
        ctx.shadows_enabled = true;

        let registry = ctx.drawables_mut();
        self.ids = self
            .models
            .iter()
            .map(|model| {
                registry.add(
                    Drawable::mesh(
                        model.name.clone(),
                        Primitive::Box {
                            width: 1.0,
                            height: 1.0,
                            depth: 1.0,
                        },
                        Color::WHITE,
                    )
                    .with_transform(model.transform),
                )
            })
            .collect();
        registry.add(Drawable::ambient_light("ambient", Color::WHITE, 0.8));
        registry.add(
            Drawable::directional_light("sun", Color::WHITE, 0.6)
                .with_transform(Transform::from_position(Vec3::splat(5.0))),
        );
    }

    /// Ids of the model stand-ins, in placement order.
    pub fn model_ids(&self) -> &[DrawableId] {
        &self.ids
    }

    /// Feed one frame's elapsed time through the clock into the mixer.
    pub fn frame(&mut self, elapsed: f32) -> FrameTime {
        let time = self.clock.tick(elapsed);
        self.mixer.update(time.delta);
        time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixer() -> AnimationMixer {
        AnimationMixer::new(vec![
            AnimationClip::new("a", 2.0),
            AnimationClip::new("b", 1.0),
        ])
    }

    #[test]
    fn autoplays_first_clip() {
        let m = mixer();
        assert_eq!(m.active_index(), Some(0));
        assert_eq!(m.time(), Some(0.0));
        assert!(AnimationMixer::new(Vec::new()).active_clip().is_none());
    }

    #[test]
    fn update_wraps_at_duration() {
        let mut m = mixer();
        m.update(1.5);
        m.update(1.0);
        assert!((m.time().unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn play_switches_and_resets() {
        let mut m = mixer();
        m.update(0.7);
        m.play(1).unwrap();
        assert_eq!(m.active_clip().map(|c| c.name.as_str()), Some("b"));
        assert_eq!(m.time(), Some(0.0));
    }

    #[test]
    fn unknown_clip_stops_mixer() {
        let mut m = mixer();
        let err = m.play(7).unwrap_err();
        assert_eq!(
            err,
            SceneError::ClipNotFound {
                index: 7,
                available: 2
            }
        );
        assert!(m.active_clip().is_none());
        m.update(1.0);
        assert_eq!(m.time(), None);
    }

    #[test]
    fn placements_match_viewer_layout() {
        let models = default_models();
        assert_eq!(models[0].transform.scale, Vec3::splat(0.025));
        assert_eq!(models[1].transform.position.x, 2.0);
        let duck_forward = models[1].transform.rotation * Vec3::Z;
        assert!((duck_forward - Vec3::NEG_X).length() < 1e-5);
        assert_eq!(models[2].transform.position.x, -2.0);
        assert_eq!(models[2].transform.scale, Vec3::splat(3.0));
    }

    #[test]
    fn viewer_frames_drive_mixer() {
        let mut ctx = RenderContext::default();
        let mut viewer = ModelViewer::default();
        viewer.populate(&mut ctx);
        assert_eq!(viewer.model_ids().len(), 3);
        assert_eq!(ctx.drawables().len(), 5);

        viewer.frame(0.25);
        let t = viewer.frame(0.5);
        assert_eq!(t.delta, 0.25);
        assert!((viewer.mixer.time().unwrap() - 0.5).abs() < 1e-6);
    }
}

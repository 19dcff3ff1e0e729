//! Haunted house: a static yard layout plus three orbiting ghost lights and a
//! floating ghost that bobs in front of the door.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use glam::{EulerRot, Quat, Vec3};
use stargaze_common::{Color, DrawableId, Transform};
use stargaze_galaxy::UniformSource;
use stargaze_render::{Drawable, Fog, Primitive, RenderContext};

const FOG_COLOR: Color = Color::hex(0x262837);
const MOON_COLOR: Color = Color::hex(0xb9d5ff);
const GRAVE_COLOR: Color = Color::hex(0xb2b6b1);
const GHOST_BODY_RADIUS: f32 = 0.5;

/// Closed-form flight path of one ghost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostOrbit {
    /// Radius 4, counter-clockwise, single bob.
    Inner,
    /// Radius 5, clockwise, two-frequency bob.
    Middle,
    /// Radius wobbling around 7, slow clockwise, two-frequency bob.
    Outer,
}

impl GhostOrbit {
    pub const ALL: [Self; 3] = [Self::Inner, Self::Middle, Self::Outer];

    /// Position at `elapsed` seconds.
    pub fn position(self, elapsed: f32) -> Vec3 {
        let t = elapsed;
        match self {
            Self::Inner => {
                let angle = t * 0.5;
                Vec3::new(angle.cos() * 4.0, (t * 3.0).sin(), angle.sin() * 4.0)
            }
            Self::Middle => {
                let angle = -t * 0.32;
                Vec3::new(
                    angle.cos() * 5.0,
                    (t * 4.0).sin() + (t * 2.5).sin(),
                    angle.sin() * 5.0,
                )
            }
            Self::Outer => {
                let angle = -t * 0.18;
                Vec3::new(
                    angle.cos() * (7.0 + (t * 0.32).sin()),
                    (t * 4.0).sin() + (t * 2.5).sin(),
                    angle.sin() * (7.0 + (t * 0.5).sin()),
                )
            }
        }
    }

    pub fn light_color(self) -> Color {
        match self {
            Self::Inner => Color::hex(0xff00ff),
            Self::Middle => Color::hex(0x00ffff),
            Self::Outer => Color::hex(0xffff00),
        }
    }
}

/// A colored point light with a translucent body glued to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostLight {
    pub orbit: GhostOrbit,
    pub intensity: f32,
    pub distance: f32,
    pub position: Vec3,
}

impl GhostLight {
    pub fn new(orbit: GhostOrbit) -> Self {
        Self {
            orbit,
            intensity: 2.0,
            distance: 3.0,
            position: orbit.position(0.0),
        }
    }

    pub fn update(&mut self, elapsed: f32) {
        self.position = self.orbit.position(elapsed);
    }
}

/// Ghost hovering in front of the house, bobbing and turning to face the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingGhost {
    pub position: Vec3,
    pub rotation: Quat,
    base_y: f32,
    direction: f32,
}

impl FloatingGhost {
    /// Distance from the bob center at which the ghost turns around.
    pub const BOB_RANGE: f32 = 0.2;
    /// Vertical travel per step.
    pub const BOB_STEP: f32 = 0.01;

    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            base_y: position.y,
            direction: 1.0,
        }
    }

    pub fn base_y(&self) -> f32 {
        self.base_y
    }

    /// Advance one frame of bobbing and face `look_target`.
    pub fn step(&mut self, look_target: Vec3) {
        if self.position.y > self.base_y + Self::BOB_RANGE {
            self.direction = -1.0;
        }
        if self.position.y < self.base_y - Self::BOB_RANGE {
            self.direction = 1.0;
        }
        self.position.y += self.direction * Self::BOB_STEP;

        if let Some(rotation) = facing(self.position, look_target) {
            self.rotation = rotation;
        }
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
            scale: Vec3::ONE,
        }
    }
}

/// Rotation that turns local +Z toward `target` while keeping the body upright.
fn facing(from: Vec3, target: Vec3) -> Option<Quat> {
    let dir = (target - from).try_normalize()?;
    let yaw = dir.x.atan2(dir.z);
    let pitch = -dir.y.clamp(-1.0, 1.0).asin();
    Some(Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0))
}

/// One headstone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grave {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Grave {
    pub const SIZE: Vec3 = Vec3::new(0.6, 0.8, 0.2);
}

/// Scatter headstones on a ring between radius 3 and 9 around the house.
///
/// Draws four values per grave: radius, angle, then the y and z tilts.
pub fn scatter_graves<S: UniformSource + ?Sized>(count: usize, source: &mut S) -> Vec<Grave> {
    (0..count)
        .map(|_| {
            let radius = 3.0 + source.next_unit() * 6.0;
            let angle = source.next_unit() * TAU;
            let tilt_y = (source.next_unit() - 0.5) * 0.4;
            let tilt_z = (source.next_unit() - 0.5) * 0.4;
            Grave {
                position: Vec3::new(
                    angle.sin() * radius,
                    Grave::SIZE.y / 2.0,
                    angle.cos() * radius,
                ),
                rotation: Quat::from_euler(EulerRot::XYZ, 0.0, tilt_y, tilt_z),
            }
        })
        .collect()
}

/// Fixed geometry of the house and yard.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseLayout {
    pub walls: Vec3,
    pub roof_radius: f32,
    pub roof_height: f32,
    pub door_size: f32,
    /// `(position, uniform scale)` per bush.
    pub bushes: Vec<(Vec3, f32)>,
    pub floor_size: f32,
    pub grave_count: usize,
}

impl Default for HouseLayout {
    fn default() -> Self {
        Self {
            walls: Vec3::new(4.0, 2.5, 4.0),
            roof_radius: 3.5,
            roof_height: 1.0,
            door_size: 2.0,
            bushes: vec![
                (Vec3::new(0.8, 0.2, 2.2), 0.5),
                (Vec3::new(1.4, 0.1, 2.1), 0.25),
                (Vec3::new(-0.8, 0.1, 2.2), 0.4),
                (Vec3::new(-1.0, 0.05, 2.6), 0.15),
            ],
            floor_size: 20.0,
            grave_count: 50,
        }
    }
}

impl HouseLayout {
    /// Where the floating ghost hovers: one unit up, two units out from the front wall.
    pub fn floating_ghost_anchor(&self) -> Vec3 {
        Vec3::new(0.0, 1.0, self.walls.z / 2.0 + 2.0)
    }

    /// Static drawables: floor, house, bushes and the three non-ghost lights.
    pub fn drawables(&self) -> Vec<Drawable> {
        let mut out = vec![
            Drawable::mesh(
                "floor",
                Primitive::Plane {
                    width: self.floor_size,
                    height: self.floor_size,
                },
                Color::hex(0xa9c388),
            )
            .with_transform(Transform {
                rotation: Quat::from_rotation_x(-FRAC_PI_2),
                ..Transform::default()
            }),
            Drawable::mesh(
                "walls",
                Primitive::Box {
                    width: self.walls.x,
                    height: self.walls.y,
                    depth: self.walls.z,
                },
                Color::hex(0xac8e82),
            )
            .with_transform(Transform::from_position(Vec3::new(0.0, self.walls.y / 2.0, 0.0))),
            Drawable::mesh(
                "roof",
                Primitive::Cone {
                    radius: self.roof_radius,
                    height: self.roof_height,
                    sides: 4,
                },
                Color::hex(0xb35f45),
            )
            .with_transform(
                Transform::from_position(Vec3::new(
                    0.0,
                    self.walls.y + self.roof_height / 2.0,
                    0.0,
                ))
                .with_yaw(FRAC_PI_4),
            ),
            Drawable::mesh(
                "door",
                Primitive::Plane {
                    width: self.door_size,
                    height: self.door_size,
                },
                Color::WHITE,
            )
            .with_transform(Transform::from_position(Vec3::new(
                0.0,
                self.door_size / 2.0,
                self.walls.z / 2.0 + 0.01,
            ))),
            Drawable::point_light("door-light", Color::hex(0xff7d46), 1.0, 7.0)
                .with_transform(Transform::from_position(Vec3::new(0.0, 2.2, 2.7))),
            Drawable::ambient_light("ambient", MOON_COLOR, 0.12),
            Drawable::directional_light("moon", MOON_COLOR, 0.12)
                .with_transform(Transform::from_position(Vec3::new(4.0, 5.0, -2.0))),
        ];
        for (i, (position, scale)) in self.bushes.iter().enumerate() {
            out.push(
                Drawable::mesh(
                    format!("bush-{i}"),
                    Primitive::Sphere { radius: 1.0 },
                    Color::hex(0x89c854),
                )
                .with_transform(Transform::from_position(*position).with_scale(*scale)),
            );
        }
        out
    }
}

/// Drawable ids for the animated parts, filled in by [`HauntedScene::populate`].
#[derive(Debug, Clone, Default)]
struct Handles {
    ghost_lights: Vec<DrawableId>,
    ghost_bodies: Vec<DrawableId>,
    floating_ghost: Option<DrawableId>,
}

/// The whole haunted-house scene.
#[derive(Debug, Clone)]
pub struct HauntedScene {
    pub layout: HouseLayout,
    ghosts: [GhostLight; 3],
    floating: FloatingGhost,
    graves: Vec<Grave>,
    handles: Handles,
}

impl HauntedScene {
    pub fn new<S: UniformSource + ?Sized>(layout: HouseLayout, source: &mut S) -> Self {
        let graves = scatter_graves(layout.grave_count, source);
        let floating = FloatingGhost::new(layout.floating_ghost_anchor());
        Self {
            layout,
            ghosts: GhostOrbit::ALL.map(GhostLight::new),
            floating,
            graves,
            handles: Handles::default(),
        }
    }

    pub fn ghosts(&self) -> &[GhostLight; 3] {
        &self.ghosts
    }

    pub fn floating_ghost(&self) -> &FloatingGhost {
        &self.floating
    }

    pub fn graves(&self) -> &[Grave] {
        &self.graves
    }

    /// Register every drawable and set the mood: fog, clear color, shadows, camera.
    pub fn populate(&mut self, ctx: &mut RenderContext) {
        ctx.fog = Some(Fog {
            color: FOG_COLOR,
            near: 1.0,
            far: 15.0,
        });
        ctx.clear_color = FOG_COLOR;
        ctx.shadows_enabled = true;
        ctx.camera.position = Vec3::new(4.0, 2.0, 5.0);

        let registry = ctx.drawables_mut();
        for drawable in self.layout.drawables() {
            registry.add(drawable);
        }
        for (i, grave) in self.graves.iter().enumerate() {
            registry.add(
                Drawable::mesh(
                    format!("grave-{i}"),
                    Primitive::Box {
                        width: Grave::SIZE.x,
                        height: Grave::SIZE.y,
                        depth: Grave::SIZE.z,
                    },
                    GRAVE_COLOR,
                )
                .with_transform(Transform {
                    position: grave.position,
                    rotation: grave.rotation,
                    scale: Vec3::ONE,
                }),
            );
        }

        self.handles = Handles::default();
        for (i, ghost) in self.ghosts.iter().enumerate() {
            let at = Transform::from_position(ghost.position);
            let light = Drawable::point_light(
                format!("ghost-{}", i + 1),
                ghost.orbit.light_color(),
                ghost.intensity,
                ghost.distance,
            );
            let body = Drawable::mesh(
                format!("ghost-{}-body", i + 1),
                Primitive::Sphere {
                    radius: GHOST_BODY_RADIUS,
                },
                Color::WHITE,
            );
            self.handles
                .ghost_lights
                .push(registry.add(light.with_transform(at)));
            self.handles
                .ghost_bodies
                .push(registry.add(body.with_transform(at)));
        }
        self.handles.floating_ghost = Some(registry.add(
            Drawable::mesh(
                "floating-ghost",
                Primitive::Sphere {
                    radius: GHOST_BODY_RADIUS,
                },
                Color::WHITE,
            )
            .with_transform(self.floating.transform()),
        ));

        tracing::info!(
            drawables = ctx.drawables().len(),
            graves = self.graves.len(),
            "haunted scene populated"
        );
    }

    /// Advance all animated parts to `elapsed` seconds. The floating ghost
    /// takes one bob step per call and turns toward `camera_position`.
    pub fn update(&mut self, elapsed: f32, camera_position: Vec3) {
        for ghost in &mut self.ghosts {
            ghost.update(elapsed);
        }
        self.floating.step(camera_position);
    }

    /// Push current ghost transforms into the registry.
    pub fn sync(&self, ctx: &mut RenderContext) {
        let registry = ctx.drawables_mut();
        for (i, ghost) in self.ghosts.iter().enumerate() {
            let at = Transform::from_position(ghost.position);
            // Bodies follow their lights.
            for handles in [&self.handles.ghost_lights, &self.handles.ghost_bodies] {
                if let Some(id) = handles.get(i) {
                    registry.set_transform(*id, at);
                }
            }
        }
        if let Some(id) = self.handles.floating_ghost {
            registry.set_transform(id, self.floating.transform());
        }
    }
}

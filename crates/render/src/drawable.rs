use std::collections::BTreeMap;

use bytemuck::{Pod, Zeroable};
use stargaze_common::{Color, DrawableId, Transform};
use stargaze_galaxy::{GalaxyParameters, PointField};

/// One interleaved point-cloud vertex as uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Staged copy of a [`PointField`] in the layout a GPU backend binds:
/// one position attribute and one color attribute, three floats each.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloudBuffers {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
}

impl PointCloudBuffers {
    pub fn upload(field: &PointField) -> Self {
        Self {
            positions: bytemuck::cast_slice(field.positions()).to_vec(),
            colors: bytemuck::cast_slice(field.colors()).to_vec(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Single interleaved vertex buffer for backends that prefer one binding.
    pub fn interleaved(&self) -> Vec<PointVertex> {
        self.positions
            .iter()
            .zip(&self.colors)
            .map(|(&position, &color)| PointVertex { position, color })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blending {
    Normal,
    Additive,
}

/// Material for point clouds with per-vertex colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsMaterial {
    pub size: f32,
    pub size_attenuation: bool,
    pub depth_write: bool,
    pub blending: Blending,
    pub vertex_colors: bool,
}

impl PointsMaterial {
    /// Additive, depth-write-free, vertex-colored points sized from the parameters.
    pub fn galaxy(params: &GalaxyParameters) -> Self {
        Self {
            size: params.size,
            size_attenuation: true,
            depth_write: false,
            blending: Blending::Additive,
            vertex_colors: true,
        }
    }
}

/// Mesh shapes the scenes ask for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Box { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32 },
    Cone { radius: f32, height: f32, sides: u32 },
    Plane { width: f32, height: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawableKind {
    PointCloud {
        buffers: PointCloudBuffers,
        material: PointsMaterial,
    },
    Mesh {
        primitive: Primitive,
        color: Color,
        opacity: f32,
        wireframe: bool,
    },
    PointLight {
        color: Color,
        intensity: f32,
        distance: f32,
    },
    /// Uniform light with no position.
    AmbientLight { color: Color, intensity: f32 },
    /// Parallel light shining from `transform.position` toward the origin.
    DirectionalLight { color: Color, intensity: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub name: String,
    pub transform: Transform,
    pub kind: DrawableKind,
}

impl Drawable {
    pub fn point_cloud(
        name: impl Into<String>,
        field: &PointField,
        material: PointsMaterial,
    ) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            kind: DrawableKind::PointCloud {
                buffers: PointCloudBuffers::upload(field),
                material,
            },
        }
    }

    pub fn mesh(name: impl Into<String>, primitive: Primitive, color: Color) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            kind: DrawableKind::Mesh {
                primitive,
                color,
                opacity: 1.0,
                wireframe: false,
            },
        }
    }

    pub fn point_light(
        name: impl Into<String>,
        color: Color,
        intensity: f32,
        distance: f32,
    ) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            kind: DrawableKind::PointLight {
                color,
                intensity,
                distance,
            },
        }
    }

    pub fn ambient_light(name: impl Into<String>, color: Color, intensity: f32) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            kind: DrawableKind::AmbientLight { color, intensity },
        }
    }

    pub fn directional_light(name: impl Into<String>, color: Color, intensity: f32) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            kind: DrawableKind::DirectionalLight { color, intensity },
        }
    }

    pub fn with_transform(self, transform: Transform) -> Self {
        Self { transform, ..self }
    }
}

/// Drawables currently handed to the renderer.
///
/// Removing a drawable releases its GPU-side resources; the registry counts
/// those releases so callers can check nothing leaks across regenerations.
#[derive(Debug, Default)]
pub struct DrawableRegistry {
    drawables: BTreeMap<DrawableId, Drawable>,
    disposed: u64,
}

impl DrawableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, drawable: Drawable) -> DrawableId {
        let id = DrawableId::new();
        tracing::debug!(id = %id.short(), name = %drawable.name, "drawable added");
        self.drawables.insert(id, drawable);
        id
    }

    /// Remove a drawable and release its resources. Returns it if it existed.
    pub fn remove(&mut self, id: DrawableId) -> Option<Drawable> {
        let drawable = self.drawables.remove(&id)?;
        self.disposed += 1;
        tracing::debug!(id = %id.short(), name = %drawable.name, "drawable disposed");
        Some(drawable)
    }

    pub fn get(&self, id: DrawableId) -> Option<&Drawable> {
        self.drawables.get(&id)
    }

    pub fn get_mut(&mut self, id: DrawableId) -> Option<&mut Drawable> {
        self.drawables.get_mut(&id)
    }

    /// Move a drawable. Returns false if it is not registered.
    pub fn set_transform(&mut self, id: DrawableId, transform: Transform) -> bool {
        match self.drawables.get_mut(&id) {
            Some(drawable) => {
                drawable.transform = transform;
                true
            }
            None => false,
        }
    }

    pub fn find_by_name(&self, name: &str) -> Option<(DrawableId, &Drawable)> {
        self.drawables
            .iter()
            .find(|(_, d)| d.name == name)
            .map(|(id, d)| (*id, d))
    }

    pub fn iter(&self) -> impl Iterator<Item = (DrawableId, &Drawable)> {
        self.drawables.iter().map(|(id, d)| (*id, d))
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Total drawables disposed over the registry's lifetime.
    pub fn disposed_count(&self) -> u64 {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stargaze_galaxy::{SeededSource, generate};

    fn small_field() -> PointField {
        let params = GalaxyParameters {
            count: 16,
            ..GalaxyParameters::default()
        };
        generate(&params, &mut SeededSource::new(1)).unwrap()
    }

    #[test]
    fn upload_preserves_layout() {
        let field = small_field();
        let buffers = PointCloudBuffers::upload(&field);
        assert_eq!(buffers.vertex_count(), 16);
        assert_eq!(buffers.position_bytes().len(), 16 * 3 * 4);
        assert_eq!(buffers.color_bytes().len(), 16 * 3 * 4);
        assert_eq!(buffers.position_bytes(), bytemuck::cast_slice::<f32, u8>(field.positions()));
    }

    #[test]
    fn interleaved_matches_fields() {
        let field = small_field();
        let vertices = PointCloudBuffers::upload(&field).interleaved();
        assert_eq!(vertices.len(), field.len());
        let (p, c) = field.iter().nth(5).unwrap();
        assert_eq!(vertices[5].position, p.to_array());
        assert_eq!(vertices[5].color, c.to_array());
        assert_eq!(std::mem::size_of::<PointVertex>(), 24);
    }

    #[test]
    fn galaxy_material_is_additive() {
        let material = PointsMaterial::galaxy(&GalaxyParameters::default());
        assert_eq!(material.size, 0.01);
        assert_eq!(material.blending, Blending::Additive);
        assert!(!material.depth_write);
        assert!(material.vertex_colors && material.size_attenuation);
    }

    #[test]
    fn add_remove_counts_disposals() {
        let mut registry = DrawableRegistry::new();
        let a = registry.add(Drawable::mesh("a", Primitive::Sphere { radius: 1.0 }, Color::WHITE));
        let b = registry.add(Drawable::point_light("b", Color::WHITE, 1.0, 5.0));
        assert_eq!(registry.len(), 2);

        assert!(registry.remove(a).is_some());
        assert!(registry.remove(a).is_none());
        assert_eq!(registry.disposed_count(), 1);
        assert!(registry.get(b).is_some());
    }

    #[test]
    fn set_transform_and_find() {
        let mut registry = DrawableRegistry::new();
        let id = registry.add(Drawable::mesh(
            "walls",
            Primitive::Box {
                width: 4.0,
                height: 2.5,
                depth: 4.0,
            },
            Color::WHITE,
        ));
        let moved = Transform::from_position(glam::Vec3::new(0.0, 1.25, 0.0));
        assert!(registry.set_transform(id, moved));
        assert!(!registry.set_transform(DrawableId::new(), moved));
        let (found, drawable) = registry.find_by_name("walls").unwrap();
        assert_eq!(found, id);
        assert_eq!(drawable.transform, moved);
    }
}

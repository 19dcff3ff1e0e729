use glam::Vec3;

/// Extruded text settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub text: String,
    pub size: f32,
    /// Extrusion depth.
    pub height: f32,
    pub curve_segments: u32,
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_offset: f32,
    pub bevel_segments: u32,
    pub wireframe: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            text: "Do the Work ".into(),
            size: 0.5,
            height: 0.2,
            curve_segments: 5,
            bevel_enabled: true,
            bevel_thickness: 0.03,
            bevel_size: 0.02,
            bevel_offset: 0.0,
            bevel_segments: 4,
            wireframe: true,
        }
    }
}

impl TextStyle {
    /// How far the bevel grows the glyphs outward on every side.
    pub fn bevel_extent(&self) -> f32 {
        if self.bevel_enabled {
            self.bevel_size + self.bevel_offset
        } else {
            0.0
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box holding every point, or `None` for an empty input.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |b, p| {
            Self::new(b.min.min(p), b.max.max(p))
        }))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }
}

/// Translation that moves the box's center onto the origin.
pub fn center_translation(bounds: &Aabb) -> Vec3 {
    -bounds.center()
}

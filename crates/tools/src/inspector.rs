use glam::Vec3;
use sha2::{Digest, Sha256};
use stargaze_galaxy::PointField;

/// Read-only queries against generated point fields.
pub struct PointFieldInspector;

impl PointFieldInspector {
    /// Summarize a field: extent, color range and a digest of both buffers.
    pub fn summary(field: &PointField) -> FieldSummary {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        let mut color_min = [f32::INFINITY; 3];
        let mut color_max = [f32::NEG_INFINITY; 3];
        let mut max_planar_radius = 0.0_f32;

        for (p, c) in field.iter() {
            min = min.min(p);
            max = max.max(p);
            max_planar_radius = max_planar_radius.max(p.x.hypot(p.z));
            for (i, v) in c.to_array().into_iter().enumerate() {
                color_min[i] = color_min[i].min(v);
                color_max[i] = color_max[i].max(v);
            }
        }
        if field.is_empty() {
            min = Vec3::ZERO;
            max = Vec3::ZERO;
            color_min = [0.0; 3];
            color_max = [0.0; 3];
        }

        FieldSummary {
            count: field.len(),
            bounds_min: min.to_array(),
            bounds_max: max.to_array(),
            max_planar_radius,
            color_min,
            color_max,
            digest: Self::digest(field),
        }
    }

    /// Hex SHA-256 over the position buffer then the color buffer.
    ///
    /// Two fields share a digest only if both buffers are bit-identical.
    pub fn digest(field: &PointField) -> String {
        let mut hasher = Sha256::new();
        for v in field.positions().iter().chain(field.colors()) {
            hasher.update(v.to_le_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}

/// Summary of a point field for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSummary {
    pub count: usize,
    pub bounds_min: [f32; 3],
    pub bounds_max: [f32; 3],
    /// Largest distance from the Y axis.
    pub max_planar_radius: f32,
    pub color_min: [f32; 3],
    pub color_max: [f32; 3],
    pub digest: String,
}

impl std::fmt::Display for FieldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [x0, y0, z0] = self.bounds_min;
        let [x1, y1, z1] = self.bounds_max;
        writeln!(
            f,
            "PointField: points={} max_radius={:.3} digest={:.12}",
            self.count, self.max_planar_radius, self.digest
        )?;
        writeln!(
            f,
            "  bounds=({x0:.3}, {y0:.3}, {z0:.3})..({x1:.3}, {y1:.3}, {z1:.3})"
        )?;
        write!(
            f,
            "  color r={:.3}..{:.3} g={:.3}..{:.3} b={:.3}..{:.3}",
            self.color_min[0],
            self.color_max[0],
            self.color_min[1],
            self.color_max[1],
            self.color_min[2],
            self.color_max[2],
        )
    }
}

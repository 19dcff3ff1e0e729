use std::f32::consts::TAU;
use std::time::Instant;

use glam::Vec3;
use serde::Serialize;
use stargaze_common::Color;

use crate::{GalaxyError, GalaxyParameters, SeededSource, UniformSource};

/// Uniform draws consumed per point: radius, then magnitude and sign for x, y, z.
pub const DRAWS_PER_POINT: usize = 7;

/// Flat position and color buffers for a point cloud.
///
/// Point `i` occupies `[3i, 3i + 3)` in both buffers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointField {
    positions: Vec<f32>,
    colors: Vec<f32>,
}

impl PointField {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// xyz triples, contiguous.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// rgb triples, contiguous.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.positions
            .get(index * 3..index * 3 + 3)
            .map(Vec3::from_slice)
    }

    pub fn color(&self, index: usize) -> Option<Color> {
        self.colors
            .get(index * 3..index * 3 + 3)
            .map(|c| Color::rgb(c[0], c[1], c[2]))
    }

    /// Iterate `(position, color)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Vec3, Color)> + '_ {
        self.positions
            .chunks_exact(3)
            .zip(self.colors.chunks_exact(3))
            .map(|(p, c)| (Vec3::from_slice(p), Color::rgb(c[0], c[1], c[2])))
    }

    /// Hand both buffers to the caller.
    pub fn into_buffers(self) -> (Vec<f32>, Vec<f32>) {
        (self.positions, self.colors)
    }
}

/// Generate a spiral galaxy point field.
///
/// Fails with [`GalaxyError::InvalidParameter`] before drawing or allocating
/// when [`GalaxyParameters::validate`] rejects the parameters.
pub fn generate<S: UniformSource + ?Sized>(
    params: &GalaxyParameters,
    source: &mut S,
) -> Result<PointField, GalaxyError> {
    params.validate()?;

    let _span = tracing::debug_span!("generate_point_field", count = params.count).entered();
    let started = Instant::now();

    let len = params.count as usize * 3;
    let mut positions = vec![0.0_f32; len];
    let mut colors = vec![0.0_f32; len];
    let branches = params.branches as usize;

    for (i, (position, color)) in positions
        .chunks_exact_mut(3)
        .zip(colors.chunks_exact_mut(3))
        .enumerate()
    {
        let r = source.next_unit() * params.radius;
        let mixed = params
            .inside_color
            .lerp(params.outside_color, r / params.radius);

        let spin_angle = r * params.spin;
        let branch_angle = (i % branches) as f32 / branches as f32 * TAU;
        let angle = branch_angle + spin_angle;

        let offset_x = jitter(source, params, r);
        let offset_y = jitter(source, params, r);
        let offset_z = jitter(source, params, r);

        position.copy_from_slice(&[
            angle.cos() * r + offset_x,
            offset_y,
            angle.sin() * r + offset_z,
        ]);
        color.copy_from_slice(&mixed.to_array());
    }

    tracing::debug!(
        points = params.count,
        branches = params.branches,
        elapsed_us = started.elapsed().as_micros() as u64,
        "point field generated"
    );

    Ok(PointField { positions, colors })
}

/// Signed offset along one axis: magnitude draw first, then sign draw.
fn jitter<S: UniformSource + ?Sized>(source: &mut S, params: &GalaxyParameters, r: f32) -> f32 {
    let magnitude = source.next_unit().powf(params.randomness_power);
    let sign = if source.next_unit() < 0.5 { 1.0 } else { -1.0 };
    sign * magnitude * params.randomness * r
}

/// Generator that owns its randomness and counts how often it ran.
#[derive(Debug, Clone)]
pub struct PointFieldGenerator<S = SeededSource> {
    source: S,
    generations: u64,
}

impl PointFieldGenerator<SeededSource> {
    /// Reproducible generator: same seed, same sequence of fields.
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(SeededSource::new(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_source(SeededSource::from_entropy())
    }
}

impl<S: UniformSource> PointFieldGenerator<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            generations: 0,
        }
    }

    pub fn generate(&mut self, params: &GalaxyParameters) -> Result<PointField, GalaxyError> {
        let field = generate(params, &mut self.source)?;
        self.generations += 1;
        Ok(field)
    }

    /// Number of successful generations.
    pub fn generations(&self) -> u64 {
        self.generations
    }
}

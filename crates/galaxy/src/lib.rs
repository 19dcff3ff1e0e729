//! Galaxy: procedural spiral point-field generation.
//!
//! # Invariants
//! - `positions.len() == colors.len() == count * 3`, index-aligned per point.
//! - Parameters are validated before any buffer is allocated.
//! - Output is a pure function of the parameters and the uniform draws; the
//!   draw order per point is fixed (radius, then magnitude and sign for x, y, z).

mod error;
mod generator;
mod params;
mod source;

pub use error::GalaxyError;
pub use generator::{DRAWS_PER_POINT, PointField, PointFieldGenerator, generate};
pub use params::GalaxyParameters;
pub use source::{ScriptedSource, SeededSource, UniformSource};

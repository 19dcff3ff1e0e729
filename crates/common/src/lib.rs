//! Shared value types used across the stargaze crates.
//!
//! # Invariants
//! - Color channels are linear floats; conversions to and from 8-bit forms
//!   round and clamp, they never wrap.
//! - Types here carry no behavior beyond construction and conversion.

mod color;
mod types;

pub use color::{Color, ColorError};
pub use types::{DrawableId, Transform};

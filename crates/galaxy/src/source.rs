use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random numbers in `[0, 1)`.
///
/// The generator only ever asks for unit draws, so tests can pin every draw
/// with a [`ScriptedSource`] while real use goes through a [`SeededSource`].
pub trait UniformSource {
    fn next_unit(&mut self) -> f32;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

/// RNG-backed source. Same seed, same sequence.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from OS entropy; every run differs.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl UniformSource for SeededSource {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of values, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: Vec<f32>) -> Self {
        Self {
            values,
            cursor: 0,
        }
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for ScriptedSource {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

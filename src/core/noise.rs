//! Coherent noise used for organic motion.
//!
//! Values are in `[0, 1]` and deterministic for a given field and coordinate,
//! so the same frame always renders the same way.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

pub trait NoiseField {
    fn noise1(&self, x: f32) -> f32 {
        self.noise2(x, 0.0)
    }
    fn noise2(&self, x: f32, y: f32) -> f32;
    fn noise3(&self, x: f32, y: f32, z: f32) -> f32;
}

/// Map a `[0, 1]` noise sample to `[-1, 1]`.
#[inline]
pub fn signed(v: f32) -> f32 {
    v * 2.0 - 1.0
}

const OCTAVES: usize = 4;
const PERSISTENCE: f64 = 0.5;

/// Fractal Perlin noise (4 octaves, each half the amplitude of the last).
#[derive(Clone, Debug)]
pub struct PerlinField {
    fbm: Fbm<Perlin>,
}

impl PerlinField {
    pub fn new(seed: u32) -> Self {
        let fbm = Fbm::<Perlin>::new(seed)
            .set_octaves(OCTAVES)
            .set_persistence(PERSISTENCE);
        Self { fbm }
    }
}

impl Default for PerlinField {
    fn default() -> Self {
        Self::new(0)
    }
}

#[inline]
fn unit(v: f64) -> f32 {
    ((v * 0.5 + 0.5) as f32).clamp(0.0, 1.0)
}

impl NoiseField for PerlinField {
    fn noise2(&self, x: f32, y: f32) -> f32 {
        unit(self.fbm.get([x as f64, y as f64]))
    }

    fn noise3(&self, x: f32, y: f32, z: f32) -> f32 {
        unit(self.fbm.get([x as f64, y as f64, z as f64]))
    }
}

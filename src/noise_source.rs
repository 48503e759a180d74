//! Coherent noise sources sampled by the fractal synthesizer.

use noise::{NoiseFn, OpenSimplex};

/// Seeded, deterministic, continuous 2D noise.
///
/// The same source sampled at the same coordinate always returns the same
/// value. Generators expect values in `[0, 1]`.
pub trait NoiseSource {
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &N {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

/// OpenSimplex noise rescaled from `[-1, 1]` into `[0, 1]`.
#[derive(Clone, Debug)]
pub struct OpenSimplexSource {
    seed: i64,
    noise: OpenSimplex,
}

impl OpenSimplexSource {
    pub fn new(seed: i64) -> Self {
        Self {
            seed,
            noise: OpenSimplex::new(noise_seed(seed)),
        }
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }
}

impl NoiseSource for OpenSimplexSource {
    fn sample(&self, x: f64, y: f64) -> f64 {
        ((self.noise.get([x, y]) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// Seed handed to the noise crate, which only takes `u32`.
///
/// The i64 seed goes through the splitmix64 finalizer before the high half is
/// kept, so nearby or structured seeds map to unrelated noise seeds.
pub fn noise_seed(seed: i64) -> u32 {
    let mut z = seed as u64;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    (z >> 32) as u32
}

/// Returns the same value everywhere. Useful for pinning one field while
/// inspecting the rest of the pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantNoise(pub f64);

impl NoiseSource for ConstantNoise {
    fn sample(&self, _x: f64, _y: f64) -> f64 {
        self.0
    }
}

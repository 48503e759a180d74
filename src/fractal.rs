//! Reciprocal-weighted octave blending.
//!
//! Each gain scales the sample coordinates and contributes with weight
//! `1 / gain`, so low-frequency octaves dominate. Gains need not be powers of
//! two and there is no persistence term.

use crate::noise_source::NoiseSource;

/// Blend `noise` sampled at `(g * x, g * y)` for every gain `g`, weighted by
/// `1 / g` and normalized by the total weight.
///
/// The result stays within the range of the noise source. Callers are
/// expected to pass a non-empty list of positive gains; an empty list yields 0.
pub fn synthesize<N: NoiseSource + ?Sized>(noise: &N, x: f64, y: f64, gains: &[f64]) -> f64 {
    let mut total = 0.0;
    let mut weight_sum = 0.0;

    for &gain in gains {
        let weight = 1.0 / gain;
        total += weight * noise.sample(gain * x, gain * y);
        weight_sum += weight;
    }

    if weight_sum == 0.0 {
        return 0.0;
    }
    total / weight_sum
}

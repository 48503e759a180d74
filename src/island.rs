//! Radial island mask.
//!
//! Pixel coordinates are normalized to `[-1, 1]` around the map center. The
//! squared radius is divided by `sqrt(2)` so the mask only reaches zero near
//! the corners of the map.

use std::f64::consts::SQRT_2;

/// Normalize a pixel coordinate to the signed offset from the map center,
/// scaled so the edges sit at roughly `-1` and `1`.
pub fn normalized_offset(x: usize, y: usize, width: usize, height: usize) -> (f64, f64) {
    let half_w = width as f64 / 2.0;
    let half_h = height as f64 / 2.0;
    ((x as f64 - half_w) / half_w, (y as f64 - half_h) / half_h)
}

/// Distance term `d = min(1, (dx² + dy²) / sqrt(2))`.
pub fn distance(x: usize, y: usize, width: usize, height: usize) -> f64 {
    let (dx, dy) = normalized_offset(x, y, width, height);
    ((dx * dx + dy * dy) / SQRT_2).min(1.0)
}

/// Mask value `1 - d`: 1 at the center, falling to 0 towards the corners.
pub fn mask(x: usize, y: usize, width: usize, height: usize) -> f64 {
    1.0 - distance(x, y, width, height)
}

/// Mix a fractal value with the mask: `(1 - p) * value + p * mask`.
pub fn blend(value: f64, mask: f64, island_percent: f64) -> f64 {
    (1.0 - island_percent) * value + island_percent * mask
}

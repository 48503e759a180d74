//! Elevation and moisture field generation.
//!
//! Per cell:
//! 1. Fractal blend of each noise source over its gains
//! 2. Elevation mixed with the island mask (moisture is not)
//! 3. Exponent shaping
//! 4. Elevation floored at the water level

use crate::config::MapConfig;
use crate::fractal::synthesize;
use crate::grid::Grid;
use crate::island;
use crate::noise_source::NoiseSource;

/// Freshly generated scalar fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Fields {
    pub elevation: Grid<f64>,
    pub moisture: Grid<f64>,
}

/// Raise to a possibly fractional power. The base is clamped to `[0, 1]`
/// first so negative noise cannot produce NaN.
fn shape(value: f64, exponent: f64) -> f64 {
    value.clamp(0.0, 1.0).powf(exponent)
}

/// Shaped and water-clamped elevation at `(x, y)`.
pub fn elevation_at<N: NoiseSource + ?Sized>(config: &MapConfig, noise: &N, x: usize, y: usize) -> f64 {
    let (dx, dy) = island::normalized_offset(x, y, config.width, config.height);
    let nx = config.elevation_amplitude * dx;
    let ny = config.elevation_amplitude * dy;

    let e = synthesize(noise, nx, ny, &config.elevation_gains);
    let mask = 1.0 - island::distance(x, y, config.width, config.height);
    let e = island::blend(e, mask, config.island_percent);

    let elevation = shape(e, config.elevation_exponent);
    if elevation < config.water_level {
        config.water_level
    } else {
        elevation
    }
}

/// Shaped moisture at `(x, y)`.
pub fn moisture_at<N: NoiseSource + ?Sized>(config: &MapConfig, noise: &N, x: usize, y: usize) -> f64 {
    let (dx, dy) = island::normalized_offset(x, y, config.width, config.height);
    let nx = config.moisture_amplitude * dx;
    let ny = config.moisture_amplitude * dy;

    let m = synthesize(noise, nx, ny, &config.moisture_gains);
    shape(m, config.moisture_exponent)
}

/// Fill both fields for the whole map. Rows are computed in parallel; every
/// cell depends only on its own coordinates so the result matches a
/// sequential pass exactly.
pub fn generate_fields<E, M>(config: &MapConfig, elevation_noise: &E, moisture_noise: &M) -> Fields
where
    E: NoiseSource + Sync + ?Sized,
    M: NoiseSource + Sync + ?Sized,
{
    let elevation = Grid::from_fn_par(config.width, config.height, |x, y| {
        elevation_at(config, elevation_noise, x, y)
    });
    let moisture = Grid::from_fn_par(config.width, config.height, |x, y| {
        moisture_at(config, moisture_noise, x, y)
    });
    Fields { elevation, moisture }
}

/// Fraction of cells above the water level.
pub fn land_ratio(elevation: &Grid<f64>, water_level: f64) -> f64 {
    if elevation.is_empty() {
        return 0.0;
    }
    let land = elevation.as_slice().iter().filter(|&&e| e > water_level).count();
    land as f64 / elevation.len() as f64
}

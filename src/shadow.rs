//! Cast shadows from light entering at the west edge.
//!
//! A ray height is carried east along each row, dropping by `slope` per
//! column and lifted by any land cell it passes. Cells lower than the ray are
//! in shadow and have their RGB channels gamma-compressed. Rows are
//! independent and processed in parallel.

use rayon::prelude::*;

use crate::biomes::Rgba;
use crate::grid::Grid;

/// Ray height per cell. Column 0 is always 0.
pub fn shadow_heights(elevation: &Grid<f64>, water_level: f64, slope: f64) -> Grid<f64> {
    let mut heights = Grid::new_with(elevation.width, elevation.height, 0.0f64);
    heights.par_rows_mut().for_each(|(y, row)| {
        let terrain = elevation.row(y);
        for x in 1..row.len() {
            let west = terrain[x - 1];
            row[x] = if west > water_level {
                row[x - 1].max(west) - slope
            } else {
                row[x - 1] - slope
            };
        }
    });
    heights
}

/// Lookup table for `(c / 255)^(1 / gamma) * 255`, truncated.
pub fn gamma_table(gamma: f64) -> [u8; 256] {
    let mut table = [0u8; 256];
    for (c, out) in table.iter_mut().enumerate() {
        *out = ((c as f64 / 255.0).powf(1.0 / gamma) * 255.0) as u8;
    }
    table
}

/// Darken every cell whose ray height exceeds its elevation. Alpha is left
/// alone. Returns the number of shadowed cells.
///
/// Not idempotent: a second call darkens the same cells again.
pub fn cast_shadows(
    colors: &mut Grid<Rgba>,
    elevation: &Grid<f64>,
    water_level: f64,
    slope: f64,
    gamma: f64,
) -> usize {
    let heights = shadow_heights(elevation, water_level, slope);
    let table = gamma_table(gamma);

    colors
        .par_rows_mut()
        .map(|(y, row)| {
            let mut shadowed = 0;
            for (x, color) in row.iter_mut().enumerate() {
                if *heights.get(x, y) > *elevation.get(x, y) {
                    color[0] = table[color[0] as usize];
                    color[1] = table[color[1] as usize];
                    color[2] = table[color[2] as usize];
                    shadowed += 1;
                }
            }
            shadowed
        })
        .sum()
}

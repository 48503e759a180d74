use minifb::{Key, KeyRepeat, Window, WindowOptions};
use rand::Rng;

use crate::biomes::Rgba;
use crate::error::{MapError, Result};
use crate::grid::Grid;
use crate::raster::Raster;
use crate::seeds::Seeds;

/// Pack RGBA colors into minifb's `0RGB` pixels. Alpha is dropped.
pub fn to_framebuffer(colors: &Grid<Rgba>) -> Vec<u32> {
    colors
        .as_slice()
        .iter()
        .map(|&[r, g, b, _]| ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
        .collect()
}

/// Run the interactive map window.
/// Space regenerates with new random seeds, S adds a shadow pass, Escape exits.
pub fn run_viewer<R: Rng>(raster: &mut Raster, rng: &mut R) -> Result<()> {
    let (width, height) = (raster.width(), raster.height());

    let mut window = Window::new(
        "Fantasy Map Builder - Space: Regenerate, S: Shadow, Esc: Exit",
        width,
        height,
        WindowOptions {
            resize: false,
            scale: minifb::Scale::X1,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| MapError::Window(e.to_string()))?;

    // Limit to ~60fps
    window.set_target_fps(60);

    let mut buffer = to_framebuffer(raster.colors());

    log::info!("Viewer started. Controls:");
    log::info!("  Space: Regenerate");
    log::info!("  S: Apply shadow");
    log::info!("  Esc: Exit");

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let mut needs_redraw = false;

        if window.is_key_pressed(Key::Space, KeyRepeat::No) {
            let seeds = Seeds::random(rng);
            raster.generate(seeds);
            needs_redraw = true;
        }

        if window.is_key_pressed(Key::S, KeyRepeat::No) {
            raster.apply_shadow();
            needs_redraw = true;
        }

        if needs_redraw {
            buffer = to_framebuffer(raster.colors());
        }

        window
            .update_with_buffer(&buffer, width, height)
            .map_err(|e| MapError::Window(e.to_string()))?;
    }

    Ok(())
}

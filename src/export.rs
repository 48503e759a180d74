use std::path::Path;

use image::{GrayImage, ImageBuffer, Luma, Rgba as Pixel, RgbaImage};

use crate::biomes::Rgba;
use crate::error::Result;
use crate::grid::Grid;

/// Convert the color grid into an RGBA image.
pub fn render_colors(colors: &Grid<Rgba>) -> RgbaImage {
    let mut img: RgbaImage = ImageBuffer::new(colors.width as u32, colors.height as u32);
    for (x, y, &color) in colors.iter() {
        img.put_pixel(x as u32, y as u32, Pixel(color));
    }
    img
}

/// Export the color grid as a PNG (format chosen from the extension).
pub fn export_colors(colors: &Grid<Rgba>, path: impl AsRef<Path>) -> Result<()> {
    render_colors(colors).save(path.as_ref())?;
    log::info!("Wrote {}", path.as_ref().display());
    Ok(())
}

/// Render a scalar field as grayscale. Values are expected to be 0.0-1.0.
pub fn render_field(field: &Grid<f64>) -> GrayImage {
    let mut img: GrayImage = ImageBuffer::new(field.width as u32, field.height as u32);
    for (x, y, &v) in field.iter() {
        let level = (v.clamp(0.0, 1.0) * 255.0) as u8;
        img.put_pixel(x as u32, y as u32, Luma([level]));
    }
    img
}

pub fn export_field(field: &Grid<f64>, path: impl AsRef<Path>) -> Result<()> {
    render_field(field).save(path.as_ref())?;
    log::info!("Wrote {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_colors_keeps_pixels() {
        let mut colors = Grid::new_with(3, 2, [1u8, 2, 3, 255]);
        colors.set(2, 1, [9, 8, 7, 6]);
        let img = render_colors(&colors);
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [9, 8, 7, 6]);
        assert_eq!(img.get_pixel(0, 0).0, [1, 2, 3, 255]);
    }

    #[test]
    fn test_render_field_scales_and_clamps() {
        let field = Grid::from_vec(3, 1, vec![0.0, 1.0, 2.0]).unwrap();
        let img = render_field(&field);
        assert_eq!(img.get_pixel(0, 0).0, [0]);
        assert_eq!(img.get_pixel(1, 0).0, [255]);
        assert_eq!(img.get_pixel(2, 0).0, [255]);
    }

    #[test]
    fn test_export_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        let colors = Grid::new_with(4, 4, [20u8, 52, 164, 255]);
        export_colors(&colors, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (4, 4));
        assert_eq!(loaded.get_pixel(3, 3).0, [20, 52, 164, 255]);
    }
}

//! Biome classification by elevation and moisture.
//!
//! The palette is an ordered table: elevation bands are scanned in ascending
//! order, and within a land band the moisture sub-bands are scanned the same
//! way. Every comparison is a strict `<`, so a value sitting exactly on an
//! edge belongs to the higher band. Water (`elevation <= water_level`) and the
//! shoreline ignore moisture.

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};

pub type Rgba = [u8; 4];

/// A moisture sub-band. `below: None` marks the unbounded top band.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoistureBand {
    pub name: String,
    pub below: Option<f64>,
    pub color: Rgba,
}

/// A land elevation band holding its moisture sub-bands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElevationBand {
    pub name: String,
    pub below: Option<f64>,
    pub moisture: Vec<MoistureBand>,
}

/// Biome color table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub water: Rgba,
    pub shore: Rgba,
    /// Elevations in `(water_level, water_level + shore_height)` are shoreline.
    pub shore_height: f64,
    /// Land bands in ascending order; the last one must be unbounded.
    pub bands: Vec<ElevationBand>,
}

fn band(name: &str, below: Option<f64>, color: Rgba) -> MoistureBand {
    MoistureBand { name: name.to_string(), below, color }
}

impl Default for Palette {
    fn default() -> Self {
        const DESERT: Rgba = [203, 210, 161, 255];
        const GRASSLAND: Rgba = [143, 169, 96, 255];

        Self {
            water: [20, 52, 164, 255],
            shore: [157, 145, 122, 255],
            shore_height: 0.025,
            bands: vec![
                ElevationBand {
                    name: "lowland".to_string(),
                    below: Some(0.5),
                    moisture: vec![
                        band("subtropical desert", Some(0.16), DESERT),
                        band("grassland", Some(0.33), GRASSLAND),
                        band("tropical seasonal forest", Some(0.66), [101, 151, 79, 255]),
                        band("tropical rainforest", None, [69, 117, 88, 255]),
                    ],
                },
                ElevationBand {
                    name: "midland".to_string(),
                    below: Some(0.75),
                    moisture: vec![
                        band("temperate desert", Some(0.16), DESERT),
                        band("grassland", Some(0.5), GRASSLAND),
                        band("temperate deciduous forest", Some(0.83), [113, 147, 95, 255]),
                        band("temperate rainforest", None, [85, 134, 90, 255]),
                    ],
                },
                ElevationBand {
                    name: "highland".to_string(),
                    below: Some(0.9),
                    moisture: vec![
                        band("temperate desert", Some(0.33), DESERT),
                        band("shrubland", Some(0.66), [139, 152, 122, 255]),
                        band("taiga", None, [156, 170, 124, 255]),
                    ],
                },
                ElevationBand {
                    name: "peak".to_string(),
                    below: None,
                    moisture: vec![
                        band("scorched", Some(0.1), [85, 85, 85, 255]),
                        band("bare", Some(0.2), [136, 136, 136, 255]),
                        band("tundra", Some(0.5), [187, 187, 172, 255]),
                        band("snow", None, [221, 221, 227, 255]),
                    ],
                },
            ],
        }
    }
}

/// Check that a list of `below` bounds is finite, strictly ascending and
/// closed by an unbounded entry.
fn check_bounds(what: &str, bounds: impl Iterator<Item = Option<f64>>) -> Result<()> {
    let bounds: Vec<Option<f64>> = bounds.collect();
    let Some((last, init)) = bounds.split_last() else {
        return Err(MapError::InvalidPalette(format!("{} has no bands", what)));
    };
    if last.is_some() {
        return Err(MapError::InvalidPalette(format!("last band of {} must be unbounded", what)));
    }
    let mut previous = f64::NEG_INFINITY;
    for bound in init {
        match bound {
            Some(b) if b.is_finite() && *b > previous => previous = *b,
            Some(b) => {
                return Err(MapError::InvalidPalette(format!(
                    "{} bound {} is not finite and ascending", what, b
                )))
            }
            None => {
                return Err(MapError::InvalidPalette(format!(
                    "only the last band of {} may be unbounded", what
                )))
            }
        }
    }
    Ok(())
}

impl Palette {
    /// Reject tables with gaps or unordered bands.
    pub fn validate(&self) -> Result<()> {
        if !self.shore_height.is_finite() || self.shore_height < 0.0 {
            return Err(MapError::InvalidPalette(format!(
                "shore_height must be a non-negative number, got {}",
                self.shore_height
            )));
        }
        check_bounds("elevation", self.bands.iter().map(|b| b.below))?;
        for band in &self.bands {
            check_bounds(&band.name, band.moisture.iter().map(|m| m.below))?;
        }
        Ok(())
    }
}

/// Position of a classified cell in the palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BiomeIndex {
    Water,
    Shore,
    Land { band: usize, moisture: usize },
}

/// A palette bound to a water level, ready for lookups.
#[derive(Clone, Debug)]
pub struct BiomeClassifier {
    palette: Palette,
    water_level: f64,
    shore_limit: f64,
}

impl BiomeClassifier {
    pub fn new(palette: Palette, water_level: f64) -> Result<Self> {
        palette.validate()?;
        let shore_limit = water_level + palette.shore_height;
        Ok(Self { palette, water_level, shore_limit })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Locate `(elevation, moisture)` in the table. Total: NaN or out-of-range
    /// inputs land in the unbounded top bands.
    pub fn locate(&self, elevation: f64, moisture: f64) -> BiomeIndex {
        if elevation <= self.water_level {
            return BiomeIndex::Water;
        }
        if elevation < self.shore_limit {
            return BiomeIndex::Shore;
        }
        let band = first_below(self.palette.bands.iter().map(|b| b.below), elevation);
        let moisture =
            first_below(self.palette.bands[band].moisture.iter().map(|m| m.below), moisture);
        BiomeIndex::Land { band, moisture }
    }

    pub fn color_of(&self, index: BiomeIndex) -> Rgba {
        match index {
            BiomeIndex::Water => self.palette.water,
            BiomeIndex::Shore => self.palette.shore,
            BiomeIndex::Land { band, moisture } => self.palette.bands[band].moisture[moisture].color,
        }
    }

    pub fn name_of(&self, index: BiomeIndex) -> &str {
        match index {
            BiomeIndex::Water => "water",
            BiomeIndex::Shore => "shore",
            BiomeIndex::Land { band, moisture } => &self.palette.bands[band].moisture[moisture].name,
        }
    }

    pub fn classify(&self, elevation: f64, moisture: f64) -> Rgba {
        self.color_of(self.locate(elevation, moisture))
    }
}

/// Index of the first band whose bound exceeds `value`, or the last band.
/// Validated palettes always end with an unbounded band.
fn first_below(bounds: impl ExactSizeIterator<Item = Option<f64>>, value: f64) -> usize {
    let last = bounds.len().saturating_sub(1);
    let mut bounds = bounds;
    bounds
        .position(|below| below.map_or(true, |b| value < b))
        .unwrap_or(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER_LEVEL: f64 = 0.25;

    fn classifier() -> BiomeClassifier {
        BiomeClassifier::new(Palette::default(), WATER_LEVEL).unwrap()
    }

    #[test]
    fn test_default_palette_valid() {
        assert!(Palette::default().validate().is_ok());
    }

    #[test]
    fn test_water_only_at_or_below_water_level() {
        let c = classifier();
        assert_eq!(c.locate(WATER_LEVEL, 0.9), BiomeIndex::Water);
        assert_eq!(c.classify(WATER_LEVEL, 0.0), [20, 52, 164, 255]);
        assert_eq!(c.locate(WATER_LEVEL + 1e-9, 0.9), BiomeIndex::Shore);
    }

    #[test]
    fn test_shore_ignores_moisture() {
        let c = classifier();
        assert_eq!(c.classify(0.26, 0.0), c.classify(0.26, 1.0));
        assert_eq!(c.classify(0.26, 0.5), [157, 145, 122, 255]);
    }

    #[test]
    fn test_boundary_belongs_to_higher_band() {
        let c = classifier();
        assert_eq!(c.locate(0.5, 0.0), BiomeIndex::Land { band: 1, moisture: 0 });
        assert_eq!(c.locate(0.4, 0.16), BiomeIndex::Land { band: 0, moisture: 1 });
        assert_eq!(c.locate(0.9, 0.5), BiomeIndex::Land { band: 3, moisture: 3 });
        // shore edge: water_level + 0.025 is already lowland
        assert!(matches!(c.locate(WATER_LEVEL + 0.025, 0.0), BiomeIndex::Land { band: 0, .. }));
    }

    #[test]
    fn test_reference_colors() {
        let c = classifier();
        assert_eq!(c.classify(0.4, 0.7), [69, 117, 88, 255]);
        assert_eq!(c.classify(0.6, 0.6), [113, 147, 95, 255]);
        assert_eq!(c.classify(0.8, 0.5), [139, 152, 122, 255]);
        assert_eq!(c.classify(0.95, 0.05), [85, 85, 85, 255]);
        assert_eq!(c.classify(1.0, 1.0), [221, 221, 227, 255]);
        assert_eq!(c.name_of(c.locate(1.0, 1.0)), "snow");
    }

    #[test]
    fn test_classifier_total_over_unit_square() {
        let c = classifier();
        let colors: Vec<Rgba> = std::iter::once(c.palette().water)
            .chain(std::iter::once(c.palette().shore))
            .chain(c.palette().bands.iter().flat_map(|b| b.moisture.iter().map(|m| m.color)))
            .collect();

        let steps = 400;
        for i in 0..=steps {
            for j in 0..=steps {
                let e = i as f64 / steps as f64;
                let m = j as f64 / steps as f64;
                let color = c.classify(e, m);
                assert!(colors.contains(&color), "({}, {}) gave unknown color", e, m);
            }
        }
    }

    #[test]
    fn test_nan_falls_into_top_band() {
        let c = classifier();
        assert_eq!(c.locate(f64::NAN, f64::NAN), BiomeIndex::Land { band: 3, moisture: 3 });
    }

    #[test]
    fn test_rejects_bounded_last_band() {
        let mut palette = Palette::default();
        palette.bands[3].below = Some(1.0);
        assert!(matches!(palette.validate(), Err(MapError::InvalidPalette(_))));
    }

    #[test]
    fn test_rejects_unordered_moisture() {
        let mut palette = Palette::default();
        palette.bands[0].moisture[1].below = Some(0.1);
        assert!(BiomeClassifier::new(palette, WATER_LEVEL).is_err());
    }

    #[test]
    fn test_rejects_empty_bands() {
        let mut palette = Palette::default();
        palette.bands.clear();
        assert!(palette.validate().is_err());
    }

    #[test]
    fn test_palette_json_round_trip() {
        let palette = Palette::default();
        let json = serde_json::to_string(&palette).unwrap();
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, palette);
    }
}

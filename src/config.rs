//! Generation parameters.
//!
//! Every constant the pipeline reads lives in `MapConfig`. Map variants are
//! just different configs; they can be stored as JSON and loaded at startup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::biomes::Palette;
use crate::error::{MapError, Result};

/// Parameters for one generation pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Map width in pixels
    pub width: usize,
    /// Map height in pixels
    pub height: usize,
    /// Power applied to blended elevation (higher = flatter lowlands)
    pub elevation_exponent: f64,
    /// Power applied to moisture
    pub moisture_exponent: f64,
    /// Noise coordinate scale for elevation (higher = smaller features)
    pub elevation_amplitude: f64,
    /// Noise coordinate scale for moisture
    pub moisture_amplitude: f64,
    /// Octave frequency multipliers for elevation, each weighted by 1/gain
    pub elevation_gains: Vec<f64>,
    /// Octave frequency multipliers for moisture
    pub moisture_gains: Vec<f64>,
    /// Weight of the island mask in elevation (0.0-1.0)
    pub island_percent: f64,
    /// Elevation floor; everything below is flattened to this value
    pub water_level: f64,
    /// Gamma for shadowed cells (< 1 darkens)
    pub gamma: f64,
    /// Shadow ray height lost per column
    pub shadow_slope: f64,
    pub palette: Palette,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 1000,
            elevation_exponent: 2.0,
            moisture_exponent: 1.0,
            elevation_amplitude: 8.0,
            moisture_amplitude: 4.0,
            elevation_gains: vec![1.0, 2.0, 4.0],
            moisture_gains: vec![1.0, 2.0, 4.0],
            island_percent: 0.25,
            water_level: 0.25,
            gamma: 0.5,
            shadow_slope: 0.002,
            palette: Palette::default(),
        }
    }
}

fn invalid(msg: String) -> MapError {
    MapError::InvalidConfig(msg)
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{} must be finite, got {}", name, value)))
    }
}

fn check_gains(name: &str, gains: &[f64]) -> Result<()> {
    if gains.is_empty() {
        return Err(invalid(format!("{} must not be empty", name)));
    }
    if let Some(g) = gains.iter().find(|g| !g.is_finite() || **g <= 0.0) {
        return Err(invalid(format!("{} must be positive, got {}", name, g)));
    }
    Ok(())
}

impl MapConfig {
    /// Default parameters at a different resolution.
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid(format!(
                "map size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        // largest grid element is an f64; Vec cannot exceed isize::MAX bytes
        let fits = self
            .width
            .checked_mul(self.height)
            .and_then(|cells| cells.checked_mul(std::mem::size_of::<f64>()))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !fits {
            return Err(invalid(format!(
                "map size {}x{} is too large",
                self.width, self.height
            )));
        }
        check_finite("elevation_exponent", self.elevation_exponent)?;
        check_finite("moisture_exponent", self.moisture_exponent)?;
        check_finite("elevation_amplitude", self.elevation_amplitude)?;
        check_finite("moisture_amplitude", self.moisture_amplitude)?;
        check_finite("water_level", self.water_level)?;
        check_finite("shadow_slope", self.shadow_slope)?;
        check_gains("elevation_gains", &self.elevation_gains)?;
        check_gains("moisture_gains", &self.moisture_gains)?;
        if !(0.0..=1.0).contains(&self.island_percent) {
            return Err(invalid(format!(
                "island_percent must be within 0.0-1.0, got {}",
                self.island_percent
            )));
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(invalid(format!("gamma must be positive, got {}", self.gamma)));
        }
        if self.gamma >= 1.0 {
            log::warn!("gamma {} does not darken shadowed cells", self.gamma);
        }
        self.palette.validate()
    }

    /// Read a JSON config. Missing fields take their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: MapConfig = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}

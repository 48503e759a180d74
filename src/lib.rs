//! Fantasy map generation library
//!
//! Builds a biome-colored raster from an elevation/moisture seed pair and
//! optionally casts relief shadows over it.

pub mod biomes;
pub mod config;
pub mod error;
pub mod export;
pub mod fields;
pub mod fractal;
pub mod grid;
pub mod island;
pub mod noise_source;
pub mod raster;
pub mod seeds;
pub mod shadow;
pub mod viewer;

pub use biomes::{BiomeClassifier, BiomeIndex, Palette, Rgba};
pub use config::MapConfig;
pub use error::{MapError, Result};
pub use grid::Grid;
pub use noise_source::{ConstantNoise, NoiseSource, OpenSimplexSource};
pub use raster::Raster;
pub use seeds::Seeds;

//! Error types for map generation

use thiserror::Error;

/// Errors surfaced by configuration, generation and export.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("elevation and moisture seeds must differ (both are {0})")]
    EqualSeeds(i64),

    #[error("seeds {0} and {1} map to the same noise seed")]
    NoiseSeedCollision(i64, i64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("window error: {0}")]
    Window(String),
}

pub type Result<T> = std::result::Result<T, MapError>;

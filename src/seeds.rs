//! Seed pair for map generation
//!
//! Elevation and moisture are sampled from independently seeded noise, so the
//! two seeds must differ, and so must the noise seeds derived from them. A
//! `Seeds` value can only be built from a pair that passes both checks.

use rand::Rng;

use crate::error::{MapError, Result};
use crate::noise_source::noise_seed;

/// Seeds used when none are supplied.
pub const DEFAULT_ELEVATION_SEED: i64 = 13;
pub const DEFAULT_MOISTURE_SEED: i64 = 259;

/// Validated `(elevation, moisture)` seed pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "SeedPair")]
pub struct Seeds {
    elevation: i64,
    moisture: i64,
}

#[derive(serde::Deserialize)]
struct SeedPair {
    elevation: i64,
    moisture: i64,
}

impl TryFrom<SeedPair> for Seeds {
    type Error = MapError;

    fn try_from(pair: SeedPair) -> Result<Self> {
        Seeds::new(pair.elevation, pair.moisture)
    }
}

impl Seeds {
    pub fn new(elevation: i64, moisture: i64) -> Result<Self> {
        if elevation == moisture {
            return Err(MapError::EqualSeeds(elevation));
        }
        if noise_seed(elevation) == noise_seed(moisture) {
            return Err(MapError::NoiseSeedCollision(elevation, moisture));
        }
        Ok(Self { elevation, moisture })
    }

    /// Draw two non-negative seeds, redrawing the moisture seed while it equals
    /// the elevation seed or shares its noise seed.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let elevation = rng.gen_range(0..=i64::MAX);
        let mut moisture = rng.gen_range(0..=i64::MAX);
        while moisture == elevation || noise_seed(moisture) == noise_seed(elevation) {
            moisture = rng.gen_range(0..=i64::MAX);
        }
        log::info!("Elevation seed: {}", elevation);
        log::info!("Moisture seed: {}", moisture);
        Self { elevation, moisture }
    }

    pub fn elevation(&self) -> i64 {
        self.elevation
    }

    pub fn moisture(&self) -> i64 {
        self.moisture
    }
}

impl Default for Seeds {
    fn default() -> Self {
        Self {
            elevation: DEFAULT_ELEVATION_SEED,
            moisture: DEFAULT_MOISTURE_SEED,
        }
    }
}

impl std::fmt::Display for Seeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "elevation={} moisture={}", self.elevation, self.moisture)
    }
}

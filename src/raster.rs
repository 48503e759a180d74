//! The generated map: elevation, moisture and color grids with the two entry
//! points a host drives, `generate` and `apply_shadow`.

use std::time::Instant;

use crate::biomes::{BiomeClassifier, Rgba};
use crate::config::MapConfig;
use crate::error::Result;
use crate::fields::{self, Fields};
use crate::grid::Grid;
use crate::noise_source::{NoiseSource, OpenSimplexSource};
use crate::seeds::Seeds;
use crate::shadow;

/// Owns the three grids for one map configuration.
pub struct Raster {
    config: MapConfig,
    classifier: BiomeClassifier,
    seeds: Option<Seeds>,
    elevation: Grid<f64>,
    moisture: Grid<f64>,
    colors: Grid<Rgba>,
    shadow_passes: u32,
}

impl Raster {
    /// Validate `config` and allocate empty grids. Nothing is generated yet;
    /// colors start fully transparent.
    pub fn new(config: MapConfig) -> Result<Self> {
        config.validate()?;
        let classifier = BiomeClassifier::new(config.palette.clone(), config.water_level)?;
        let (width, height) = (config.width, config.height);
        Ok(Self {
            elevation: Grid::new_with(width, height, config.water_level),
            moisture: Grid::new_with(width, height, 0.0),
            colors: Grid::new_with(width, height, [0, 0, 0, 0]),
            config,
            classifier,
            seeds: None,
            shadow_passes: 0,
        })
    }

    /// Generate a new map from OpenSimplex noise seeded by `seeds`.
    pub fn generate(&mut self, seeds: Seeds) {
        log::info!("Generating map with seeds {}", seeds);
        let elevation_noise = OpenSimplexSource::new(seeds.elevation());
        let moisture_noise = OpenSimplexSource::new(seeds.moisture());
        self.generate_with(&elevation_noise, &moisture_noise);
        self.seeds = Some(seeds);
    }

    /// Generate a new map from arbitrary noise sources.
    ///
    /// All three grids are built before any of them is replaced, so the
    /// previous map stays intact until the new one is complete.
    pub fn generate_with<E, M>(&mut self, elevation_noise: &E, moisture_noise: &M)
    where
        E: NoiseSource + Sync + ?Sized,
        M: NoiseSource + Sync + ?Sized,
    {
        let start = Instant::now();
        log::info!("Generating {}x{} map", self.config.width, self.config.height);

        let Fields { elevation, moisture } =
            fields::generate_fields(&self.config, elevation_noise, moisture_noise);
        log::debug!("Fields generated in {:.2?}", start.elapsed());

        let colors = self.classify(&elevation, &moisture);

        self.elevation = elevation;
        self.moisture = moisture;
        self.colors = colors;
        self.seeds = None;
        self.shadow_passes = 0;

        log::info!(
            "Map ready in {:.2?} ({:.1}% land)",
            start.elapsed(),
            100.0 * fields::land_ratio(&self.elevation, self.config.water_level)
        );
    }

    fn classify(&self, elevation: &Grid<f64>, moisture: &Grid<f64>) -> Grid<Rgba> {
        Grid::from_fn_par(elevation.width, elevation.height, |x, y| {
            self.classifier.classify(*elevation.get(x, y), *moisture.get(x, y))
        })
    }

    /// Darken cells in the shadow of terrain to the west.
    ///
    /// Repeated calls compound: each pass darkens the same cells again.
    pub fn apply_shadow(&mut self) -> usize {
        let shadowed = shadow::cast_shadows(
            &mut self.colors,
            &self.elevation,
            self.config.water_level,
            self.config.shadow_slope,
            self.config.gamma,
        );
        self.shadow_passes += 1;
        log::debug!(
            "Shadow pass {} darkened {} of {} cells",
            self.shadow_passes,
            shadowed,
            self.colors.len()
        );
        shadowed
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn classifier(&self) -> &BiomeClassifier {
        &self.classifier
    }

    /// Seeds of the last `generate` call; `None` before generation or after
    /// `generate_with`.
    pub fn seeds(&self) -> Option<Seeds> {
        self.seeds
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn height(&self) -> usize {
        self.config.height
    }

    pub fn elevation(&self) -> &Grid<f64> {
        &self.elevation
    }

    pub fn moisture(&self) -> &Grid<f64> {
        &self.moisture
    }

    pub fn colors(&self) -> &Grid<Rgba> {
        &self.colors
    }

    /// Number of shadow passes applied since the last generation.
    pub fn shadow_passes(&self) -> u32 {
        self.shadow_passes
    }

    /// Row-major RGBA bytes, 4 per pixel.
    pub fn rgba_bytes(&self) -> Vec<u8> {
        self.colors.as_slice().iter().flat_map(|c| c.iter().copied()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise_source::ConstantNoise;

    /// Collects formatted log messages for the whole test binary.
    struct CaptureLogger(std::sync::Mutex<Vec<String>>);

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut lines) = self.0.lock() {
                lines.push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger(std::sync::Mutex::new(Vec::new()));

    fn small() -> Raster {
        Raster::new(MapConfig::with_size(96, 80)).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Raster::new(MapConfig::with_size(0, 4)).is_err());
    }

    #[test]
    fn test_generate_is_deterministic() {
        let seeds = Seeds::new(13, 259).unwrap();
        let mut a = small();
        let mut b = small();
        a.generate(seeds);
        b.generate(seeds);

        let bits = |g: &Grid<f64>| g.as_slice().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(a.elevation()), bits(b.elevation()));
        assert_eq!(bits(a.moisture()), bits(b.moisture()));
        assert_eq!(a.colors(), b.colors());
        assert_eq!(a.seeds(), Some(seeds));
    }

    #[test]
    fn test_generate_logs_seeds() {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Info);

        let mut raster = Raster::new(MapConfig::with_size(8, 8)).unwrap();
        raster.generate(Seeds::new(4242, 4343).unwrap());

        let lines = CAPTURE.0.lock().unwrap();
        assert!(lines.iter().any(|l| l.contains("elevation=4242 moisture=4343")));
    }

    #[test]
    fn test_regenerate_replaces_previous_map() {
        let mut raster = small();
        raster.generate(Seeds::new(1, 2).unwrap());
        raster.apply_shadow();
        raster.generate(Seeds::new(13, 259).unwrap());

        let mut fresh = small();
        fresh.generate(Seeds::new(13, 259).unwrap());
        assert_eq!(raster.colors(), fresh.colors());
        assert_eq!(raster.shadow_passes(), 0);
    }

    #[test]
    fn test_elevation_never_below_water() {
        let mut raster = small();
        raster.generate(Seeds::new(42, 43).unwrap());
        let water = raster.config().water_level;
        assert!(raster.elevation().as_slice().iter().all(|&e| e >= water));
    }

    #[test]
    fn test_uniform_noise_gives_uniform_raster() {
        let config = MapConfig {
            island_percent: 0.0,
            water_level: 0.25,
            ..MapConfig::with_size(4, 4)
        };
        let mut raster = Raster::new(config).unwrap();
        raster.generate_with(&ConstantNoise(0.5), &ConstantNoise(0.5));

        let expected = 0.5f64.powf(raster.config().elevation_exponent);
        assert!(raster.elevation().as_slice().iter().all(|&e| e == expected));
        let first = *raster.colors().get(0, 0);
        assert!(raster.colors().as_slice().iter().all(|&c| c == first));
        assert_eq!(first[3], 255);
    }

    #[test]
    fn test_negative_noise_gives_all_water() {
        let config = MapConfig {
            island_percent: 0.0,
            ..MapConfig::with_size(4, 4)
        };
        let mut raster = Raster::new(config).unwrap();
        raster.generate_with(&ConstantNoise(-1.0), &ConstantNoise(0.5));

        let water = raster.classifier().palette().water;
        assert!(raster.elevation().as_slice().iter().all(|&e| e == 0.25));
        assert!(raster.colors().as_slice().iter().all(|&c| c == water));
    }

    #[test]
    fn test_shadow_twice_darker_or_equal_and_keeps_alpha() {
        let mut raster = small();
        raster.generate(Seeds::new(7, 8).unwrap());
        let before = raster.colors().clone();
        raster.apply_shadow();
        let once = raster.colors().clone();
        raster.apply_shadow();
        let twice = raster.colors();

        for ((_, _, b), ((_, _, o), (_, _, t))) in
            before.iter().zip(once.iter().zip(twice.iter()))
        {
            for channel in 0..3 {
                assert!(o[channel] <= b[channel]);
                assert!(t[channel] <= o[channel]);
            }
            assert_eq!(b[3], o[3]);
            assert_eq!(o[3], t[3]);
        }
        assert_eq!(raster.shadow_passes(), 2);
    }

    #[test]
    fn test_rgba_bytes_layout() {
        let mut raster = Raster::new(MapConfig::with_size(3, 2)).unwrap();
        raster.generate(Seeds::default());
        let bytes = raster.rgba_bytes();
        assert_eq!(bytes.len(), 3 * 2 * 4);
        let c = *raster.colors().get(2, 1);
        assert_eq!(&bytes[(1 * 3 + 2) * 4..(1 * 3 + 2) * 4 + 4], &c);
    }
}

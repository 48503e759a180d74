use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use fantasy_map::seeds::{DEFAULT_ELEVATION_SEED, DEFAULT_MOISTURE_SEED};
use fantasy_map::{export, viewer, MapConfig, Raster, Seeds};

#[derive(Parser, Debug)]
#[command(name = "fantasy_map")]
#[command(about = "Generate island biome maps from an elevation/moisture seed pair")]
struct Args {
    /// JSON config file (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Width of the map in pixels (overrides config)
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the map in pixels (overrides config)
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Elevation noise seed
    #[arg(short, long)]
    elevation_seed: Option<i64>,

    /// Moisture noise seed (must differ from the elevation seed)
    #[arg(short, long)]
    moisture_seed: Option<i64>,

    /// Draw random seeds instead of using the given/default ones
    #[arg(short, long)]
    random: bool,

    /// Seed for the random seed generator (uses entropy if not specified)
    #[arg(long)]
    rng_seed: Option<u64>,

    /// Number of shadow passes to apply (passes compound)
    #[arg(short, long, default_value = "0")]
    shadow: u32,

    /// Output PNG path
    #[arg(short, long, default_value = "map.png")]
    output: PathBuf,

    /// Also export the elevation field as grayscale PNG
    #[arg(long)]
    export_elevation: Option<PathBuf>,

    /// Also export the moisture field as grayscale PNG
    #[arg(long)]
    export_moisture: Option<PathBuf>,

    /// Write the effective config as JSON and exit
    #[arg(long)]
    dump_config: Option<PathBuf>,

    /// Open an interactive window after generating
    #[arg(long)]
    view: bool,
}

fn main() -> fantasy_map::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MapConfig::load(path)?,
        None => MapConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }

    if let Some(path) = &args.dump_config {
        config.validate()?;
        config.save(path)?;
        log::info!("Wrote config to {}", path.display());
        return Ok(());
    }

    let mut rng = match args.rng_seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let seeds = if args.random {
        Seeds::random(&mut rng)
    } else {
        Seeds::new(
            args.elevation_seed.unwrap_or(DEFAULT_ELEVATION_SEED),
            args.moisture_seed.unwrap_or(DEFAULT_MOISTURE_SEED),
        )?
    };

    let mut raster = Raster::new(config)?;
    raster.generate(seeds);

    for _ in 0..args.shadow {
        raster.apply_shadow();
    }

    export::export_colors(raster.colors(), &args.output)?;
    if let Some(path) = &args.export_elevation {
        export::export_field(raster.elevation(), path)?;
    }
    if let Some(path) = &args.export_moisture {
        export::export_field(raster.moisture(), path)?;
    }

    if args.view {
        viewer::run_viewer(&mut raster, &mut rng)?;
    }

    Ok(())
}

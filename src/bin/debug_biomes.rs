//! Debug script to output the biome classification as ASCII

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};

use fantasy_map::{BiomeClassifier, BiomeIndex, MapConfig, Raster, Seeds};

const SYMBOLS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One character per palette entry: `~` water, `,` shore, then letters in
/// table order.
fn symbol(classifier: &BiomeClassifier, index: BiomeIndex) -> char {
    match index {
        BiomeIndex::Water => '~',
        BiomeIndex::Shore => ',',
        BiomeIndex::Land { band, moisture } => {
            let offset: usize = classifier.palette().bands[..band]
                .iter()
                .map(|b| b.moisture.len())
                .sum();
            SYMBOLS.get(offset + moisture).map_or('?', |&c| c as char)
        }
    }
}

fn main() -> fantasy_map::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let width = 128;
    let height = 64;
    let seeds = Seeds::default();

    let mut raster = Raster::new(MapConfig::with_size(width, height))?;
    raster.generate(seeds);
    let classifier = raster.classifier();

    let mut file = BufWriter::new(File::create("biome_debug.txt")?);

    writeln!(file, "=== BIOME DEBUG MAP ({}x{}) {} ===", width, height, seeds)?;
    writeln!(file)?;

    let mut counts: BTreeMap<char, (String, usize)> = BTreeMap::new();

    writeln!(file, "BIOME MAP:")?;
    for y in 0..height {
        let mut line = String::with_capacity(width);
        for x in 0..width {
            let index = classifier.locate(*raster.elevation().get(x, y), *raster.moisture().get(x, y));
            let ch = symbol(classifier, index);
            line.push(ch);
            counts
                .entry(ch)
                .or_insert_with(|| (classifier.name_of(index).to_string(), 0))
                .1 += 1;
        }
        writeln!(file, "{}", line)?;
    }

    writeln!(file)?;
    writeln!(file, "BIOME COUNTS:")?;
    let total = (width * height) as f64;
    for (ch, (name, count)) in &counts {
        writeln!(
            file,
            "  {} = {:<28} {:>6} ({:.1}%)",
            ch,
            name,
            count,
            100.0 * *count as f64 / total
        )?;
    }
    file.flush()?;

    log::info!("Wrote biome_debug.txt");
    Ok(())
}

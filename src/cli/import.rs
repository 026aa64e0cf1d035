use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use trackmate::import_spots;
use trackmate::storage::write_table;

use super::load_config;

/// Convert a TrackMate XML session to a spot table
pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    tracks: bool,
    config: Option<PathBuf>,
    compression_level: Option<i32>,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let config = load_config(config.as_ref())?;
    let with_tracks = tracks || config.import.tracks.unwrap_or(false);
    let storage = config.storage_config(compression_level);
    let output = output.unwrap_or_else(|| input.with_extension("parquet"));

    info!("Importing {} (track labels: {})", input.display(), with_tracks);
    let table = import_spots(&input, with_tracks)
        .with_context(|| format!("Failed to import spots from {}", input.display()))?;

    write_table(&table, &output, &storage)
        .with_context(|| format!("Failed to write spot table: {}", output.display()))?;

    info!("Conversion complete!");
    info!("  Output file: {}", output.display());
    info!("  Spots: {}", table.num_rows());
    info!("  Columns: {}", table.column_names().len());

    Ok(())
}

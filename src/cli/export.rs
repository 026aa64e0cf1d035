use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use trackmate::storage::read_table;
use trackmate::{export_spots, ExportOptions};

use super::load_config;

/// Document context given on the command line
#[derive(Debug, Default)]
pub struct Overrides {
    pub version: Option<String>,
    pub spatial_units: Option<String>,
    pub time_units: Option<String>,
}

impl Overrides {
    fn apply(self, mut options: ExportOptions) -> ExportOptions {
        if let Some(version) = self.version {
            options = options.version(version);
        }
        if let Some(units) = self.spatial_units {
            options = options.spatial_units(units);
        }
        if let Some(units) = self.time_units {
            options = options.time_units(units);
        }
        options
    }
}

/// Convert a spot table to a TrackMate XML document
pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    overrides: Overrides,
    config: Option<PathBuf>,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let config = load_config(config.as_ref())?;
    let output = output.unwrap_or_else(|| input.with_extension("xml"));

    let table = read_table(&input)
        .with_context(|| format!("Failed to read spot table: {}", input.display()))?;

    // table context < config file < command line
    let options = overrides.apply(config.apply_export(ExportOptions::from_table(&table)));
    info!(
        "Exporting {} spots as TrackMate {} ({}, {})",
        table.num_rows(),
        options.version,
        options.spatial_units,
        options.time_units
    );

    let xml = export_spots(&table, &options).context("Failed to export spots")?;
    std::fs::write(&output, xml)
        .with_context(|| format!("Failed to write XML file: {}", output.display()))?;

    info!("Conversion complete!");
    info!("  Output file: {}", output.display());

    Ok(())
}

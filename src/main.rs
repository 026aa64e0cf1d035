//! # TrackMate Converter
//!
//! A command-line tool for moving spot data between TrackMate XML sessions and
//! columnar spot tables.
//!
//! ## Usage
//!
//! ```bash
//! # XML session to a labeled Parquet spot table
//! trackmate-convert import FakeTracks.xml spots.parquet --tracks
//!
//! # Spot table back to a TrackMate document
//! trackmate-convert export spots.parquet spots.xml --spatial-units micron
//!
//! # Inspect either side
//! trackmate-convert info FakeTracks.xml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod export;
mod import;
mod info;

pub use config::Config;

/// trackmate-convert - TrackMate XML to spot table converter
#[derive(Parser)]
#[command(name = "trackmate-convert")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a TrackMate XML session to a Parquet or CSV spot table
    Import {
        /// Input TrackMate XML file
        #[arg(value_name = "XML")]
        input: PathBuf,

        /// Output table (.parquet or .csv, defaults to <input>.parquet)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Label spots by retained track instead of by row
        #[arg(long)]
        tracks: bool,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Compression level for ZSTD (1-22, default: 3)
        #[arg(short = 'c', long, hide = true)]
        compression_level: Option<i32>,
    },

    /// Convert a Parquet or CSV spot table to a TrackMate XML document
    Export {
        /// Input spot table (.parquet or .csv)
        #[arg(value_name = "TABLE")]
        input: PathBuf,

        /// Output XML file (defaults to <input>.xml)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// TrackMate version written on the root element
        #[arg(long = "version", value_name = "V")]
        trackmate_version: Option<String>,

        /// Spatial units of the model
        #[arg(long, value_name = "UNITS")]
        spatial_units: Option<String>,

        /// Time units of the model
        #[arg(long, value_name = "UNITS")]
        time_units: Option<String>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Display information about a TrackMate XML file or a spot table
    Info {
        /// Input file (.xml, .parquet or .csv)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Also read the track model of an XML session
        #[arg(long)]
        tracks: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Import {
            input,
            output,
            tracks,
            config,
            compression_level,
        } => import::run(input, output, tracks, config, compression_level),
        Commands::Export {
            input,
            output,
            trackmate_version,
            spatial_units,
            time_units,
            config,
        } => export::run(
            input,
            output,
            export::Overrides {
                version: trackmate_version,
                spatial_units,
                time_units,
            },
            config,
        ),
        Commands::Info { file, tracks, json } => info::run(file, tracks, json),
    }
}

/// Load the config file when one was given
fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

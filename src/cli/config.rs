//! TOML configuration file support.
//!
//! Settings shared across runs can live in a config file instead of flags:
//!
//! ```toml
//! # trackmate.toml
//! [import]
//! tracks = true
//!
//! [export]
//! version = "7.11.1"
//! spatial_units = "micron"
//! time_units = "sec"
//!
//! [storage]
//! compression_level = 9
//! row_group_size = 65536
//! ```
//!
//! Command-line flags take precedence over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use trackmate::storage::StorageConfig;
use trackmate::ExportOptions;

/// Root configuration structure for trackmate.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Settings for the import command.
    #[serde(default)]
    pub import: ImportConfig,

    /// Settings for the export command.
    #[serde(default)]
    pub export: ExportConfig,

    /// Spot table storage settings.
    #[serde(default)]
    pub storage: StorageSettings,
}

/// Configuration for the import command.
#[derive(Debug, Default, Deserialize)]
pub struct ImportConfig {
    /// Label spots by retained track.
    pub tracks: Option<bool>,
}

/// Document context written by the export command.
#[derive(Debug, Default, Deserialize)]
pub struct ExportConfig {
    /// TrackMate version on the root element.
    pub version: Option<String>,

    /// `Model/@spatialunits`.
    pub spatial_units: Option<String>,

    /// `Model/@timeunits`.
    pub time_units: Option<String>,
}

/// Parquet writer settings.
#[derive(Debug, Default, Deserialize)]
pub struct StorageSettings {
    /// ZSTD compression level (1-22).
    pub compression_level: Option<i32>,

    /// Number of spots per Parquet row group.
    pub row_group_size: Option<usize>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Apply the `[export]` section on top of existing options.
    pub fn apply_export(&self, mut options: ExportOptions) -> ExportOptions {
        if let Some(version) = &self.export.version {
            options = options.version(version.as_str());
        }
        if let Some(units) = &self.export.spatial_units {
            options = options.spatial_units(units.as_str());
        }
        if let Some(units) = &self.export.time_units {
            options = options.time_units(units.as_str());
        }
        options
    }

    /// Storage settings, with an optional compression level taking precedence.
    pub fn storage_config(&self, compression_level: Option<i32>) -> StorageConfig {
        let mut config = match compression_level.or(self.storage.compression_level) {
            Some(level) => StorageConfig::with_zstd_level(level),
            None => StorageConfig::default(),
        };
        if let Some(rows) = self.storage.row_group_size {
            config.row_group_size = rows;
        }
        config
    }
}

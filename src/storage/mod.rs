//! # Spot Table Storage
//!
//! Persisting spot tables outside of TrackMate XML.
//!
//! - **Parquet**: lossless, keeps the document context stored in the schema
//!   metadata (`trackmate:version`, `trackmate:spatial_units`,
//!   `trackmate:time_units`).
//! - **CSV**: one header row, one row per spot; `label` is read back as an
//!   integer column and everything else as floats.

mod config;
mod csv;
mod parquet;


use std::path::Path;

use crate::error::{Result, TrackMateError};
use crate::table::SpotTable;

pub use self::config::{CompressionType, StorageConfig};
pub use self::csv::{read_csv, write_csv};
pub use self::parquet::{read_parquet, write_parquet};

/// On-disk table formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Apache Parquet (`.parquet`)
    Parquet,
    /// Comma-separated values (`.csv`)
    Csv,
}

impl TableFormat {
    /// Detect the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("parquet") => Ok(TableFormat::Parquet),
            Some("csv") => Ok(TableFormat::Csv),
            _ => Err(TrackMateError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Write a table in the format implied by the path
pub fn write_table<P: AsRef<Path>>(table: &SpotTable, path: P, config: &StorageConfig) -> Result<()> {
    let path = path.as_ref();
    match TableFormat::from_path(path)? {
        TableFormat::Parquet => write_parquet(table, path, config),
        TableFormat::Csv => write_csv(table, path),
    }
}

/// Read a table in the format implied by the path
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<SpotTable> {
    let path = path.as_ref();
    match TableFormat::from_path(path)? {
        TableFormat::Parquet => read_parquet(path),
        TableFormat::Csv => read_csv(path),
    }
}

//! # TrackMate Conversion
//!
//! The two pipelines between TrackMate XML and spot tables.
//!
//! ## Import
//!
//! 1. Parse the document ([`crate::xml::TrackMateParser`]).
//! 2. Extract every declared spot feature plus `ID` as `Float64` columns, one
//!    row per `Spot` element in document order.
//! 3. Apply `InitialSpotFilter`, then every `SpotFilterCollection/Filter`.
//! 4. Keep the registry features in registry order, renamed to table columns.
//! 5. Label rows: by row index, or by retained track when tracks are requested.
//!
//! ## Export
//!
//! Registry columns are renamed back to their features and formatted (integral
//! features as integers, the rest as decimals), spots are grouped by `t_stamp`
//! in order of first appearance, and a default `Settings` block is appended.
//! Columns without a registry entry are dropped.
//!
//! ## Example
//!
//! ```rust,no_run
//! use trackmate::convert::{export_spots, import_spots, ExportOptions};
//!
//! let spots = import_spots("session.xml", true)?;
//! println!("{} spots", spots.num_rows());
//!
//! let xml = export_spots(&spots, &ExportOptions::from_table(&spots))?;
//! std::fs::write("roundtrip.xml", xml)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod export;
mod import;


pub use export::{
    document_from_spots, export_spots, ExportOptions, DEFAULT_SPATIAL_UNITS, DEFAULT_TIME_UNITS,
    DEFAULT_VERSION,
};
pub use import::{import_spots, import_spots_from_reader, import_spots_from_str, spots_from_document};

//! # trackmate-rs - TrackMate XML and Spot Tables
//!
//! `trackmate` converts between TrackMate tracking-session XML documents and
//! flat, columnar spot tables backed by Apache Arrow.
//!
//! ## Key Features
//!
//! - **Streaming XML parsing**: the session is read with `quick-xml` in a single
//!   pass; only the spot model, track model and spot filters are kept.
//!
//! - **Filter replay**: the `InitialSpotFilter` and `SpotFilterCollection`
//!   thresholds stored in the session are re-applied on import.
//!
//! - **Trajectory labels**: spots can be labeled by the retained track they
//!   belong to, with every untracked spot given its own label.
//!
//! - **Lossless table storage**: spot tables are written to Parquet (ZSTD, with
//!   the document context in the footer) or CSV.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trackmate::{export_spots, import_spots, ExportOptions};
//! use trackmate::storage::{write_table, StorageConfig};
//!
//! // One row per retained spot, labeled by trajectory
//! let spots = import_spots("FakeTracks.xml", true)?;
//! write_table(&spots, "spots.parquet", &StorageConfig::default())?;
//!
//! // And back again
//! let xml = export_spots(&spots, &ExportOptions::from_table(&spots))?;
//! std::fs::write("FakeTracks.roundtrip.xml", xml)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Spot Columns
//!
//! | Column | TrackMate feature |
//! |--------|-------------------|
//! | `t_stamp` | `FRAME` |
//! | `t`, `x`, `y`, `z` | `POSITION_T`, `POSITION_X`, `POSITION_Y`, `POSITION_Z` |
//! | `w` | `ESTIMATED_DIAMETER` |
//! | `q` | `QUALITY` |
//! | `spot_id` | `ID` |
//! | `*_intensity`, `contrast`, `snr` | intensity statistics |
//! | `label` | trajectory or row label (`Int64`) |
//!
//! The full mapping lives in [`registry`].
//!
//! ## Architecture
//!
//! - [`registry`]: the feature/column mapping and TrackMate feature declarations
//! - [`xml`]: document model, streaming parser and writer
//! - [`table`]: the Arrow-backed [`SpotTable`], spot filters and labeling
//! - [`convert`]: the import and export pipelines
//! - [`storage`]: Parquet and CSV persistence
//! - [`error`]: the crate error type

pub mod convert;
pub mod error;
pub mod registry;
pub mod storage;
pub mod table;
pub mod xml;

pub use convert::{export_spots, import_spots, import_spots_from_str, ExportOptions};
pub use error::{Result, TrackMateError};
pub use table::{FilterRule, SpotTable};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::convert::{export_spots, import_spots, ExportOptions};
    pub use crate::error::{Result, TrackMateError};
    pub use crate::storage::{read_table, write_table, StorageConfig};
    pub use crate::table::{DocumentInfo, FilterRule, SpotTable};
}

//! # TrackMate XML Module
//!
//! Reading and writing of TrackMate tracking-session documents.
//!
//! ## Document Structure
//!
//! ```text
//! TrackMate [version]
//! ├── Model [spatialunits, timeunits]
//! │   ├── FeatureDeclarations
//! │   │   └── SpotFeatures
//! │   │       └── Feature* [feature, name, shortname, dimension, isint]
//! │   ├── AllSpots [nspots]
//! │   │   └── SpotsInFrame* [frame]
//! │   │       └── Spot* [<feature>=value ...]
//! │   ├── AllTracks
//! │   │   └── Track* [TRACK_ID]
//! │   │       └── Edge* [SPOT_SOURCE_ID, SPOT_TARGET_ID, EDGE_TIME]
//! │   └── FilteredTracks
//! │       └── TrackID* [TRACK_ID]
//! └── Settings
//!     ├── ImageData
//!     ├── BasicSettings
//!     ├── InitialSpotFilter [feature, value, isabove]
//!     └── SpotFilterCollection
//!         └── Filter* [feature, value, isabove]
//! ```
//!
//! The parser is schema-lenient: unknown elements and attributes are skipped,
//! and only the elements needed for conversion are required.

mod models;
pub mod parser;
pub mod writer;

pub use models::*;
pub use parser::{ParseOptions, TrackMateParser};
pub use writer::{format_decimal, format_integer, to_xml_string, write_document};

use std::collections::{HashMap, HashSet};

use arrow::array::{Array, Float64Array};
use log::{debug, info};

use crate::error::{Result, TrackMateError};
use crate::registry::{self, columns, features};
use crate::table::{FilterRule, SpotTable};
use crate::xml::{
    format_decimal, format_integer, to_xml_string, FeatureDeclaration, Spot, SpotsInFrame,
    TrackMateDocument,
};

/// Default TrackMate version written to exported documents
pub const DEFAULT_VERSION: &str = "3.7.0";
/// Default spatial units
pub const DEFAULT_SPATIAL_UNITS: &str = "pixel";
/// Default time units
pub const DEFAULT_TIME_UNITS: &str = "sec";

/// Document-level settings for export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Value of the root `version` attribute
    pub version: String,
    /// `Model/@spatialunits`
    pub spatial_units: String,
    /// `Model/@timeunits`
    pub time_units: String,
    /// Attributes written on `Settings/ImageData`
    pub image_data: Vec<(String, String)>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            spatial_units: DEFAULT_SPATIAL_UNITS.to_string(),
            time_units: DEFAULT_TIME_UNITS.to_string(),
            image_data: Vec::new(),
        }
    }
}

impl ExportOptions {
    /// Defaults, overridden by any document context the table carries
    pub fn from_table(table: &SpotTable) -> Self {
        let info = table.document_info();
        let defaults = Self::default();
        Self {
            version: info.version.unwrap_or(defaults.version),
            spatial_units: info.spatial_units.unwrap_or(defaults.spatial_units),
            time_units: info.time_units.unwrap_or(defaults.time_units),
            image_data: defaults.image_data,
        }
    }

    /// Set the version string
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the spatial units
    pub fn spatial_units(mut self, units: impl Into<String>) -> Self {
        self.spatial_units = units.into();
        self
    }

    /// Set the time units
    pub fn time_units(mut self, units: impl Into<String>) -> Self {
        self.time_units = units.into();
        self
    }

    /// Add an `ImageData` attribute
    pub fn image_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.image_data.push((key.into(), value.into()));
        self
    }
}

/// Serialize a spot table to TrackMate XML text
pub fn export_spots(table: &SpotTable, options: &ExportOptions) -> Result<String> {
    let doc = document_from_spots(table, options)?;
    to_xml_string(&doc)
}

/// Build the TrackMate document for a spot table
pub fn document_from_spots(table: &SpotTable, options: &ExportOptions) -> Result<TrackMateDocument> {
    if !table.has_column(columns::LABEL) {
        return Err(TrackMateError::MissingColumn(columns::LABEL.to_string()));
    }
    let spot_ids = table.float_column(columns::SPOT_ID)?;
    let frames = table.float_column(columns::T_STAMP)?;

    let mut mapped: Vec<(&'static str, Float64Array)> = Vec::new();
    let mut seen = HashSet::new();
    for name in table.column_names() {
        if name == columns::SPOT_ID || name == columns::LABEL || !seen.insert(name.clone()) {
            continue;
        }
        match registry::feature_for_column(&name) {
            Some(feature) => mapped.push((feature, table.float_column(&name)?)),
            None => debug!("{}; column dropped", TrackMateError::UnknownFeature(name)),
        }
    }

    let spot_features = mapped
        .iter()
        .filter_map(|(feature, _)| registry::feature_properties(feature))
        .map(|p| FeatureDeclaration {
            feature: p.feature.to_string(),
            name: p.name.to_string(),
            shortname: p.shortname.to_string(),
            dimension: p.dimension.as_str().to_string(),
            isint: p.isint,
        })
        .collect();

    let mut spot_frames = Vec::new();
    for (frame, rows) in group_rows_by_frame(&frames) {
        let frame = format_integer(frame).ok_or_else(|| invalid(columns::T_STAMP, frame))?;
        let spots = rows
            .into_iter()
            .map(|row| spot_element(row, &mapped, &spot_ids))
            .collect::<Result<Vec<_>>>()?;
        spot_frames.push(SpotsInFrame {
            frame,
            spots,
        });
    }

    info!(
        "Exporting {} spots in {} frames with {} features",
        table.num_rows(),
        spot_frames.len(),
        mapped.len()
    );

    Ok(TrackMateDocument {
        version: Some(options.version.clone()),
        spatial_units: Some(options.spatial_units.clone()),
        time_units: Some(options.time_units.clone()),
        spot_features,
        frames: spot_frames,
        tracks: Some(Vec::new()),
        filtered_track_ids: Some(Vec::new()),
        image_data: options.image_data.clone(),
        initial_filter: Some(FilterRule::new(features::QUALITY, 0.0, true)),
        spot_filters: Vec::new(),
    })
}

/// Row indices grouped by the integral frame written for them, groups in order
/// of first appearance
fn group_rows_by_frame(frames: &Float64Array) -> Vec<(f64, Vec<usize>)> {
    let mut groups: Vec<(f64, Vec<usize>)> = Vec::new();
    let mut index: HashMap<u64, usize> = HashMap::new();

    for row in 0..frames.len() {
        let frame = value_at(frames, row);
        let whole = frame.trunc();
        // 0.0 and -0.0 share a group
        let key = if whole == 0.0 { 0 } else { whole.to_bits() };
        match index.get(&key) {
            Some(&group) => groups[group].1.push(row),
            None => {
                index.insert(key, groups.len());
                groups.push((frame, vec![row]));
            }
        }
    }

    groups
}

fn spot_element(
    row: usize,
    mapped: &[(&'static str, Float64Array)],
    spot_ids: &Float64Array,
) -> Result<Spot> {
    let mut attributes = Vec::with_capacity(mapped.len() + 1);

    for (feature, values) in mapped {
        let value = value_at(values, row);
        let text = if registry::is_integral(feature) {
            format_integer(value).ok_or_else(|| invalid(feature, value))?
        } else {
            format_decimal(value)
        };
        attributes.push((feature.to_string(), text));
    }

    let id = value_at(spot_ids, row);
    let id = format_integer(id).ok_or_else(|| invalid(columns::SPOT_ID, id))?;
    attributes.push((features::ID.to_string(), id));

    Ok(Spot { attributes })
}

/// Cell value with nulls read as NaN
fn value_at(values: &Float64Array, row: usize) -> f64 {
    if values.is_null(row) {
        f64::NAN
    } else {
        values.value(row)
    }
}

fn invalid(column: &str, value: f64) -> TrackMateError {
    TrackMateError::InvalidFeatureValue {
        column: column.to_string(),
        value: format_decimal(value),
    }
}

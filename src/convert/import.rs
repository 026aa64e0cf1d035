use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::{debug, info};

use crate::error::{Result, TrackMateError};
use crate::registry::{self, columns, features};
use crate::table::{
    apply_filters, float_column, sequential_labels, track_labels, DocumentInfo, SpotTable,
};
use crate::xml::{TrackMateDocument, TrackMateParser};

/// Import the spots of a TrackMate XML file.
///
/// With `with_tracks`, rows are labeled by trajectory; otherwise `label` is the
/// row index.
pub fn import_spots<P: AsRef<Path>>(path: P, with_tracks: bool) -> Result<SpotTable> {
    let path = path.as_ref();
    info!("Importing TrackMate spots from {}", path.display());
    let file = File::open(path)?;
    import_spots_from_reader(BufReader::new(file), with_tracks)
}

/// Import spots from any buffered XML source
pub fn import_spots_from_reader<R: BufRead>(reader: R, with_tracks: bool) -> Result<SpotTable> {
    let doc = TrackMateParser::new(reader).with_tracks(with_tracks).parse()?;
    spots_from_document(&doc, with_tracks)
}

/// Import spots from an in-memory XML document
pub fn import_spots_from_str(xml: &str, with_tracks: bool) -> Result<SpotTable> {
    import_spots_from_reader(xml.as_bytes(), with_tracks)
}

/// Build the spot table from an already parsed document
pub fn spots_from_document(doc: &TrackMateDocument, with_tracks: bool) -> Result<SpotTable> {
    let feature_names = extracted_features(doc);
    let batch = raw_feature_batch(doc, &feature_names)?;
    info!(
        "Read {} spots in {} frames ({} features)",
        batch.num_rows(),
        doc.frames.len(),
        feature_names.len()
    );

    let rules: Vec<_> = doc
        .initial_filter
        .iter()
        .chain(doc.spot_filters.iter())
        .collect();
    for rule in &rules {
        if batch.column_by_name(&rule.feature).is_none() {
            return Err(TrackMateError::MalformedDocument(format!(
                "spot filter on undeclared feature {}",
                rule.feature
            )));
        }
    }
    let batch = apply_filters(batch, rules.iter().copied())?;
    info!("{} spots remain after {} filters", batch.num_rows(), rules.len());

    let info = DocumentInfo {
        version: doc.version.clone(),
        spatial_units: doc.spatial_units.clone(),
        time_units: doc.time_units.clone(),
    };
    let table = project_to_registry(&batch, &info)?;

    let labels = if with_tracks {
        let tracks = doc.tracks.as_deref().ok_or_else(|| {
            TrackMateError::MalformedDocument("missing required element Model/AllTracks".into())
        })?;
        let retained = doc.filtered_track_ids.as_deref().ok_or_else(|| {
            TrackMateError::MalformedDocument(
                "missing required element Model/FilteredTracks".into(),
            )
        })?;
        let spot_ids = table.float_column(columns::SPOT_ID)?;
        track_labels(&spot_ids, tracks, retained)
    } else {
        sequential_labels(table.num_rows())
    };

    table.with_labels(labels)
}

/// Declared spot features followed by the implicit identifier, without repeats
fn extracted_features(doc: &TrackMateDocument) -> Vec<String> {
    let mut seen = HashSet::new();
    doc.feature_names()
        .chain(std::iter::once(features::ID))
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// One `Float64` column per extracted feature, one row per spot element
fn raw_feature_batch(doc: &TrackMateDocument, feature_names: &[String]) -> Result<RecordBatch> {
    let index: HashMap<&str, usize> = feature_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let spot_count = doc.spot_count();
    let mut builders: Vec<Float64Builder> = feature_names
        .iter()
        .map(|_| Float64Builder::with_capacity(spot_count))
        .collect();
    let mut cells: Vec<Option<&str>> = vec![None; feature_names.len()];

    for spot in doc.spots() {
        cells.iter_mut().for_each(|c| *c = None);
        for (key, value) in &spot.attributes {
            if let Some(&i) = index.get(key.as_str()) {
                cells[i] = Some(value.as_str());
            }
        }

        for (i, cell) in cells.iter().enumerate() {
            let value = match cell {
                Some(text) => parse_cell(&feature_names[i], text)?,
                // Declared but not computed for this spot
                None => f64::NAN,
            };
            builders[i].append_value(value);
        }
    }

    let fields: Vec<Field> = feature_names
        .iter()
        .map(|name| Field::new(name, DataType::Float64, false))
        .collect();
    let arrays: Vec<ArrayRef> = builders
        .iter_mut()
        .map(|b| Arc::new(b.finish()) as ArrayRef)
        .collect();

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}

fn parse_cell(feature: &str, text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| TrackMateError::InvalidFeatureValue {
            column: feature.to_string(),
            value: text.to_string(),
        })
}

/// Keep the registry features in registry order, renamed to table columns
fn project_to_registry(batch: &RecordBatch, info: &DocumentInfo) -> Result<SpotTable> {
    let mut fields = Vec::with_capacity(registry::SPOT_FIELDS.len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(registry::SPOT_FIELDS.len());

    for field in registry::spot_fields() {
        if batch.column_by_name(field.feature).is_none() {
            return Err(TrackMateError::MalformedDocument(format!(
                "spot feature {} is not declared",
                field.feature
            )));
        }
        let values = float_column(batch, field.feature)?;
        debug!("Column {} <- {}", field.column, field.feature);
        fields.push(Field::new(field.column, DataType::Float64, false));
        arrays.push(Arc::new(values));
    }

    let schema = Schema::new(fields).with_metadata(info.to_metadata());
    let batch = RecordBatch::try_new(Arc::new(schema), arrays)?;
    Ok(SpotTable::new(batch))
}

//! # Spot Table
//!
//! Column-oriented table of detected spots backed by an Arrow [`RecordBatch`].
//!
//! Feature columns are `Float64`; the derived `label` column is `Int64`.
//! Row order is the document order of the spots the table was built from.
//! Document context (version, units) travels in the schema metadata so that it
//! survives a trip through Parquet and can seed export defaults.

mod filter;
mod labels;


use std::collections::HashMap;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Float64Type, Int64Type, Schema};
use arrow::record_batch::RecordBatch;

use crate::error::{Result, TrackMateError};
use crate::registry::columns;

pub use filter::{apply_filters, FilterRule};
pub use labels::{sequential_labels, track_labels};

/// Schema metadata key for the TrackMate version
pub const METADATA_VERSION: &str = "trackmate:version";
/// Schema metadata key for the spatial units
pub const METADATA_SPATIAL_UNITS: &str = "trackmate:spatial_units";
/// Schema metadata key for the time units
pub const METADATA_TIME_UNITS: &str = "trackmate:time_units";

/// Document-level context carried alongside a spot table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    /// TrackMate version that wrote the source document
    pub version: Option<String>,
    /// Spatial units of position and length features
    pub spatial_units: Option<String>,
    /// Time units of time features
    pub time_units: Option<String>,
}

impl DocumentInfo {
    /// Encode as Arrow schema metadata
    pub fn to_metadata(&self) -> HashMap<String, String> {
        let mut metadata = HashMap::new();
        let entries = [
            (METADATA_VERSION, &self.version),
            (METADATA_SPATIAL_UNITS, &self.spatial_units),
            (METADATA_TIME_UNITS, &self.time_units),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                metadata.insert(key.to_string(), value.clone());
            }
        }
        metadata
    }

    /// Decode from Arrow schema metadata, ignoring unrelated keys
    pub fn from_metadata(metadata: &HashMap<String, String>) -> Self {
        Self {
            version: metadata.get(METADATA_VERSION).cloned(),
            spatial_units: metadata.get(METADATA_SPATIAL_UNITS).cloned(),
            time_units: metadata.get(METADATA_TIME_UNITS).cloned(),
        }
    }
}

/// A table of spots, one row per spot
#[derive(Debug, Clone, PartialEq)]
pub struct SpotTable {
    batch: RecordBatch,
}

impl SpotTable {
    /// Wrap an existing record batch
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    /// Build a table from named columns
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ArrayRef)>,
        S: AsRef<str>,
    {
        Ok(Self::new(RecordBatch::try_from_iter(columns)?))
    }

    /// Build a table of `Float64` feature columns plus an `Int64` label column
    pub fn from_features<S: AsRef<str>>(
        features: Vec<(S, Vec<f64>)>,
        labels: Vec<i64>,
    ) -> Result<Self> {
        let mut columns: Vec<(String, ArrayRef)> = features
            .into_iter()
            .map(|(name, values)| {
                (
                    name.as_ref().to_string(),
                    Arc::new(Float64Array::from(values)) as ArrayRef,
                )
            })
            .collect();
        columns.push((
            columns::LABEL.to_string(),
            Arc::new(Int64Array::from(labels)) as ArrayRef,
        ));
        Self::from_columns(columns)
    }

    /// Underlying record batch
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Consume the table, returning the record batch
    pub fn into_batch(self) -> RecordBatch {
        self.batch
    }

    /// Number of spots
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    /// Whether a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.batch.column_by_name(name).is_some()
    }

    /// A numeric column converted to `Float64`
    pub fn float_column(&self, name: &str) -> Result<Float64Array> {
        float_column(&self.batch, name)
    }

    /// The `label` column converted to `Int64`
    pub fn labels(&self) -> Result<Int64Array> {
        let column = required_column(&self.batch, columns::LABEL)?;
        if !column.data_type().is_numeric() {
            return Err(non_numeric(columns::LABEL, column.data_type()));
        }
        let cast = arrow::compute::cast(column, &DataType::Int64)?;
        Ok(cast.as_primitive::<Int64Type>().clone())
    }

    /// Document context stored in the schema metadata
    pub fn document_info(&self) -> DocumentInfo {
        DocumentInfo::from_metadata(self.batch.schema().metadata())
    }

    /// Replace the document context stored in the schema metadata
    pub fn with_document_info(self, info: &DocumentInfo) -> Result<Self> {
        let mut metadata = self.batch.schema().metadata().clone();
        metadata.retain(|k, _| !k.starts_with("trackmate:"));
        metadata.extend(info.to_metadata());

        let schema = Schema::new(self.batch.schema().fields().clone()).with_metadata(metadata);
        let batch = RecordBatch::try_new(Arc::new(schema), self.batch.columns().to_vec())?;
        Ok(Self::new(batch))
    }

    /// Replace (or append) the `label` column
    pub fn with_labels(self, labels: Int64Array) -> Result<Self> {
        let schema = self.batch.schema();
        let mut fields: Vec<Arc<Field>> = Vec::with_capacity(schema.fields().len() + 1);
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len() + 1);

        for (field, array) in schema.fields().iter().zip(self.batch.columns()) {
            if field.name() != columns::LABEL {
                fields.push(field.clone());
                arrays.push(array.clone());
            }
        }
        fields.push(Arc::new(Field::new(columns::LABEL, DataType::Int64, false)));
        arrays.push(Arc::new(labels));

        let schema = Schema::new(fields).with_metadata(schema.metadata().clone());
        let batch = RecordBatch::try_new(Arc::new(schema), arrays)?;
        Ok(Self::new(batch))
    }

    /// Keep only the rows accepted by a filter rule
    pub fn filter(&self, rule: &FilterRule) -> Result<Self> {
        Ok(Self::new(rule.apply(&self.batch)?))
    }
}

impl From<RecordBatch> for SpotTable {
    fn from(batch: RecordBatch) -> Self {
        Self::new(batch)
    }
}

/// Look up a column, failing with `MissingColumn`
pub(crate) fn required_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| TrackMateError::MissingColumn(name.to_string()))
}

/// A numeric column of any width converted to `Float64`
pub(crate) fn float_column(batch: &RecordBatch, name: &str) -> Result<Float64Array> {
    let column = required_column(batch, name)?;
    if let Some(values) = column.as_any().downcast_ref::<Float64Array>() {
        return Ok(values.clone());
    }
    if !column.data_type().is_numeric() {
        return Err(non_numeric(name, column.data_type()));
    }
    let cast = arrow::compute::cast(column, &DataType::Float64)?;
    Ok(cast.as_primitive::<Float64Type>().clone())
}

fn non_numeric(name: &str, data_type: &DataType) -> TrackMateError {
    TrackMateError::InvalidFeatureValue {
        column: name.to_string(),
        value: format!("<{} column>", data_type),
    }
}

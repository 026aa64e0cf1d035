use arrow::array::{BooleanArray, Float64Array};
use arrow::compute::filter_record_batch;
use arrow::record_batch::RecordBatch;
use log::debug;

use super::float_column;
use crate::error::Result;

/// Threshold predicate over one feature
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRule {
    /// Column the rule reads
    pub feature: String,
    /// Threshold
    pub value: f64,
    /// Keep values strictly above the threshold, otherwise strictly below
    pub is_above: bool,
}

impl FilterRule {
    /// Create a new filter rule
    pub fn new(feature: impl Into<String>, value: f64, is_above: bool) -> Self {
        Self {
            feature: feature.into(),
            value,
            is_above,
        }
    }

    /// Whether a single value passes. NaN never passes.
    pub fn accepts(&self, value: f64) -> bool {
        if self.is_above {
            value > self.value
        } else {
            value < self.value
        }
    }

    /// Selection mask over a column; nulls are rejected
    pub fn mask(&self, values: &Float64Array) -> BooleanArray {
        values
            .iter()
            .map(|v| Some(v.map_or(false, |v| self.accepts(v))))
            .collect()
    }

    /// Keep only the rows whose `feature` column passes
    pub fn apply(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let values = float_column(batch, &self.feature)?;
        let filtered = filter_record_batch(batch, &self.mask(&values))?;
        debug!(
            "Filter {} {} {}: {} -> {} rows",
            self.feature,
            if self.is_above { ">" } else { "<" },
            self.value,
            batch.num_rows(),
            filtered.num_rows()
        );
        Ok(filtered)
    }
}

/// Apply rules one after another; each sees only the rows the previous ones kept
pub fn apply_filters<'a, I>(batch: RecordBatch, rules: I) -> Result<RecordBatch>
where
    I: IntoIterator<Item = &'a FilterRule>,
{
    rules
        .into_iter()
        .try_fold(batch, |batch, rule| rule.apply(&batch))
}

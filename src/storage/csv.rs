use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array};
use log::info;

use crate::error::{Result, TrackMateError};
use crate::registry::columns;
use crate::table::SpotTable;

/// Write a spot table as CSV with a header row
pub fn write_csv<P: AsRef<Path>>(table: &SpotTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let names = table.column_names();

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(names.len());
    for name in &names {
        let column = if name == columns::LABEL {
            integer_cells(&table.labels()?)
        } else {
            float_cells(&table.float_column(name)?)
        };
        cells.push(column);
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&names)?;
    for row in 0..table.num_rows() {
        writer.write_record(cells.iter().map(|c| c[row].as_str()))?;
    }
    writer.flush()?;

    info!("Wrote {} spots to {}", table.num_rows(), path.display());
    Ok(())
}

fn float_cells(values: &Float64Array) -> Vec<String> {
    values
        .iter()
        .map(|v| v.map(|v| v.to_string()).unwrap_or_default())
        .collect()
}

fn integer_cells(values: &Int64Array) -> Vec<String> {
    values
        .iter()
        .map(|v| v.map(|v| v.to_string()).unwrap_or_default())
        .collect()
}

/// Read a spot table from CSV; `label` becomes Int64, every other column Float64
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<SpotTable> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;
    let names: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut values: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    for record in reader.records() {
        let record = record?;
        for (i, field) in record.iter().enumerate().take(names.len()) {
            values[i].push(field.to_string());
        }
    }

    let mut arrays: Vec<(String, ArrayRef)> = Vec::with_capacity(names.len());
    for (name, cells) in names.into_iter().zip(values) {
        let array: ArrayRef = if name == columns::LABEL {
            Arc::new(parse_column::<i64>(&name, &cells)?.into_iter().collect::<Int64Array>())
        } else {
            Arc::new(parse_column::<f64>(&name, &cells)?.into_iter().collect::<Float64Array>())
        };
        arrays.push((name, array));
    }

    let table = SpotTable::from_columns(arrays)?;
    info!("Read {} spots from {}", table.num_rows(), path.display());
    Ok(table)
}

/// Parse a column of cells; empty cells become nulls
fn parse_column<T: std::str::FromStr>(name: &str, cells: &[String]) -> Result<Vec<Option<T>>> {
    cells
        .iter()
        .map(|cell| {
            let cell = cell.trim();
            if cell.is_empty() {
                return Ok(None);
            }
            cell.parse::<T>()
                .map(Some)
                .map_err(|_| TrackMateError::InvalidFeatureValue {
                    column: name.to_string(),
                    value: cell.to_string(),
                })
        })
        .collect()
}

use std::fs::File;
use std::path::Path;

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use log::info;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;

use super::StorageConfig;
use crate::error::Result;
use crate::table::SpotTable;

/// Write a spot table to a Parquet file
pub fn write_parquet<P: AsRef<Path>>(
    table: &SpotTable,
    path: P,
    config: &StorageConfig,
) -> Result<()> {
    let path = path.as_ref();
    let batch = table.batch();
    let schema = batch.schema();
    let props = config.to_writer_properties(schema.metadata());

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    info!("Wrote {} spots to {}", table.num_rows(), path.display());
    Ok(())
}

/// Read a spot table from a Parquet file
pub fn read_parquet<P: AsRef<Path>>(path: P) -> Result<SpotTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let batches = reader.collect::<std::result::Result<Vec<RecordBatch>, _>>()?;
    let batch = concat_batches(&schema, &batches)?;

    info!("Read {} spots from {}", batch.num_rows(), path.display());
    Ok(SpotTable::new(batch))
}

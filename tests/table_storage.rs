//! Spot tables written to and read back from disk

use std::fs::File;
use std::path::PathBuf;

use arrow::datatypes::DataType;
use parquet::file::reader::{FileReader, SerializedFileReader};
use tempfile::tempdir;
use trackmate::registry::columns;
use trackmate::storage::{read_table, write_table, CompressionType, StorageConfig};
use trackmate::{export_spots, import_spots, ExportOptions, SpotTable, TrackMateError};

fn tracked_spots() -> SpotTable {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("tracked_session.xml");
    import_spots(path, true).unwrap()
}

fn assert_same_table(a: &SpotTable, b: &SpotTable) {
    assert_eq!(a.column_names(), b.column_names());
    assert_eq!(a.num_rows(), b.num_rows());
    assert_eq!(a.labels().unwrap(), b.labels().unwrap());
    for name in a.column_names() {
        if name == columns::LABEL {
            continue;
        }
        assert_eq!(
            a.float_column(&name).unwrap().values().to_vec(),
            b.float_column(&name).unwrap().values().to_vec(),
            "column {}",
            name
        );
    }
}

#[test]
fn test_parquet_keeps_document_context() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("spots.parquet");
    let spots = tracked_spots();

    write_table(&spots, &path, &StorageConfig::with_zstd_level(9)).unwrap();

    // Context lands in the footer as plain key/value pairs
    let reader = SerializedFileReader::new(File::open(&path).unwrap()).unwrap();
    let file_metadata = reader.metadata().file_metadata();
    assert_eq!(file_metadata.num_rows(), 7);
    let kv = file_metadata.key_value_metadata().unwrap();
    assert!(kv
        .iter()
        .any(|e| e.key == "trackmate:version" && e.value.as_deref() == Some("7.11.1")));

    let read = read_table(&path).unwrap();
    assert_same_table(&spots, &read);
    assert_eq!(read.document_info(), spots.document_info());
}

#[test]
fn test_parquet_table_exports_like_the_original() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("spots.parquet");
    let spots = tracked_spots();

    let config = StorageConfig {
        compression: CompressionType::Snappy,
        row_group_size: 3,
        ..StorageConfig::default()
    };
    write_table(&spots, &path, &config).unwrap();
    let read = read_table(&path).unwrap();

    let direct = export_spots(&spots, &ExportOptions::from_table(&spots)).unwrap();
    let stored = export_spots(&read, &ExportOptions::from_table(&read)).unwrap();
    assert_eq!(direct, stored);
}

#[test]
fn test_csv_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("spots.csv");
    let spots = tracked_spots();

    write_table(&spots, &path, &StorageConfig::default()).unwrap();
    let read = read_table(&path).unwrap();

    assert_same_table(&spots, &read);
    let schema = read.batch().schema();
    assert_eq!(schema.field_with_name("label").unwrap().data_type(), &DataType::Int64);
    assert_eq!(schema.field_with_name("x").unwrap().data_type(), &DataType::Float64);
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let err = write_table(&tracked_spots(), dir.path().join("spots.json"), &StorageConfig::default())
        .unwrap_err();
    assert!(matches!(err, TrackMateError::UnsupportedFormat(_)));

    let err = read_table(dir.path().join("spots.tsv")).unwrap_err();
    assert!(matches!(err, TrackMateError::UnsupportedFormat(_)));
}

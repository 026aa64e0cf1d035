//! Integration tests for trackmate-rs
//!
//! These tests run the import and export pipelines against TrackMate session
//! files on disk.

use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;
use trackmate::convert::import_spots_from_reader;
use trackmate::registry::columns;
use trackmate::xml::TrackMateParser;
use trackmate::{export_spots, import_spots, ExportOptions, TrackMateError};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// A single-frame session with twelve detections and no links
#[test]
fn test_import_fake_tracks() {
    let spots = import_spots(fixture("FakeTracks.xml"), false).unwrap();

    assert_eq!(spots.num_rows(), 12);
    assert_eq!(spots.column_names().len(), 17);
    assert_eq!(spots.column_names()[0], columns::T_STAMP);
    assert_eq!(spots.column_names()[16], columns::LABEL);

    let ids = spots.float_column(columns::SPOT_ID).unwrap();
    assert_eq!(
        ids.values().to_vec(),
        vec![35.0, 17.0, 4.0, 22.0, 8.0, 41.0, 13.0, 10.0, 29.0, 3.0, 50.0, 26.0]
    );
    assert!(spots
        .float_column(columns::T_STAMP)
        .unwrap()
        .values()
        .iter()
        .all(|f| *f == 0.0));
    assert_eq!(
        spots.float_column(columns::W).unwrap().value(0),
        2.0000000141168894
    );
    assert_eq!(
        spots.labels().unwrap().values().to_vec(),
        (0..12).collect::<Vec<i64>>()
    );

    let info = spots.document_info();
    assert_eq!(info.version.as_deref(), Some("3.7.0"));
    assert_eq!(info.spatial_units.as_deref(), Some("pixel"));
    assert_eq!(info.time_units.as_deref(), Some("sec"));
}

/// An empty track model leaves every spot as its own trajectory
#[test]
fn test_import_fake_tracks_with_empty_track_model() {
    let spots = import_spots(fixture("FakeTracks.xml"), true).unwrap();
    assert_eq!(
        spots.labels().unwrap().values().to_vec(),
        (0..12).collect::<Vec<i64>>()
    );
}

#[test]
fn test_import_tracked_session_replays_filters() {
    let spots = import_spots(fixture("tracked_session.xml"), false).unwrap();

    // QUALITY > 5 drops spot 102, QUALITY < 18 drops spot 108
    let ids = spots.float_column(columns::SPOT_ID).unwrap();
    assert_eq!(
        ids.values().to_vec(),
        vec![100.0, 101.0, 103.0, 104.0, 105.0, 106.0, 107.0]
    );
    let frames = spots.float_column(columns::T_STAMP).unwrap();
    assert_eq!(frames.values().to_vec(), vec![0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0]);
    assert_eq!(
        spots.labels().unwrap().values().to_vec(),
        vec![0, 1, 2, 3, 4, 5, 6]
    );
    assert_eq!(spots.document_info().spatial_units.as_deref(), Some("micron"));
}

#[test]
fn test_import_tracked_session_labels_trajectories() {
    let spots = import_spots(fixture("tracked_session.xml"), true).unwrap();

    // Tracks 0 and 1 are retained; spot 105 only sits on the dropped track 2
    assert_eq!(
        spots.labels().unwrap().values().to_vec(),
        vec![0, 1, 0, 1, 2, 0, 1]
    );
}

#[test]
fn test_parse_tracked_session_document() {
    let file = fs::File::open(fixture("tracked_session.xml")).unwrap();
    let doc = TrackMateParser::new(std::io::BufReader::new(file))
        .with_tracks(true)
        .parse()
        .unwrap();

    assert_eq!(doc.frames.len(), 3);
    assert_eq!(doc.spot_count(), 9);
    assert_eq!(doc.spot_features.len(), 18);
    assert_eq!(doc.tracks.as_ref().map(Vec::len), Some(3));
    assert_eq!(doc.filtered_track_ids, Some(vec![0, 1]));
    assert_eq!(doc.spot_filters.len(), 1);
    let initial = doc.initial_filter.as_ref().unwrap();
    assert_eq!(initial.feature, "QUALITY");
    assert_eq!(initial.value, 5.0);
    assert!(initial.is_above);
}

#[test]
fn test_import_missing_file() {
    let err = import_spots(fixture("does_not_exist.xml"), false).unwrap_err();
    assert!(matches!(err, TrackMateError::IoError(_)));
}

#[test]
fn test_import_truncated_file() {
    let xml = fs::read_to_string(fixture("tracked_session.xml")).unwrap();
    let truncated = &xml[..xml.find("</AllSpots>").unwrap()];

    let err = import_spots_from_reader(truncated.as_bytes(), false).unwrap_err();
    assert!(matches!(err, TrackMateError::MalformedDocument(_)));
}

/// Export to a file and import it again
#[test]
fn test_export_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Tracks.xml");

    let spots = import_spots(fixture("tracked_session.xml"), true).unwrap();
    let xml = export_spots(&spots, &ExportOptions::from_table(&spots)).unwrap();
    assert!(xml.contains("Spot"));
    assert!(xml.contains("<TrackMate version=\"7.11.1\">"));
    assert!(xml.contains("<Model spatialunits=\"micron\" timeunits=\"sec\">"));
    assert_eq!(xml.matches("<SpotsInFrame ").count(), 3);
    fs::write(&path, xml).unwrap();

    let reimported = import_spots(&path, false).unwrap();
    assert_eq!(reimported.column_names(), spots.column_names());
    assert_eq!(reimported.num_rows(), spots.num_rows());
    for name in spots.column_names() {
        if name == columns::LABEL {
            continue;
        }
        let before = spots.float_column(&name).unwrap();
        let after = reimported.float_column(&name).unwrap();
        assert_eq!(before.values().to_vec(), after.values().to_vec(), "column {}", name);
    }
}

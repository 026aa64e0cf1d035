use super::*;

const SMALL_SESSION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TrackMate version="7.11.1">
  <Model spatialunits="micron" timeunits="sec">
    <FeatureDeclarations>
      <SpotFeatures>
        <Feature feature="QUALITY" name="Quality" shortname="Quality" dimension="QUALITY" isint="false" />
        <Feature feature="FRAME" name="Frame" shortname="Frame" dimension="NONE" isint="true" />
      </SpotFeatures>
      <EdgeFeatures />
    </FeatureDeclarations>
    <AllSpots nspots="3">
      <SpotsInFrame frame="0">
        <Spot ID="1" name="ID1" QUALITY="3.5" FRAME="0" />
        <Spot ID="2" name="A &amp; B" QUALITY="7.25" FRAME="0" />
      </SpotsInFrame>
      <SpotsInFrame frame="1">
        <Spot ID="3" QUALITY="1.0" FRAME="1">roi text</Spot>
      </SpotsInFrame>
    </AllSpots>
    <AllTracks>
      <Track name="Track_0" TRACK_ID="0">
        <Edge SPOT_SOURCE_ID="1" SPOT_TARGET_ID="3" EDGE_TIME="0.5" />
      </Track>
    </AllTracks>
    <FilteredTracks>
      <TrackID TRACK_ID="0" />
    </FilteredTracks>
  </Model>
  <Settings>
    <ImageData filename="movie.tif" width="128" />
    <BasicSettings />
    <InitialSpotFilter feature="QUALITY" value="0.5" isabove="true" />
    <SpotFilterCollection>
      <Filter feature="QUALITY" value="10.0" isabove="false" />
    </SpotFilterCollection>
  </Settings>
</TrackMate>
"#;

#[test]
fn test_parse_document_header_and_features() {
    let doc = TrackMateParser::from_str(SMALL_SESSION).parse().unwrap();

    assert_eq!(doc.version.as_deref(), Some("7.11.1"));
    assert_eq!(doc.spatial_units.as_deref(), Some("micron"));
    assert_eq!(doc.time_units.as_deref(), Some("sec"));
    assert_eq!(doc.feature_names().collect::<Vec<_>>(), vec!["QUALITY", "FRAME"]);
    assert!(doc.spot_features[1].isint);
    assert!(!doc.spot_features[0].isint);
}

#[test]
fn test_parse_spots_in_document_order() {
    let doc = TrackMateParser::from_str(SMALL_SESSION).parse().unwrap();

    assert_eq!(doc.frames.len(), 2);
    assert_eq!(doc.frames[0].frame, "0");
    assert_eq!(doc.spot_count(), 3);

    let ids: Vec<_> = doc.spots().map(|s| s.get("ID").unwrap()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    // Entities are unescaped
    assert_eq!(doc.frames[0].spots[1].get("name"), Some("A & B"));
}

#[test]
fn test_parse_settings() {
    let doc = TrackMateParser::from_str(SMALL_SESSION).parse().unwrap();

    let initial = doc.initial_filter.clone().unwrap();
    assert_eq!(initial.feature, "QUALITY");
    assert_eq!(initial.value, 0.5);
    assert!(initial.is_above);

    assert_eq!(doc.spot_filters.len(), 1);
    assert!(!doc.spot_filters[0].is_above);
    assert_eq!(
        doc.image_data,
        vec![
            ("filename".to_string(), "movie.tif".to_string()),
            ("width".to_string(), "128".to_string())
        ]
    );
}

#[test]
fn test_tracks_skipped_unless_requested() {
    let doc = TrackMateParser::from_str(SMALL_SESSION).parse().unwrap();
    assert!(doc.tracks.is_none());
    assert!(doc.filtered_track_ids.is_none());

    let doc = TrackMateParser::from_str(SMALL_SESSION)
        .with_tracks(true)
        .parse()
        .unwrap();
    let tracks = doc.tracks.unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].id, 0);
    assert_eq!(tracks[0].edges[0].time, Some(0.5));
    assert_eq!(tracks[0].spot_ids().collect::<Vec<_>>(), vec![1.0, 3.0]);
    assert_eq!(doc.filtered_track_ids, Some(vec![0]));
}

#[test]
fn test_missing_required_elements() {
    let no_settings = SMALL_SESSION.replace("<Settings>", "<Other>").replace("</Settings>", "</Other>");
    let err = TrackMateParser::from_str(&no_settings).parse().unwrap_err();
    assert!(matches!(err, TrackMateError::MalformedDocument(ref m) if m.contains("Settings")));

    let no_spots = SMALL_SESSION
        .replace("<AllSpots nspots=\"3\">", "<Spots>")
        .replace("</AllSpots>", "</Spots>");
    let err = TrackMateParser::from_str(&no_spots).parse().unwrap_err();
    assert!(matches!(err, TrackMateError::MalformedDocument(ref m) if m.contains("AllSpots")));
}

#[test]
fn test_missing_tracks_only_fatal_when_requested() {
    let no_tracks = SMALL_SESSION.replace("<FilteredTracks>", "<Ignored>").replace("</FilteredTracks>", "</Ignored>");
    assert!(TrackMateParser::from_str(&no_tracks).parse().is_ok());

    let err = TrackMateParser::from_str(&no_tracks)
        .with_tracks(true)
        .parse()
        .unwrap_err();
    assert!(matches!(err, TrackMateError::MalformedDocument(ref m) if m.contains("FilteredTracks")));
}

#[test]
fn test_malformed_xml() {
    let truncated = &SMALL_SESSION[..SMALL_SESSION.len() / 2];
    assert!(matches!(
        TrackMateParser::from_str(truncated).parse(),
        Err(TrackMateError::MalformedDocument(_))
    ));

    let mismatched = "<TrackMate><Model></Settings></TrackMate>";
    assert!(matches!(
        TrackMateParser::from_str(mismatched).parse(),
        Err(TrackMateError::MalformedDocument(_))
    ));

    assert!(matches!(
        TrackMateParser::from_str("").parse(),
        Err(TrackMateError::MalformedDocument(_))
    ));
}

#[test]
fn test_invalid_filter_value() {
    let bad = SMALL_SESSION.replace("value=\"0.5\"", "value=\"high\"");
    let err = TrackMateParser::from_str(&bad).parse().unwrap_err();
    assert!(matches!(err, TrackMateError::MalformedDocument(ref m) if m.contains("InitialSpotFilter")));
}

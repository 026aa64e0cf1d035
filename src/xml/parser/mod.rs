//! Pull parser for TrackMate XML documents using quick-xml

use std::io::BufRead;

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use self::helpers::{
    all_attributes, element_name, get_attribute, parse_f64, parse_filter, parse_i64,
    required_attribute,
};
use super::models::{Edge, FeatureDeclaration, Spot, SpotsInFrame, Track, TrackMateDocument};
use crate::error::{Result, TrackMateError};

mod helpers;

#[cfg(test)]
mod tests;

/// Options controlling which parts of the document are materialized
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Read `AllTracks` and `FilteredTracks` and require them to be present
    pub read_tracks: bool,
}

/// Structural elements seen while parsing
#[derive(Debug, Default)]
struct Seen {
    spot_features: bool,
    all_spots: bool,
    settings: bool,
}

/// Single-pass parser turning a TrackMate XML stream into a [`TrackMateDocument`]
pub struct TrackMateParser<R: BufRead> {
    reader: Reader<R>,
    options: ParseOptions,
}

impl<'a> TrackMateParser<&'a [u8]> {
    /// Create a parser over an in-memory document
    pub fn from_str(xml: &'a str) -> Self {
        Self::new(xml.as_bytes())
    }
}

impl<R: BufRead> TrackMateParser<R> {
    /// Create a new parser from a BufRead source
    pub fn new(reader: R) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        Self {
            reader: xml_reader,
            options: ParseOptions::default(),
        }
    }

    /// Also read the track model
    pub fn with_tracks(mut self, read_tracks: bool) -> Self {
        self.options.read_tracks = read_tracks;
        self
    }

    /// Parse the whole document
    pub fn parse(mut self) -> Result<TrackMateDocument> {
        let mut doc = TrackMateDocument::default();
        let mut seen = Seen::default();
        let mut path: Vec<String> = Vec::new();
        let mut root_seen = false;
        let mut buf = Vec::new();

        loop {
            let event = self.reader.read_event_into(&mut buf)?;
            let decoder = self.reader.decoder();
            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let name = element_name(e)?;
                    if path.is_empty() {
                        if root_seen {
                            return Err(TrackMateError::MalformedDocument(format!(
                                "unexpected second root element <{}>",
                                name
                            )));
                        }
                        root_seen = true;
                        doc.version = get_attribute(e, "version", decoder)?;
                    } else {
                        let parents: Vec<&str> = path[1..].iter().map(String::as_str).collect();
                        self.open_element(&parents, &name, e, decoder, &mut doc, &mut seen)?;
                    }
                    if matches!(event, Event::Start(_)) {
                        path.push(name);
                    }
                }
                Event::End(_) => {
                    path.pop();
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = path.last() {
            return Err(TrackMateError::MalformedDocument(format!(
                "document ended inside <{}>",
                open
            )));
        }
        if !root_seen {
            return Err(TrackMateError::MalformedDocument(
                "document has no root element".to_string(),
            ));
        }
        self.check_structure(&doc, &seen)?;

        debug!(
            "Parsed TrackMate document: {} features, {} frames, {} spots",
            doc.spot_features.len(),
            doc.frames.len(),
            doc.spot_count()
        );

        Ok(doc)
    }

    /// Handle the opening of a non-root element given its ancestors below the root
    fn open_element(
        &self,
        parents: &[&str],
        name: &str,
        e: &BytesStart,
        decoder: quick_xml::encoding::Decoder,
        doc: &mut TrackMateDocument,
        seen: &mut Seen,
    ) -> Result<()> {
        let read_tracks = self.options.read_tracks;

        match (parents, name) {
            ([], "Model") => {
                doc.spatial_units = get_attribute(e, "spatialunits", decoder)?;
                doc.time_units = get_attribute(e, "timeunits", decoder)?;
            }
            (["Model", "FeatureDeclarations"], "SpotFeatures") => {
                seen.spot_features = true;
            }
            (["Model", "FeatureDeclarations", "SpotFeatures"], "Feature") => {
                doc.spot_features.push(FeatureDeclaration {
                    feature: required_attribute(e, "feature", decoder)?,
                    name: get_attribute(e, "name", decoder)?.unwrap_or_default(),
                    shortname: get_attribute(e, "shortname", decoder)?.unwrap_or_default(),
                    dimension: get_attribute(e, "dimension", decoder)?.unwrap_or_default(),
                    isint: get_attribute(e, "isint", decoder)?.as_deref() == Some("true"),
                });
            }
            (["Model"], "AllSpots") => {
                seen.all_spots = true;
            }
            (["Model", "AllSpots"], "SpotsInFrame") => {
                doc.frames.push(SpotsInFrame {
                    frame: get_attribute(e, "frame", decoder)?.unwrap_or_default(),
                    spots: Vec::new(),
                });
            }
            (["Model", "AllSpots", "SpotsInFrame"], "Spot") => {
                let spot = Spot {
                    attributes: all_attributes(e, decoder)?,
                };
                if let Some(frame) = doc.frames.last_mut() {
                    frame.spots.push(spot);
                }
            }
            (["Model"], "AllTracks") if read_tracks => {
                doc.tracks = Some(Vec::new());
            }
            (["Model", "AllTracks"], "Track") if read_tracks => {
                let id = required_attribute(e, "TRACK_ID", decoder)?;
                let track = Track {
                    id: parse_i64(name, "TRACK_ID", &id)?,
                    edges: Vec::new(),
                };
                doc.tracks.get_or_insert_with(Vec::new).push(track);
            }
            (["Model", "AllTracks", "Track"], "Edge") if read_tracks => {
                let source = required_attribute(e, "SPOT_SOURCE_ID", decoder)?;
                let target = required_attribute(e, "SPOT_TARGET_ID", decoder)?;
                let time = get_attribute(e, "EDGE_TIME", decoder)?
                    .map(|t| parse_f64(name, "EDGE_TIME", &t))
                    .transpose()?;
                let edge = Edge {
                    source: parse_f64(name, "SPOT_SOURCE_ID", &source)?,
                    target: parse_f64(name, "SPOT_TARGET_ID", &target)?,
                    time,
                };
                if let Some(track) = doc.tracks.as_mut().and_then(|t| t.last_mut()) {
                    track.edges.push(edge);
                }
            }
            (["Model"], "FilteredTracks") if read_tracks => {
                doc.filtered_track_ids = Some(Vec::new());
            }
            (["Model", "FilteredTracks"], "TrackID") if read_tracks => {
                let id = required_attribute(e, "TRACK_ID", decoder)?;
                let id = parse_i64(name, "TRACK_ID", &id)?;
                doc.filtered_track_ids.get_or_insert_with(Vec::new).push(id);
            }
            ([], "Settings") => {
                seen.settings = true;
            }
            (["Settings"], "ImageData") => {
                doc.image_data = all_attributes(e, decoder)?;
            }
            (["Settings"], "InitialSpotFilter") => {
                doc.initial_filter = Some(parse_filter(e, decoder)?);
            }
            (["Settings", "SpotFilterCollection"], "Filter") => {
                doc.spot_filters.push(parse_filter(e, decoder)?);
            }
            _ => {}
        }

        Ok(())
    }

    /// Verify that every required element was present
    fn check_structure(&self, doc: &TrackMateDocument, seen: &Seen) -> Result<()> {
        let missing = |what: &str| {
            Err(TrackMateError::MalformedDocument(format!(
                "missing required element {}",
                what
            )))
        };

        if !seen.spot_features {
            return missing("Model/FeatureDeclarations/SpotFeatures");
        }
        if !seen.all_spots {
            return missing("Model/AllSpots");
        }
        if !seen.settings {
            return missing("Settings");
        }
        if self.options.read_tracks {
            if doc.tracks.is_none() {
                return missing("Model/AllTracks");
            }
            if doc.filtered_track_ids.is_none() {
                return missing("Model/FilteredTracks");
            }
        }
        Ok(())
    }
}

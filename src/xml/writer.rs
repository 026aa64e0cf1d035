//! Serialization of a [`TrackMateDocument`] back to indented XML

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use super::models::TrackMateDocument;
use crate::error::{Result, TrackMateError};
use crate::table::FilterRule;

/// Indentation used for every written document
const INDENT_SIZE: usize = 2;

/// Serialize a document to an XML string
pub fn to_xml_string(doc: &TrackMateDocument) -> Result<String> {
    let mut buffer = Vec::new();
    write_document(doc, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| TrackMateError::MalformedDocument(format!("invalid UTF-8 output: {}", e)))
}

/// Serialize a document to any writer
pub fn write_document<W: Write>(doc: &TrackMateDocument, writer: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(writer, b' ', INDENT_SIZE);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("TrackMate");
    if let Some(version) = &doc.version {
        root.push_attribute(("version", version.as_str()));
    }
    writer.write_event(Event::Start(root))?;

    write_model(&mut writer, doc)?;
    write_settings(&mut writer, doc)?;

    writer.write_event(Event::End(BytesEnd::new("TrackMate")))?;
    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

fn write_model<W: Write>(writer: &mut Writer<W>, doc: &TrackMateDocument) -> Result<()> {
    let mut model = BytesStart::new("Model");
    if let Some(units) = &doc.spatial_units {
        model.push_attribute(("spatialunits", units.as_str()));
    }
    if let Some(units) = &doc.time_units {
        model.push_attribute(("timeunits", units.as_str()));
    }
    writer.write_event(Event::Start(model))?;

    writer.write_event(Event::Start(BytesStart::new("FeatureDeclarations")))?;
    start_or_empty(writer, "SpotFeatures", Vec::new(), doc.spot_features.is_empty())?;
    for feature in &doc.spot_features {
        let isint = if feature.isint { "true" } else { "false" };
        let element = BytesStart::new("Feature").with_attributes([
            ("feature", feature.feature.as_str()),
            ("name", feature.name.as_str()),
            ("shortname", feature.shortname.as_str()),
            ("dimension", feature.dimension.as_str()),
            ("isint", isint),
        ]);
        writer.write_event(Event::Empty(element))?;
    }
    end_if_started(writer, "SpotFeatures", doc.spot_features.is_empty())?;
    writer.write_event(Event::End(BytesEnd::new("FeatureDeclarations")))?;

    let nspots = doc.spot_count().to_string();
    start_or_empty(
        writer,
        "AllSpots",
        vec![("nspots", nspots.as_str())],
        doc.frames.is_empty(),
    )?;
    for frame in &doc.frames {
        start_or_empty(
            writer,
            "SpotsInFrame",
            vec![("frame", frame.frame.as_str())],
            frame.spots.is_empty(),
        )?;
        for spot in &frame.spots {
            let element = BytesStart::new("Spot").with_attributes(
                spot.attributes
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
            writer.write_event(Event::Empty(element))?;
        }
        end_if_started(writer, "SpotsInFrame", frame.spots.is_empty())?;
    }
    end_if_started(writer, "AllSpots", doc.frames.is_empty())?;

    let tracks = doc.tracks.as_deref().unwrap_or_default();
    start_or_empty(writer, "AllTracks", Vec::new(), tracks.is_empty())?;
    for track in tracks {
        let id = track.id.to_string();
        start_or_empty(writer, "Track", vec![("TRACK_ID", id.as_str())], track.edges.is_empty())?;
        for edge in &track.edges {
            let source = format_decimal(edge.source);
            let target = format_decimal(edge.target);
            let mut element = BytesStart::new("Edge").with_attributes([
                ("SPOT_SOURCE_ID", source.as_str()),
                ("SPOT_TARGET_ID", target.as_str()),
            ]);
            if let Some(time) = edge.time {
                element.push_attribute(("EDGE_TIME", format_decimal(time).as_str()));
            }
            writer.write_event(Event::Empty(element))?;
        }
        end_if_started(writer, "Track", track.edges.is_empty())?;
    }
    end_if_started(writer, "AllTracks", tracks.is_empty())?;

    let filtered = doc.filtered_track_ids.as_deref().unwrap_or_default();
    start_or_empty(writer, "FilteredTracks", Vec::new(), filtered.is_empty())?;
    for id in filtered {
        let id = id.to_string();
        let element = BytesStart::new("TrackID").with_attributes([("TRACK_ID", id.as_str())]);
        writer.write_event(Event::Empty(element))?;
    }
    end_if_started(writer, "FilteredTracks", filtered.is_empty())?;

    writer.write_event(Event::End(BytesEnd::new("Model")))?;
    Ok(())
}

fn write_settings<W: Write>(writer: &mut Writer<W>, doc: &TrackMateDocument) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("Settings")))?;

    let image_data = BytesStart::new("ImageData")
        .with_attributes(doc.image_data.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    writer.write_event(Event::Empty(image_data))?;
    writer.write_event(Event::Empty(BytesStart::new("BasicSettings")))?;

    if let Some(filter) = &doc.initial_filter {
        write_filter(writer, "InitialSpotFilter", filter)?;
    }

    start_or_empty(
        writer,
        "SpotFilterCollection",
        Vec::new(),
        doc.spot_filters.is_empty(),
    )?;
    for filter in &doc.spot_filters {
        write_filter(writer, "Filter", filter)?;
    }
    end_if_started(writer, "SpotFilterCollection", doc.spot_filters.is_empty())?;

    writer.write_event(Event::End(BytesEnd::new("Settings")))?;
    Ok(())
}

fn write_filter<W: Write>(writer: &mut Writer<W>, name: &str, filter: &FilterRule) -> Result<()> {
    let value = format_decimal(filter.value);
    let isabove = if filter.is_above { "true" } else { "false" };
    let element = BytesStart::new(name).with_attributes([
        ("feature", filter.feature.as_str()),
        ("value", value.as_str()),
        ("isabove", isabove),
    ]);
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

/// Write `<name ...>` or, when the element has no children, `<name .../>`
fn start_or_empty<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attributes: Vec<(&str, &str)>,
    empty: bool,
) -> Result<()> {
    let element = BytesStart::new(name).with_attributes(attributes);
    if empty {
        writer.write_event(Event::Empty(element))?;
    } else {
        writer.write_event(Event::Start(element))?;
    }
    Ok(())
}

fn end_if_started<W: Write>(writer: &mut Writer<W>, name: &str, empty: bool) -> Result<()> {
    if !empty {
        writer.write_event(Event::End(BytesEnd::new(name)))?;
    }
    Ok(())
}

/// Format a float so that it always reads back as a decimal number.
///
/// Uses the shortest round-trip digits without an exponent and appends `.0`
/// to whole numbers. Non-finite values become `NaN`, `inf` or `-inf`.
pub fn format_decimal(value: f64) -> String {
    let mut text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Format a float as an integer string, truncating toward zero.
///
/// Exact for every finite value, including those beyond the `i64` range.
pub fn format_integer(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let whole = value.trunc();
    // -0.0 would print as "-0"
    let whole = if whole == 0.0 { 0.0 } else { whole };
    Some(format!("{:.0}", whole))
}

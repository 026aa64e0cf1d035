use quick_xml::encoding::Decoder;
use quick_xml::events::BytesStart;

use crate::error::{Result, TrackMateError};
use crate::table::FilterRule;

/// Decoded local name of an element
pub(super) fn element_name(e: &BytesStart) -> Result<String> {
    Ok(std::str::from_utf8(e.name().as_ref())?.to_string())
}

/// Get an attribute value from a BytesStart
pub(super) fn get_attribute(
    e: &BytesStart,
    name: &str,
    decoder: Decoder,
) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = attr.decode_and_unescape_value(decoder)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Get an attribute that must be present
pub(super) fn required_attribute(
    e: &BytesStart,
    name: &str,
    decoder: Decoder,
) -> Result<String> {
    get_attribute(e, name, decoder)?.ok_or_else(|| {
        let element = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        TrackMateError::MalformedDocument(format!("<{}> is missing attribute {}", element, name))
    })
}

/// Collect every attribute in document order
pub(super) fn all_attributes(e: &BytesStart, decoder: Decoder) -> Result<Vec<(String, String)>> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.decode_and_unescape_value(decoder)?.into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}

/// Parse a decimal attribute value
pub(super) fn parse_f64(element: &str, name: &str, value: &str) -> Result<f64> {
    value.trim().parse::<f64>().map_err(|_| {
        TrackMateError::MalformedDocument(format!(
            "<{}> attribute {} is not a number: {:?}",
            element, name, value
        ))
    })
}

/// Parse an integer attribute value
pub(super) fn parse_i64(element: &str, name: &str, value: &str) -> Result<i64> {
    value.trim().parse::<i64>().map_err(|_| {
        TrackMateError::MalformedDocument(format!(
            "<{}> attribute {} is not an integer: {:?}",
            element, name, value
        ))
    })
}

/// Parse an `InitialSpotFilter` or `Filter` element
pub(super) fn parse_filter(e: &BytesStart, decoder: Decoder) -> Result<FilterRule> {
    let element = element_name(e)?;
    let feature = required_attribute(e, "feature", decoder)?;
    let value = required_attribute(e, "value", decoder)?;
    let value = parse_f64(&element, "value", &value)?;
    let is_above = get_attribute(e, "isabove", decoder)?.as_deref() == Some("true");
    Ok(FilterRule::new(feature, value, is_above))
}

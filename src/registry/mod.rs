//! # Spot Field Registry
//!
//! Static, bidirectional mapping between the TrackMate XML feature vocabulary
//! (`POSITION_X`, `QUALITY`, ...) and the spot table's column vocabulary
//! (`x`, `q`, ...), plus the display metadata TrackMate expects in its
//! `FeatureDeclarations` block.
//!
//! ## Spot Columns
//!
//! | Feature | Column | Integral |
//! |---------|--------|----------|
//! | FRAME | t_stamp | yes |
//! | POSITION_T | t | no |
//! | POSITION_X | x | no |
//! | POSITION_Y | y | no |
//! | POSITION_Z | z | no |
//! | MEAN_INTENSITY | mean_intensity | no |
//! | ESTIMATED_DIAMETER | w | no |
//! | QUALITY | q | no |
//! | ID | spot_id | yes (always truncated) |
//! | MEDIAN_INTENSITY | median_intensity | no |
//! | MIN_INTENSITY | min_intensity | no |
//! | MAX_INTENSITY | max_intensity | no |
//! | TOTAL_INTENSITY | total_intensity | no |
//! | STANDARD_DEVIATION | std_intensity | no |
//! | CONTRAST | contrast | no |
//! | SNR | snr | no |
//!
//! `MEAN_INTENSITY` has two historical column names, `I` and
//! `mean_intensity`. The later one wins: the registry keeps the table position
//! of the first entry and the name of the last, so `I` is not a column.

/// Spot table column name constants.
pub mod columns;
/// Raw TrackMate feature name constants.
pub mod features;


use std::fmt;

/// Unit category of a spot feature, as written in the `dimension` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Detector quality (dimensionless score)
    Quality,
    /// Spatial position
    Position,
    /// Time
    Time,
    /// No physical unit
    None,
    /// Spatial length
    Length,
    /// Pixel intensity
    Intensity,
}

impl Dimension {
    /// Name used by TrackMate in XML
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Quality => "QUALITY",
            Dimension::Position => "POSITION",
            Dimension::Time => "TIME",
            Dimension::None => "NONE",
            Dimension::Length => "LENGTH",
            Dimension::Intensity => "INTENSITY",
        }
    }

    /// Parse a dimension from its XML name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "QUALITY" => Some(Dimension::Quality),
            "POSITION" => Some(Dimension::Position),
            "TIME" => Some(Dimension::Time),
            "NONE" => Some(Dimension::None),
            "LENGTH" => Some(Dimension::Length),
            "INTENSITY" => Some(Dimension::Intensity),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata for one raw spot feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureProperties {
    /// Raw feature name (`POSITION_X`)
    pub feature: &'static str,
    /// Long display name
    pub name: &'static str,
    /// Short display name
    pub shortname: &'static str,
    /// Unit category
    pub dimension: Dimension,
    /// Whether values are written as integers
    pub isint: bool,
}

impl FeatureProperties {
    const fn new(
        feature: &'static str,
        name: &'static str,
        shortname: &'static str,
        dimension: Dimension,
        isint: bool,
    ) -> Self {
        Self {
            feature,
            name,
            shortname,
            dimension,
            isint,
        }
    }
}

/// One entry of the feature/column mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotField {
    /// Raw feature name in XML
    pub feature: &'static str,
    /// Column name in the spot table
    pub column: &'static str,
}

/// Feature/column mapping in table column order.
pub static SPOT_FIELDS: [SpotField; 16] = [
    SpotField { feature: features::FRAME, column: columns::T_STAMP },
    SpotField { feature: features::POSITION_T, column: columns::T },
    SpotField { feature: features::POSITION_X, column: columns::X },
    SpotField { feature: features::POSITION_Y, column: columns::Y },
    SpotField { feature: features::POSITION_Z, column: columns::Z },
    SpotField { feature: features::MEAN_INTENSITY, column: columns::MEAN_INTENSITY },
    SpotField { feature: features::ESTIMATED_DIAMETER, column: columns::W },
    SpotField { feature: features::QUALITY, column: columns::Q },
    SpotField { feature: features::ID, column: columns::SPOT_ID },
    SpotField { feature: features::MEDIAN_INTENSITY, column: columns::MEDIAN_INTENSITY },
    SpotField { feature: features::MIN_INTENSITY, column: columns::MIN_INTENSITY },
    SpotField { feature: features::MAX_INTENSITY, column: columns::MAX_INTENSITY },
    SpotField { feature: features::TOTAL_INTENSITY, column: columns::TOTAL_INTENSITY },
    SpotField { feature: features::STANDARD_DEVIATION, column: columns::STD_INTENSITY },
    SpotField { feature: features::CONTRAST, column: columns::CONTRAST },
    SpotField { feature: features::SNR, column: columns::SNR },
];

/// Display metadata of every spot feature TrackMate ships by default.
pub static FEATURE_PROPERTIES: [FeatureProperties; 18] = [
    FeatureProperties::new(features::QUALITY, "Quality", "Quality", Dimension::Quality, false),
    FeatureProperties::new(features::POSITION_X, "X", "X", Dimension::Position, false),
    FeatureProperties::new(features::POSITION_Y, "Y", "Y", Dimension::Position, false),
    FeatureProperties::new(features::POSITION_Z, "Z", "Z", Dimension::Position, false),
    FeatureProperties::new(features::POSITION_T, "T", "T", Dimension::Time, false),
    FeatureProperties::new(features::FRAME, "Frame", "Frame", Dimension::None, true),
    FeatureProperties::new(features::RADIUS, "Radius", "R", Dimension::Length, false),
    FeatureProperties::new(features::VISIBILITY, "Visibility", "Visibility", Dimension::None, true),
    FeatureProperties::new(
        features::MANUAL_COLOR,
        "Manual spot color",
        "Spot color",
        Dimension::None,
        true,
    ),
    FeatureProperties::new(
        features::MEAN_INTENSITY,
        "Mean intensity",
        "Mean",
        Dimension::Intensity,
        false,
    ),
    FeatureProperties::new(
        features::MEDIAN_INTENSITY,
        "Median intensity",
        "Median",
        Dimension::Intensity,
        false,
    ),
    FeatureProperties::new(
        features::MIN_INTENSITY,
        "Minimal intensity",
        "Min",
        Dimension::Intensity,
        false,
    ),
    FeatureProperties::new(
        features::MAX_INTENSITY,
        "Maximal intensity",
        "Max",
        Dimension::Intensity,
        false,
    ),
    FeatureProperties::new(
        features::TOTAL_INTENSITY,
        "Total intensity",
        "Total int.",
        Dimension::Intensity,
        false,
    ),
    FeatureProperties::new(
        features::STANDARD_DEVIATION,
        "Standard deviation",
        "Stdev.",
        Dimension::Intensity,
        false,
    ),
    FeatureProperties::new(
        features::ESTIMATED_DIAMETER,
        "Estimated diameter",
        "Diam.",
        Dimension::Length,
        false,
    ),
    // "Constrast" is what TrackMate itself writes
    FeatureProperties::new(features::CONTRAST, "Contrast", "Constrast", Dimension::None, false),
    FeatureProperties::new(features::SNR, "Signal/Noise ratio", "SNR", Dimension::None, false),
];

/// All registry entries in table column order
pub fn spot_fields() -> &'static [SpotField] {
    &SPOT_FIELDS
}

/// Table column for a raw feature name
pub fn column_for_feature(feature: &str) -> Option<&'static str> {
    SPOT_FIELDS
        .iter()
        .find(|f| f.feature == feature)
        .map(|f| f.column)
}

/// Raw feature name for a table column
pub fn feature_for_column(column: &str) -> Option<&'static str> {
    SPOT_FIELDS
        .iter()
        .find(|f| f.column == column)
        .map(|f| f.feature)
}

/// Display metadata for a raw feature name
pub fn feature_properties(feature: &str) -> Option<&'static FeatureProperties> {
    FEATURE_PROPERTIES.iter().find(|p| p.feature == feature)
}

/// Whether a raw feature is written as an integer.
///
/// The identifier has no display metadata but is always integral.
pub fn is_integral(feature: &str) -> bool {
    feature == features::ID || feature_properties(feature).map_or(false, |p| p.isint)
}

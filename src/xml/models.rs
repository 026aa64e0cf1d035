use crate::table::FilterRule;

/// Typed in-memory form of a TrackMate XML document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackMateDocument {
    /// TrackMate version from the root element
    pub version: Option<String>,
    /// Spatial units from `Model`
    pub spatial_units: Option<String>,
    /// Time units from `Model`
    pub time_units: Option<String>,
    /// Declared spot features, in declaration order
    pub spot_features: Vec<FeatureDeclaration>,
    /// Spot groups under `AllSpots`, in document order
    pub frames: Vec<SpotsInFrame>,
    /// Tracks under `AllTracks`; `None` when the element was absent or not read
    pub tracks: Option<Vec<Track>>,
    /// Track ids under `FilteredTracks`; `None` when absent or not read
    pub filtered_track_ids: Option<Vec<i64>>,
    /// Attributes of `Settings/ImageData`
    pub image_data: Vec<(String, String)>,
    /// `Settings/InitialSpotFilter`
    pub initial_filter: Option<FilterRule>,
    /// `Settings/SpotFilterCollection/Filter`, in document order
    pub spot_filters: Vec<FilterRule>,
}

impl TrackMateDocument {
    /// Names of the declared spot features
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.spot_features.iter().map(|f| f.feature.as_str())
    }

    /// Total number of spot elements across all frames
    pub fn spot_count(&self) -> usize {
        self.frames.iter().map(|f| f.spots.len()).sum()
    }

    /// Iterate all spots in document order
    pub fn spots(&self) -> impl Iterator<Item = &Spot> {
        self.frames.iter().flat_map(|f| f.spots.iter())
    }
}

/// One `SpotFeatures/Feature` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDeclaration {
    /// Raw feature name
    pub feature: String,
    /// Long display name
    pub name: String,
    /// Short display name
    pub shortname: String,
    /// Unit category, kept verbatim so unregistered categories survive
    pub dimension: String,
    /// Whether values are integral
    pub isint: bool,
}

/// One `SpotsInFrame` group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpotsInFrame {
    /// Value of the `frame` attribute
    pub frame: String,
    /// Spots of this frame, in document order
    pub spots: Vec<Spot>,
}

/// One `Spot` element, attributes kept in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spot {
    /// (attribute name, raw value) pairs
    pub attributes: Vec<(String, String)>,
}

impl Spot {
    /// Raw value of an attribute
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// One `AllTracks/Track` element
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// `TRACK_ID` attribute
    pub id: i64,
    /// Edges of the track, in document order
    pub edges: Vec<Edge>,
}

impl Track {
    /// Spot identifiers referenced by any edge, sources and targets alike
    pub fn spot_ids(&self) -> impl Iterator<Item = f64> + '_ {
        self.edges.iter().flat_map(|e| [e.source, e.target])
    }
}

/// One link between two spots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// `SPOT_SOURCE_ID`
    pub source: f64,
    /// `SPOT_TARGET_ID`
    pub target: f64,
    /// `EDGE_TIME`, when present
    pub time: Option<f64>,
}

//! Raw TrackMate spot feature names as they appear in XML attributes.

/// Frame index the spot was detected in
pub const FRAME: &str = "FRAME";
/// Time of the frame, in the document's time units
pub const POSITION_T: &str = "POSITION_T";
/// X position, in the document's spatial units
pub const POSITION_X: &str = "POSITION_X";
/// Y position, in the document's spatial units
pub const POSITION_Y: &str = "POSITION_Y";
/// Z position, in the document's spatial units
pub const POSITION_Z: &str = "POSITION_Z";
/// Detector quality score
pub const QUALITY: &str = "QUALITY";
/// Spot radius
pub const RADIUS: &str = "RADIUS";
/// Display visibility flag
pub const VISIBILITY: &str = "VISIBILITY";
/// Manually assigned display color
pub const MANUAL_COLOR: &str = "MANUAL_COLOR";
/// Mean intensity inside the spot
pub const MEAN_INTENSITY: &str = "MEAN_INTENSITY";
/// Median intensity inside the spot
pub const MEDIAN_INTENSITY: &str = "MEDIAN_INTENSITY";
/// Minimal intensity inside the spot
pub const MIN_INTENSITY: &str = "MIN_INTENSITY";
/// Maximal intensity inside the spot
pub const MAX_INTENSITY: &str = "MAX_INTENSITY";
/// Summed intensity inside the spot
pub const TOTAL_INTENSITY: &str = "TOTAL_INTENSITY";
/// Standard deviation of the intensity inside the spot
pub const STANDARD_DEVIATION: &str = "STANDARD_DEVIATION";
/// Estimated blob diameter
pub const ESTIMATED_DIAMETER: &str = "ESTIMATED_DIAMETER";
/// Contrast between spot and surrounding ring
pub const CONTRAST: &str = "CONTRAST";
/// Signal-to-noise ratio
pub const SNR: &str = "SNR";
/// Unique spot identifier. Never declared under `SpotFeatures`.
pub const ID: &str = "ID";

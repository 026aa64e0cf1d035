//! Column names of the spot table.

/// Frame index (from `FRAME`)
pub const T_STAMP: &str = "t_stamp";
/// Frame time (from `POSITION_T`)
pub const T: &str = "t";
/// X position (from `POSITION_X`)
pub const X: &str = "x";
/// Y position (from `POSITION_Y`)
pub const Y: &str = "y";
/// Z position (from `POSITION_Z`)
pub const Z: &str = "z";
/// Mean intensity (from `MEAN_INTENSITY`)
pub const MEAN_INTENSITY: &str = "mean_intensity";
/// Estimated diameter (from `ESTIMATED_DIAMETER`)
pub const W: &str = "w";
/// Quality score (from `QUALITY`)
pub const Q: &str = "q";
/// Spot identifier (from `ID`)
pub const SPOT_ID: &str = "spot_id";
/// Median intensity (from `MEDIAN_INTENSITY`)
pub const MEDIAN_INTENSITY: &str = "median_intensity";
/// Minimal intensity (from `MIN_INTENSITY`)
pub const MIN_INTENSITY: &str = "min_intensity";
/// Maximal intensity (from `MAX_INTENSITY`)
pub const MAX_INTENSITY: &str = "max_intensity";
/// Total intensity (from `TOTAL_INTENSITY`)
pub const TOTAL_INTENSITY: &str = "total_intensity";
/// Intensity standard deviation (from `STANDARD_DEVIATION`)
pub const STD_INTENSITY: &str = "std_intensity";
/// Contrast (from `CONTRAST`)
pub const CONTRAST: &str = "contrast";
/// Signal-to-noise ratio (from `SNR`)
pub const SNR: &str = "snr";

// Derived columns

/// Trajectory label assigned during import
pub const LABEL: &str = "label";

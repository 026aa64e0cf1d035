/// Errors that can occur while converting TrackMate documents and spot tables
#[derive(Debug, thiserror::Error)]
pub enum TrackMateError {
    /// The document is not well-formed XML or lacks a required element
    #[error("Malformed TrackMate document: {0}")]
    MalformedDocument(String),

    /// A cell that must be numeric could not be interpreted as a number
    #[error("Invalid value for feature {column}: {value:?}")]
    InvalidFeatureValue {
        /// Feature or column name
        column: String,
        /// Offending textual value
        value: String,
    },

    /// A required column is absent from the spot table
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A column has no counterpart in the field registry
    #[error("Unknown spot feature: {0}")]
    UnknownFeature(String),

    /// File extension does not map to a supported table format
    #[error("Unsupported table format: {0}")]
    UnsupportedFormat(String),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the Arrow library during array operations
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Error from the Parquet library
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TrackMateError>;

impl From<quick_xml::Error> for TrackMateError {
    fn from(e: quick_xml::Error) -> Self {
        TrackMateError::MalformedDocument(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for TrackMateError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        TrackMateError::MalformedDocument(format!("invalid attribute: {}", e))
    }
}

impl From<std::str::Utf8Error> for TrackMateError {
    fn from(e: std::str::Utf8Error) -> Self {
        TrackMateError::MalformedDocument(format!("invalid UTF-8: {}", e))
    }
}

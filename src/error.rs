use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GPX write error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid UTM zone '{zone}': {reason}")]
    ZoneParse { zone: String, reason: String },

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Column '{0}' not found in input header")]
    UnknownColumn(String),

    #[error("Coordinate transformation failed: {0}")]
    Transform(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl ProcessingError {
    pub fn zone_parse(zone: &str, reason: impl Into<String>) -> Self {
        ProcessingError::ZoneParse {
            zone: zone.to_string(),
            reason: reason.into(),
        }
    }
}

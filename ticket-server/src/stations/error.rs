//! Station dataset error types.

/// Errors that can occur when loading the station dataset.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Dataset endpoint returned an error status
    #[error("station data error {status}: {message}")]
    Api { status: u16, message: String },

    /// The dataset script did not contain a station payload
    #[error("station data parse error: {message}")]
    Parse { message: String },

    /// Disk cache operation failed
    #[error("station cache error: {message}")]
    Cache { message: String },
}

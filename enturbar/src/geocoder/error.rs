//! Geocoder error types.

/// Errors that can occur when querying the geocoder.
#[derive(Debug, thiserror::Error)]
pub enum GeocoderError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Client name is not a valid header value
    #[error("invalid client name header: {0:?}")]
    InvalidClientName(String),

    /// Rate limited by the API
    #[error("rate limited by geocoder")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

/// Request to change the active route.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    /// `<pairId>` or `flipped-<pairId>`
    pub selection: String,
}

/// Query for the stop picker.
#[derive(Debug, Deserialize)]
pub struct StopSearchQuery {
    #[serde(default)]
    pub text: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

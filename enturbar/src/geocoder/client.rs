//! Geocoder autocomplete client.

use crate::journey::{DEFAULT_CLIENT_NAME, client_headers};

use super::error::GeocoderError;
use super::suggestion::{MAX_SUGGESTIONS, StopSuggestion, suggestions_from};
use super::types::FeatureCollection;

/// Default autocomplete endpoint.
pub const DEFAULT_GEOCODER_URL: &str = "https://api.entur.io/geocoder/v1/autocomplete";

/// Queries shorter than this many characters are not sent.
pub const MIN_QUERY_CHARS: usize = 2;

/// Configuration for the geocoder client.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Value of the `ET-Client-Name` header
    pub client_name: String,
    /// Autocomplete endpoint URL
    pub url: String,
    /// Result language
    pub lang: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeocoderConfig {
    /// Create a new config with the given client name.
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
            url: DEFAULT_GEOCODER_URL.to_string(),
            lang: "no".to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom endpoint URL (for testing).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT_NAME)
    }
}

/// Whether `text` is long enough to search for.
pub fn is_searchable(text: &str) -> bool {
    text.trim().chars().count() >= MIN_QUERY_CHARS
}

/// Client for the geocoder autocomplete API.
#[derive(Debug, Clone)]
pub struct GeocoderClient {
    http: reqwest::Client,
    url: String,
    lang: String,
}

impl GeocoderClient {
    /// Create a new geocoder client.
    pub fn new(config: GeocoderConfig) -> Result<Self, GeocoderError> {
        let headers = client_headers(&config.client_name)
            .map_err(|_| GeocoderError::InvalidClientName(config.client_name.clone()))?;

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
            lang: config.lang,
        })
    }

    /// Suggest stops matching free text.
    ///
    /// Text shorter than [`MIN_QUERY_CHARS`] returns no suggestions without
    /// making a request.
    pub async fn autocomplete(&self, text: &str) -> Result<Vec<StopSuggestion>, GeocoderError> {
        if !is_searchable(text) {
            return Ok(Vec::new());
        }

        tracing::debug!(text, "querying geocoder");

        let response = self
            .http
            .get(&self.url)
            .query(&[
                ("text", text.trim().to_string()),
                ("lang", self.lang.clone()),
                ("size", MAX_SUGGESTIONS.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocoderError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocoderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let collection: FeatureCollection =
            serde_json::from_str(&body).map_err(|e| GeocoderError::Json {
                message: e.to_string(),
            })?;

        Ok(suggestions_from(&collection))
    }
}

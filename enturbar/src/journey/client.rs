//! Journey planner HTTP client.
//!
//! Sends the trip query to the Entur journey planner GraphQL endpoint. Entur
//! asks every client to identify itself with an `ET-Client-Name` header.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};

use super::error::JourneyError;
use super::planner::TripPlanner;
use super::query::trip_request;
use super::types::{GraphQlResponse, Trip, TripData};

/// Default journey planner endpoint.
pub const DEFAULT_JOURNEY_URL: &str = "https://api.entur.io/journey-planner/v3/graphql";

/// Header Entur uses to identify clients.
pub const CLIENT_NAME_HEADER: &str = "et-client-name";

/// Default client name sent to Entur.
pub const DEFAULT_CLIENT_NAME: &str = "enturbar-rs";

/// Configuration for the journey planner client.
#[derive(Debug, Clone)]
pub struct JourneyPlannerConfig {
    /// Value of the `ET-Client-Name` header
    pub client_name: String,
    /// GraphQL endpoint URL
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl JourneyPlannerConfig {
    /// Create a new config with the given client name.
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
            url: DEFAULT_JOURNEY_URL.to_string(),
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

impl Default for JourneyPlannerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT_NAME)
    }
}

/// Build the default header set shared by the Entur clients.
pub(crate) fn client_headers(client_name: &str) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(CLIENT_NAME_HEADER),
        HeaderValue::from_str(client_name)?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Journey planner API client.
#[derive(Debug, Clone)]
pub struct JourneyPlannerClient {
    http: reqwest::Client,
    url: String,
}

impl JourneyPlannerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: JourneyPlannerConfig) -> Result<Self, JourneyError> {
        let headers = client_headers(&config.client_name)
            .map_err(|_| JourneyError::InvalidClientName(config.client_name.clone()))?;

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// Search for trips from one place to another.
    ///
    /// Places are geocoder ids such as `NSR:StopPlace:337`.
    pub async fn trip(&self, from_place: &str, to_place: &str) -> Result<Trip, JourneyError> {
        tracing::debug!(from = from_place, to = to_place, "querying journey planner");

        let response = self
            .http
            .post(&self.url)
            .json(&trip_request(from_place, to_place))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(JourneyError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(JourneyError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JourneyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_trip_response(&body)
    }
}

impl TripPlanner for JourneyPlannerClient {
    async fn plan_trip(&self, from_place: &str, to_place: &str) -> Result<Trip, JourneyError> {
        self.trip(from_place, to_place).await
    }
}

/// Parse a full GraphQL response body into the trip.
///
/// Data wins over errors: when `data` is present, any GraphQL errors are
/// logged and a missing trip reads as an empty one. Errors without data
/// fail the request.
pub fn parse_trip_response(body: &str) -> Result<Trip, JourneyError> {
    let response: GraphQlResponse<TripData> =
        serde_json::from_str(body).map_err(|e| JourneyError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

    let messages: Vec<String> = response
        .errors
        .unwrap_or_default()
        .into_iter()
        .map(|e| e.message)
        .collect();

    match response.data {
        Some(data) => {
            if !messages.is_empty() {
                tracing::warn!(errors = ?messages, "journey planner returned errors with data");
            }
            Ok(data.trip.unwrap_or_default())
        }
        None if !messages.is_empty() => Err(JourneyError::GraphQl(messages)),
        None => Ok(Trip::default()),
    }
}

//! Journey planner response DTOs.
//!
//! These types map directly to the GraphQL JSON response of the trip query.
//! Fields are `Option` wherever the planner may send `null` or omit them
//! (walking legs have no line, situations may be missing entirely).

use serde::Deserialize;

/// GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

/// One entry of the GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// `data` of the trip query.
#[derive(Debug, Clone, Deserialize)]
pub struct TripData {
    pub trip: Option<Trip>,
}

/// Result of a trip search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Itinerary options, earliest first.
    pub trip_patterns: Option<Vec<TripPattern>>,
}

/// One end-to-end itinerary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPattern {
    /// Total duration in seconds.
    pub duration: Option<i64>,

    /// Total walking distance in metres.
    pub walk_distance: Option<f64>,

    pub legs: Option<Vec<Leg>>,
}

/// One directional segment of an itinerary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    /// Realtime departure (RFC 3339).
    pub expected_start_time: String,

    /// Realtime arrival (RFC 3339).
    pub expected_end_time: String,

    /// Scheduled departure (RFC 3339).
    pub aimed_start_time: Option<String>,

    /// Distance in metres.
    pub distance: Option<f64>,

    /// Transport mode, e.g. `rail`, `bus`, `foot`.
    pub mode: Option<String>,

    /// Service disruptions affecting this leg.
    pub situations: Option<Vec<Situation>>,

    /// Absent for walking legs.
    pub line: Option<Line>,
}

/// A service-status annotation.
#[derive(Debug, Clone, Deserialize)]
pub struct Situation {
    pub summary: Option<Vec<MultilingualString>>,
}

/// Text in one language.
#[derive(Debug, Clone, Deserialize)]
pub struct MultilingualString {
    pub value: Option<String>,
    pub language: Option<String>,
}

/// Public transport line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: Option<String>,

    /// Code shown to passengers, e.g. `R10` or `31`.
    pub public_code: Option<String>,
}

impl Trip {
    /// The first leg of the first trip pattern, if any.
    pub fn first_leg(&self) -> Option<&Leg> {
        self.trip_patterns
            .as_deref()?
            .first()?
            .legs
            .as_deref()?
            .first()
    }
}

impl Leg {
    /// Every summary text across all situations on the leg.
    pub fn situation_summaries(&self) -> impl Iterator<Item = &str> {
        self.situations
            .iter()
            .flatten()
            .flat_map(|s| s.summary.iter().flatten())
            .filter_map(|m| m.value.as_deref())
    }
}

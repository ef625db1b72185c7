//! Mock trip planner for testing without network access.
//!
//! Serves one canned response, loaded from a GraphQL response body on disk
//! or built in code, and records the requests it receives.

use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::client::parse_trip_response;
use super::error::JourneyError;
use super::planner::TripPlanner;
use super::types::Trip;

/// What the mock answers with.
#[derive(Debug, Clone)]
enum Canned {
    Trip(Trip),
    Failure { status: u16, message: String },
}

/// Trip planner that returns a fixed response.
#[derive(Debug)]
pub struct MockTripPlanner {
    canned: Canned,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, String)>>,
}

impl MockTripPlanner {
    /// Always answer with `trip`.
    pub fn with_trip(trip: Trip) -> Self {
        Self::from_canned(Canned::Trip(trip))
    }

    /// Always answer with an API error.
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        Self::from_canned(Canned::Failure {
            status,
            message: message.into(),
        })
    }

    /// Answer with the trip in a full GraphQL response body.
    pub fn from_json(body: &str) -> Result<Self, JourneyError> {
        Ok(Self::with_trip(parse_trip_response(body)?))
    }

    /// Answer with the trip in a GraphQL response body stored on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, JourneyError> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path).map_err(|e| JourneyError::Api {
            status: 0,
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::from_json(&body)
    }

    fn from_canned(canned: Canned) -> Self {
        Self {
            canned,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of trip searches served.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The `(from, to)` places of the most recent search.
    pub fn last_request(&self) -> Option<(String, String)> {
        self.last_request
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn answer(&self, from_place: &str, to_place: &str) -> Result<Trip, JourneyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) =
            Some((from_place.to_string(), to_place.to_string()));

        match &self.canned {
            Canned::Trip(trip) => Ok(trip.clone()),
            Canned::Failure { status, message } => Err(JourneyError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

impl TripPlanner for MockTripPlanner {
    async fn plan_trip(&self, from_place: &str, to_place: &str) -> Result<Trip, JourneyError> {
        self.answer(from_place, to_place)
    }
}

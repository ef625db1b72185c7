//! Entur journey planner client.
//!
//! This module provides an HTTP client for the journey planner GraphQL API,
//! which answers "what are the next trips from A to B".
//!
//! Key characteristics of the API:
//! - Places are geocoder ids (`NSR:StopPlace:<n>`), not names
//! - Times are RFC 3339 timestamps with the stop's local offset
//! - Each leg carries both aimed (scheduled) and expected (realtime) times
//! - Walking legs have no `line`

mod client;
mod convert;
mod error;
mod mock;
mod planner;
mod query;
mod types;

pub use client::{
    CLIENT_NAME_HEADER, DEFAULT_CLIENT_NAME, DEFAULT_JOURNEY_URL, JourneyPlannerClient,
    JourneyPlannerConfig, parse_trip_response,
};
pub(crate) use client::client_headers;
pub use convert::{ConversionError, DepartureLeg, convert_leg};
pub use error::JourneyError;
pub use mock::MockTripPlanner;
pub use planner::TripPlanner;
pub use query::{TRIP_QUERY, trip_request};
pub use types::{
    GraphQlError, GraphQlResponse, Leg, Line, MultilingualString, Situation, Trip, TripData,
    TripPattern,
};

//! Trip planner abstraction.

use std::future::Future;
use std::sync::Arc;

use super::error::JourneyError;
use super::types::Trip;

/// Source of trip search results.
///
/// Implemented by the live [`JourneyPlannerClient`](super::JourneyPlannerClient)
/// and by [`MockTripPlanner`](super::MockTripPlanner) for tests and offline
/// runs.
pub trait TripPlanner {
    /// Search for trips from one place to another, earliest first.
    fn plan_trip(
        &self,
        from_place: &str,
        to_place: &str,
    ) -> impl Future<Output = Result<Trip, JourneyError>> + Send;
}

impl<P: TripPlanner + Send + Sync> TripPlanner for Arc<P> {
    fn plan_trip(
        &self,
        from_place: &str,
        to_place: &str,
    ) -> impl Future<Output = Result<Trip, JourneyError>> + Send {
        (**self).plan_trip(from_place, to_place)
    }
}

//! Departure resolver.
//!
//! Turns the active route into a tray title: resolve the selection, ask the
//! planner for the earliest trip, and reduce its first leg to
//! `[🔥 ]<line> : <start> - <end>` plus a reduced-service flag.

use crate::domain::{DisplayZone, Stop, delay_minutes, format_hhmm};
use crate::journey::{ConversionError, DepartureLeg, Trip, TripPlanner, convert_leg};
use crate::store::{RouteStore, StateStore};

use super::display::{
    DisplayResult, FETCH_ERROR, NO_DEPARTURES, NO_ROUTE_SELECTED, NO_ROUTES_SAVED,
};

/// Prefix shown when the next departure runs late.
pub const DELAY_INDICATOR: &str = "🔥 ";

/// A delay must exceed this many minutes to be flagged.
pub const DELAY_THRESHOLD_MINS: i64 = 1;

/// Situation text marking reduced service, matched case-insensitively.
pub const REDUCED_SERVICE_KEYWORD: &str = "fewer";

/// What a refresh needs to do, decided from the route store alone.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshPlan {
    /// The title is known without asking the planner.
    Ready(DisplayResult),
    /// Ask the planner for a trip between these stops.
    Query { origin: Stop, destination: Stop },
}

/// Decide what a refresh should do.
pub fn plan_refresh<S: StateStore>(routes: &RouteStore<S>) -> RefreshPlan {
    if routes.is_empty() {
        return RefreshPlan::Ready(DisplayResult::info(NO_ROUTES_SAVED));
    }

    match routes.resolve_active() {
        Some(active) => RefreshPlan::Query {
            origin: active.origin().clone(),
            destination: active.destination().clone(),
        },
        None => RefreshPlan::Ready(DisplayResult::info(NO_ROUTE_SELECTED)),
    }
}

/// Reduce a leg to the tray title.
pub fn describe_leg(leg: &DepartureLeg, zone: DisplayZone) -> DisplayResult {
    let delayed = leg
        .aimed_start
        .as_ref()
        .is_some_and(|aimed| delay_minutes(aimed, &leg.expected_start) > DELAY_THRESHOLD_MINS);

    let disrupted = leg
        .situation_summaries
        .iter()
        .any(|s| s.to_lowercase().contains(REDUCED_SERVICE_KEYWORD));

    let text = format!(
        "{}{} : {} - {}",
        if delayed { DELAY_INDICATOR } else { "" },
        leg.label,
        format_hhmm(&leg.expected_start, zone),
        format_hhmm(&leg.expected_end, zone),
    );

    DisplayResult { text, disrupted }
}

/// Reduce a planner response to the tray title.
pub fn describe_trip(trip: &Trip, zone: DisplayZone) -> Result<DisplayResult, ConversionError> {
    match trip.first_leg() {
        Some(leg) => Ok(describe_leg(&convert_leg(leg)?, zone)),
        None => Ok(DisplayResult::info(NO_DEPARTURES)),
    }
}

/// Resolves the active route to a display result via a trip planner.
#[derive(Debug)]
pub struct DepartureResolver<P> {
    planner: P,
    zone: DisplayZone,
}

impl<P: TripPlanner> DepartureResolver<P> {
    pub fn new(planner: P, zone: DisplayZone) -> Self {
        Self { planner, zone }
    }

    pub fn planner(&self) -> &P {
        &self.planner
    }

    /// Resolve the active route and fetch its next departure.
    ///
    /// Never fails: every problem maps to an informational title.
    pub async fn refresh_departure<S: StateStore>(&self, routes: &RouteStore<S>) -> DisplayResult {
        match plan_refresh(routes) {
            RefreshPlan::Ready(result) => result,
            RefreshPlan::Query {
                origin,
                destination,
            } => self.fetch(&origin, &destination).await,
        }
    }

    /// Fetch the next departure between two stops.
    pub async fn fetch(&self, origin: &Stop, destination: &Stop) -> DisplayResult {
        tracing::info!(from = %origin.id, to = %destination.id, "fetching next departure");

        let trip = match self.planner.plan_trip(&origin.id, &destination.id).await {
            Ok(trip) => trip,
            Err(e) => {
                tracing::error!(error = %e, "journey planner request failed");
                return DisplayResult::info(FETCH_ERROR);
            }
        };

        match describe_trip(&trip, self.zone) {
            Ok(result) => {
                if result.disrupted {
                    tracing::warn!(title = %result.text, "reduced service announced");
                }
                tracing::info!(title = %result.text, "next departure");
                result
            }
            Err(e) => {
                tracing::error!(error = %e, "journey planner returned an unusable leg");
                DisplayResult::info(FETCH_ERROR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Selection, parse_timestamp};
    use crate::journey::{
        Leg, Line, MockTripPlanner, MultilingualString, Situation, TripPattern,
        parse_trip_response,
    };
    use crate::store::MemoryStore;

    const T0: &str = "2024-03-15T08:00:00+01:00";

    fn stop(id: &str, name: &str) -> Stop {
        Stop::new(id, name, 59.9, 10.7)
    }

    fn leg(aimed: &str, expected_start: &str, summaries: &[&str]) -> Leg {
        Leg {
            expected_start_time: expected_start.into(),
            expected_end_time: "2024-03-15T08:45:00+01:00".into(),
            aimed_start_time: Some(aimed.into()),
            distance: Some(21437.0),
            mode: Some("rail".into()),
            situations: Some(
                summaries
                    .iter()
                    .map(|s| Situation {
                        summary: Some(vec![MultilingualString {
                            value: Some(s.to_string()),
                            language: Some("en".into()),
                        }]),
                    })
                    .collect(),
            ),
            line: Some(Line {
                id: Some("VYG:Line:R10".into()),
                public_code: Some("R10".into()),
            }),
        }
    }

    fn trip(legs: Vec<Leg>) -> Trip {
        Trip {
            trip_patterns: Some(vec![TripPattern {
                duration: Some(2700),
                walk_distance: Some(0.0),
                legs: Some(legs),
            }]),
        }
    }

    fn describe(l: Leg) -> DisplayResult {
        describe_trip(&trip(vec![l]), DisplayZone::Source).unwrap()
    }

    fn routes_with_pair() -> RouteStore<MemoryStore> {
        let mut routes = RouteStore::new(MemoryStore::new());
        routes
            .add_pair(
                Some(stop("NSR:StopPlace:337", "Oslo S")),
                Some(stop("NSR:StopPlace:451", "Lillestrøm")),
            )
            .unwrap();
        routes
    }

    #[test]
    fn on_time_departure() {
        let result = describe(leg(T0, T0, &[]));
        assert_eq!(result.text, "R10 : 08:00 - 08:45");
        assert!(!result.disrupted);
    }

    #[test]
    fn one_minute_late_is_not_flagged() {
        let result = describe(leg(T0, "2024-03-15T08:01:00+01:00", &[]));
        assert_eq!(result.text, "R10 : 08:01 - 08:45");
    }

    #[test]
    fn two_minutes_late_is_flagged() {
        let result = describe(leg(T0, "2024-03-15T08:02:00+01:00", &[]));
        assert_eq!(result.text, "🔥 R10 : 08:02 - 08:45");
    }

    #[test]
    fn ninety_seconds_rounds_up_to_flagged() {
        let result = describe(leg(T0, "2024-03-15T08:01:30+01:00", &[]));
        assert!(result.text.starts_with(DELAY_INDICATOR));
    }

    #[test]
    fn early_departure_is_not_flagged() {
        let result = describe(leg(T0, "2024-03-15T07:57:00+01:00", &[]));
        assert_eq!(result.text, "R10 : 07:57 - 08:45");
    }

    #[test]
    fn reduced_service_sets_disrupted() {
        let result = describe(leg(T0, T0, &["Fewer departures than usual"]));
        assert!(result.disrupted);

        let result = describe(leg(T0, T0, &["Track change", "FEWER trains this weekend"]));
        assert!(result.disrupted);
    }

    #[test]
    fn other_situations_do_not_set_disrupted() {
        let result = describe(leg(T0, T0, &["Track change"]));
        assert!(!result.disrupted);
    }

    #[test]
    fn missing_situations_do_not_set_disrupted() {
        let mut l = leg(T0, T0, &[]);
        l.situations = None;
        assert!(!describe(l).disrupted);
    }

    #[test]
    fn missing_aimed_time_is_not_late() {
        let mut l = leg(T0, "2024-03-15T08:10:00+01:00", &[]);
        l.aimed_start_time = None;
        assert_eq!(describe(l).text, "R10 : 08:10 - 08:45");
    }

    #[test]
    fn only_first_leg_counts() {
        let first = leg(T0, T0, &[]);
        let second = leg(T0, "2024-03-15T08:30:00+01:00", &["Fewer departures"]);
        let result = describe_trip(&trip(vec![first, second]), DisplayZone::Source).unwrap();
        assert_eq!(result.text, "R10 : 08:00 - 08:45");
        assert!(!result.disrupted);
    }

    #[test]
    fn empty_trip_has_no_departures() {
        let result = describe_trip(&Trip::default(), DisplayZone::Source).unwrap();
        assert_eq!(result, DisplayResult::info(NO_DEPARTURES));

        let empty = Trip {
            trip_patterns: Some(Vec::new()),
        };
        assert_eq!(
            describe_trip(&empty, DisplayZone::Source).unwrap(),
            DisplayResult::info(NO_DEPARTURES)
        );
    }

    #[test]
    fn describe_leg_directly() {
        let leg = DepartureLeg {
            label: "31".into(),
            expected_start: parse_timestamp("2024-03-15T23:58:00+01:00").unwrap(),
            expected_end: parse_timestamp("2024-03-16T00:21:00+01:00").unwrap(),
            aimed_start: None,
            situation_summaries: vec![],
        };
        assert_eq!(
            describe_leg(&leg, DisplayZone::Source).text,
            "31 : 23:58 - 00:21"
        );
    }

    #[test]
    fn plan_for_empty_store() {
        let routes = RouteStore::new(MemoryStore::new());
        assert_eq!(
            plan_refresh(&routes),
            RefreshPlan::Ready(DisplayResult::info(NO_ROUTES_SAVED))
        );
    }

    #[test]
    fn plan_for_dangling_selection() {
        let mut routes = routes_with_pair();
        routes.set_active(&Selection::parse("X-Y").unwrap()).unwrap();
        assert_eq!(
            plan_refresh(&routes),
            RefreshPlan::Ready(DisplayResult::info(NO_ROUTE_SELECTED))
        );
    }

    #[tokio::test]
    async fn empty_store_makes_no_request() {
        let resolver = DepartureResolver::new(
            MockTripPlanner::with_trip(trip(vec![leg(T0, T0, &[])])),
            DisplayZone::Source,
        );
        let routes = RouteStore::new(MemoryStore::new());

        let result = resolver.refresh_departure(&routes).await;

        assert_eq!(result, DisplayResult::info(NO_ROUTES_SAVED));
        assert_eq!(resolver.planner().call_count(), 0);
    }

    #[tokio::test]
    async fn refresh_with_mocked_response() {
        let resolver = DepartureResolver::new(
            MockTripPlanner::with_trip(trip(vec![leg(T0, T0, &[])])),
            DisplayZone::Source,
        );
        let routes = routes_with_pair();

        let result = resolver.refresh_departure(&routes).await;

        assert_eq!(
            result,
            DisplayResult {
                text: "R10 : 08:00 - 08:45".into(),
                disrupted: false,
            }
        );
        assert_eq!(
            resolver.planner().last_request(),
            Some(("NSR:StopPlace:337".into(), "NSR:StopPlace:451".into()))
        );
    }

    #[tokio::test]
    async fn reversed_selection_swaps_places() {
        let resolver = DepartureResolver::new(
            MockTripPlanner::with_trip(Trip::default()),
            DisplayZone::Source,
        );
        let mut routes = routes_with_pair();
        let id = routes.list_pairs()[0].id().clone();
        routes.set_active(&Selection::reverse(id)).unwrap();

        let result = resolver.refresh_departure(&routes).await;

        assert_eq!(result, DisplayResult::info(NO_DEPARTURES));
        assert_eq!(
            resolver.planner().last_request(),
            Some(("NSR:StopPlace:451".into(), "NSR:StopPlace:337".into()))
        );
    }

    #[tokio::test]
    async fn planner_failure_is_fetch_error() {
        let resolver = DepartureResolver::new(
            MockTripPlanner::failing(500, "Internal Server Error"),
            DisplayZone::Source,
        );
        let result = resolver.refresh_departure(&routes_with_pair()).await;
        assert_eq!(result, DisplayResult::info(FETCH_ERROR));
    }

    #[tokio::test]
    async fn unusable_leg_is_fetch_error() {
        let mut bad = leg(T0, T0, &[]);
        bad.expected_start_time = "not a time".into();
        let resolver =
            DepartureResolver::new(MockTripPlanner::with_trip(trip(vec![bad])), DisplayZone::Source);

        let result = resolver.refresh_departure(&routes_with_pair()).await;
        assert_eq!(result, DisplayResult::info(FETCH_ERROR));
    }

    #[tokio::test]
    async fn walking_first_leg_is_fetch_error() {
        let trip = parse_trip_response(
            r#"{"data": {"trip": {"tripPatterns": [{"legs": [{
                "expectedStartTime": "2024-03-15T08:00:00+01:00",
                "expectedEndTime": "2024-03-15T08:05:00+01:00",
                "aimedStartTime": "2024-03-15T08:00:00+01:00",
                "mode": "foot",
                "line": null
            }]}]}}}"#,
        )
        .unwrap();
        assert_eq!(
            describe_trip(&trip, DisplayZone::Source),
            Err(ConversionError::NoLine)
        );

        let resolver = DepartureResolver::new(MockTripPlanner::with_trip(trip), DisplayZone::Source);
        let result = resolver.refresh_departure(&routes_with_pair()).await;
        assert_eq!(result, DisplayResult::info(FETCH_ERROR));
    }

    #[tokio::test]
    async fn planner_errors_without_trip_show_no_departures() {
        let planner = MockTripPlanner::from_json(
            r#"{"errors": [{"message": "no trip"}], "data": {"trip": null}}"#,
        )
        .unwrap();
        let resolver = DepartureResolver::new(planner, DisplayZone::Source);

        let result = resolver.refresh_departure(&routes_with_pair()).await;
        assert_eq!(result, DisplayResult::info(NO_DEPARTURES));
    }

    #[tokio::test]
    async fn fixture_response() {
        let resolver = DepartureResolver::new(
            MockTripPlanner::from_file("data/mock_trip.json").unwrap(),
            DisplayZone::Source,
        );
        let result = resolver.refresh_departure(&routes_with_pair()).await;
        assert_eq!(result.text, "R10 : 08:00 - 08:45");
        assert!(!result.disrupted);
    }
}

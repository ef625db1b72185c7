//! GraphQL trip query.

use serde::Serialize;

/// Trip query asking for the fields the tray derives its title from.
///
/// Stop ids are passed as variables rather than spliced into the query text.
pub const TRIP_QUERY: &str = r#"query Trip($from: String!, $to: String!) {
  trip(from: { place: $from }, to: { place: $to }) {
    tripPatterns {
      duration
      walkDistance
      legs {
        expectedStartTime
        expectedEndTime
        aimedStartTime
        distance
        mode
        situations {
          summary {
            value
            language
          }
        }
        line {
          id
          publicCode
        }
      }
    }
  }
}"#;

/// Body of a GraphQL POST.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'static str,
    pub variables: TripVariables<'a>,
}

/// Variables for [`TRIP_QUERY`].
#[derive(Debug, Clone, Serialize)]
pub struct TripVariables<'a> {
    pub from: &'a str,
    pub to: &'a str,
}

/// Build the request body for a trip between two places.
pub fn trip_request<'a>(from_place: &'a str, to_place: &'a str) -> GraphQlRequest<'a> {
    GraphQlRequest {
        query: TRIP_QUERY,
        variables: TripVariables {
            from: from_place,
            to: to_place,
        },
    }
}

//! Pending route being assembled from suggestions.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::Stop;

use super::suggestion::StopSuggestion;

/// Message asking for a new pair to be saved.
///
/// Both stops are optional on the wire; the route store drops the message
/// if either is missing. A stop that does not decode is logged and read as
/// missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddPairRequest {
    #[serde(default, deserialize_with = "lenient_stop")]
    pub from: Option<Stop>,
    #[serde(default, deserialize_with = "lenient_stop")]
    pub to: Option<Stop>,
}

fn lenient_stop<'de, D>(deserializer: D) -> Result<Option<Stop>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match serde_json::from_value(value) {
        Ok(stop) => Ok(Some(stop)),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed stop");
            Ok(None)
        }
    }
}

/// Which end of the pending route a suggestion fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    From,
    To,
}

/// Returned by [`RouteDraft::submit`] when a stop is still missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("select both FROM and TO stops")]
pub struct IncompleteDraft;

/// From/to stops picked so far.
#[derive(Debug, Clone, Default)]
pub struct RouteDraft {
    from: Option<Stop>,
    to: Option<Stop>,
}

impl RouteDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a picked suggestion and return the confirmation to show.
    pub fn select(&mut self, endpoint: Endpoint, suggestion: &StopSuggestion) -> String {
        let stop = suggestion.to_stop();
        let message = match endpoint {
            Endpoint::From => format!("selected from: {}", stop.name),
            Endpoint::To => format!("selected to: {}", stop.name),
        };
        match endpoint {
            Endpoint::From => self.from = Some(stop),
            Endpoint::To => self.to = Some(stop),
        }
        message
    }

    pub fn from_stop(&self) -> Option<&Stop> {
        self.from.as_ref()
    }

    pub fn to_stop(&self) -> Option<&Stop> {
        self.to.as_ref()
    }

    /// Turn the draft into an add-pair message and reset it.
    ///
    /// The draft is left untouched if either stop is missing.
    pub fn submit(&mut self) -> Result<AddPairRequest, IncompleteDraft> {
        if self.from.is_none() || self.to.is_none() {
            return Err(IncompleteDraft);
        }
        Ok(AddPairRequest {
            from: self.from.take(),
            to: self.to.take(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocoder::ModeGlyph;

    fn suggestion(id: &str, name: &str) -> StopSuggestion {
        StopSuggestion {
            id: id.to_string(),
            name: name.to_string(),
            locality: None,
            lat: 59.9,
            lon: 10.7,
            modes: ModeGlyph::Train,
        }
    }

    #[test]
    fn select_both_then_submit() {
        let mut draft = RouteDraft::new();
        assert_eq!(
            draft.select(Endpoint::From, &suggestion("A", "Oslo S")),
            "selected from: Oslo S"
        );
        assert_eq!(
            draft.select(Endpoint::To, &suggestion("B", "Lillestrøm")),
            "selected to: Lillestrøm"
        );

        let request = draft.submit().unwrap();
        assert_eq!(request.from.unwrap().id, "A");
        assert_eq!(request.to.unwrap().id, "B");

        // Draft resets after a submit
        assert!(draft.from_stop().is_none());
        assert!(draft.to_stop().is_none());
    }

    #[test]
    fn reselecting_replaces() {
        let mut draft = RouteDraft::new();
        draft.select(Endpoint::From, &suggestion("A", "Oslo S"));
        draft.select(Endpoint::From, &suggestion("C", "Drammen"));
        assert_eq!(draft.from_stop().unwrap().id, "C");
    }

    #[test]
    fn incomplete_draft_is_kept() {
        let mut draft = RouteDraft::new();
        draft.select(Endpoint::From, &suggestion("A", "Oslo S"));

        let err = draft.submit().unwrap_err();
        assert_eq!(err.to_string(), "select both FROM and TO stops");
        assert_eq!(draft.from_stop().unwrap().id, "A");
    }

    #[test]
    fn request_wire_format() {
        let json = r#"{"from": {"id": "A", "name": "Oslo S", "lat": 59.9, "lon": 10.7}, "to": null}"#;
        let request: AddPairRequest = serde_json::from_str(json).unwrap();
        assert!(request.from.is_some());
        assert!(request.to.is_none());
    }

    #[test]
    fn malformed_stop_reads_as_missing() {
        let req: AddPairRequest = serde_json::from_str(
            r#"{
                "from": {"id": "NSR:StopPlace:337"},
                "to": {"id": "NSR:StopPlace:451", "name": "Lillestrøm", "lat": "north"}
            }"#,
        )
        .unwrap();
        assert_eq!(req.from, None);
        assert_eq!(req.to, None);
    }

    #[test]
    fn absent_and_null_stops_are_missing() {
        let req: AddPairRequest = serde_json::from_str(
            r#"{"from": null, "to": {"id": "NSR:StopPlace:451", "name": "Lillestrøm"}}"#,
        )
        .unwrap();
        assert_eq!(req.from, None);
        assert_eq!(req.to.unwrap().name, "Lillestrøm");

        let req: AddPairRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, AddPairRequest { from: None, to: None });
    }
}

//! Saved origin/destination pairs.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::stop::Stop;

/// Identifier of a route pair: `<from.id>-<to.id>`.
///
/// Always derived from the two stop ids, never chosen by the user.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairId(String);

impl PairId {
    /// Derive the id for a pair of stops.
    pub fn for_stops(from: &Stop, to: &Stop) -> Self {
        Self(format!("{}-{}", from.id, to.id))
    }

    /// Wrap an id read back from a selection.
    pub(crate) fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PairId({})", self.0)
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One directional route as entered by the user.
///
/// The id is recomputed whenever a pair is built or read back, so it can
/// never drift from the `from`/`to` stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredRoutePair")]
pub struct RoutePair {
    id: PairId,
    from: Stop,
    to: Stop,
}

/// Shape of a pair in the persisted store.
#[derive(Deserialize)]
struct StoredRoutePair {
    id: Option<String>,
    from: Stop,
    to: Stop,
}

impl From<StoredRoutePair> for RoutePair {
    fn from(stored: StoredRoutePair) -> Self {
        let pair = RoutePair::new(stored.from, stored.to);
        if let Some(id) = stored.id
            && id != pair.id.as_str()
        {
            tracing::warn!(stored = %id, derived = %pair.id, "stored pair id disagrees with its stops");
        }
        pair
    }
}

impl RoutePair {
    /// Build a pair, deriving its id from the stops.
    pub fn new(from: Stop, to: Stop) -> Self {
        Self {
            id: PairId::for_stops(&from, &to),
            from,
            to,
        }
    }

    pub fn id(&self) -> &PairId {
        &self.id
    }

    pub fn from_stop(&self) -> &Stop {
        &self.from
    }

    pub fn to_stop(&self) -> &Stop {
        &self.to
    }

    /// Human-readable label, e.g. `Oslo S → Lillestrøm`.
    pub fn label(&self, reversed: bool) -> String {
        if reversed {
            format!("{} → {}", self.to.name, self.from.name)
        } else {
            format!("{} → {}", self.from.name, self.to.name)
        }
    }
}

/// The resolved active route and the direction it is travelled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveRoute {
    pub pair: RoutePair,
    pub reversed: bool,
}

impl ActiveRoute {
    /// Stop the trip starts from, honouring the direction.
    pub fn origin(&self) -> &Stop {
        if self.reversed {
            self.pair.to_stop()
        } else {
            self.pair.from_stop()
        }
    }

    /// Stop the trip ends at, honouring the direction.
    pub fn destination(&self) -> &Stop {
        if self.reversed {
            self.pair.from_stop()
        } else {
            self.pair.to_stop()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, name: &str) -> Stop {
        Stop::new(id, name, 59.9, 10.7)
    }

    #[test]
    fn id_is_derived_from_stops() {
        let pair = RoutePair::new(
            stop("NSR:StopPlace:337", "Oslo S"),
            stop("NSR:StopPlace:451", "Lillestrøm"),
        );
        assert_eq!(pair.id().as_str(), "NSR:StopPlace:337-NSR:StopPlace:451");
    }

    #[test]
    fn labels_follow_direction() {
        let pair = RoutePair::new(stop("A", "Oslo S"), stop("B", "Lillestrøm"));
        assert_eq!(pair.label(false), "Oslo S → Lillestrøm");
        assert_eq!(pair.label(true), "Lillestrøm → Oslo S");
    }

    #[test]
    fn active_route_swaps_when_reversed() {
        let pair = RoutePair::new(stop("A", "Oslo S"), stop("B", "Lillestrøm"));
        let forward = ActiveRoute {
            pair: pair.clone(),
            reversed: false,
        };
        assert_eq!(forward.origin().id, "A");
        assert_eq!(forward.destination().id, "B");

        let reverse = ActiveRoute {
            pair,
            reversed: true,
        };
        assert_eq!(reverse.origin().id, "B");
        assert_eq!(reverse.destination().id, "A");
    }

    #[test]
    fn serializes_in_stored_shape() {
        let pair = RoutePair::new(stop("A", "Oslo S"), stop("B", "Lillestrøm"));
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["id"], "A-B");
        assert_eq!(json["from"]["name"], "Oslo S");
        assert_eq!(json["to"]["id"], "B");
    }

    #[test]
    fn stale_stored_id_is_rederived() {
        let json = r#"{
            "id": "something-else",
            "from": {"id": "A", "name": "Oslo S", "lat": 59.9, "lon": 10.7},
            "to": {"id": "B", "name": "Lillestrøm", "lat": 59.9, "lon": 11.0}
        }"#;
        let pair: RoutePair = serde_json::from_str(json).unwrap();
        assert_eq!(pair.id().as_str(), "A-B");
    }
}

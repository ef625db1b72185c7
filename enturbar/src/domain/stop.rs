//! Transit stop type.

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A transit stop picked from the geocoder.
///
/// The `id` is the geocoder's identifier for the place (for example
/// `NSR:StopPlace:337`) and is what the journey planner accepts as a
/// `place`. Coordinates are WGS84.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
}

impl Stop {
    /// Create a new stop.
    pub fn new(id: impl Into<String>, name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lat,
            lon,
        }
    }

    /// Check that the stop can be used to build a route.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::MalformedStop("id is empty"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::MalformedStop("name is empty"));
        }
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(DomainError::MalformedStop("coordinates are not finite"));
        }
        Ok(())
    }
}

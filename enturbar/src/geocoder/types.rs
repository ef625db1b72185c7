//! Geocoder autocomplete response DTOs.
//!
//! The autocomplete endpoint answers with a GeoJSON-like feature collection.
//! Only the fields the stop picker uses are mapped.

use serde::Deserialize;

/// Autocomplete response.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    pub features: Option<Vec<Feature>>,
}

/// One matching place.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub geometry: Option<Geometry>,
    pub properties: Properties,
}

/// Point geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    /// `[lon, lat]`, GeoJSON order.
    pub coordinates: Option<Vec<f64>>,
}

/// Place properties.
#[derive(Debug, Clone, Deserialize)]
pub struct Properties {
    /// Place id, e.g. `NSR:StopPlace:337`.
    pub id: Option<String>,
    pub name: Option<String>,
    pub locality: Option<String>,
    /// Stop categories such as `railStation` or `onstreetBus`.
    pub category: Option<Vec<String>>,
}

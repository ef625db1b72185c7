//! Entur geocoder client and stop picking.
//!
//! Free text is turned into at most five stop suggestions; picking one
//! records it as the pending `from` or `to` stop of a new route.

mod client;
mod draft;
mod error;
mod suggestion;
mod types;

pub use client::{
    DEFAULT_GEOCODER_URL, GeocoderClient, GeocoderConfig, MIN_QUERY_CHARS, is_searchable,
};
pub use draft::{AddPairRequest, Endpoint, IncompleteDraft, RouteDraft};
pub use error::GeocoderError;
pub use suggestion::{MAX_SUGGESTIONS, ModeGlyph, StopSuggestion, suggestions_from};
pub use types::{Feature, FeatureCollection, Geometry, Properties};

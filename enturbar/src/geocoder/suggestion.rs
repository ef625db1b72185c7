//! Stop suggestions shown while the user types.

use serde::Serialize;

use crate::domain::Stop;

use super::types::{Feature, FeatureCollection};

/// At most this many suggestions are requested and shown.
pub const MAX_SUGGESTIONS: usize = 5;

/// Modes served at a suggested stop, from its geocoder categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ModeGlyph {
    Train,
    Bus,
    TrainAndBus,
    Other,
}

impl ModeGlyph {
    /// Classify a category list.
    pub fn from_categories<'a>(categories: impl IntoIterator<Item = &'a str>) -> Self {
        let (mut train, mut bus) = (false, false);
        for category in categories {
            match category {
                "railStation" => train = true,
                "onstreetBus" => bus = true,
                _ => {}
            }
        }
        match (train, bus) {
            (true, true) => ModeGlyph::TrainAndBus,
            (true, false) => ModeGlyph::Train,
            (false, true) => ModeGlyph::Bus,
            (false, false) => ModeGlyph::Other,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            ModeGlyph::Train => "🚆",
            ModeGlyph::Bus => "🚌",
            ModeGlyph::TrainAndBus => "🚆🚌",
            ModeGlyph::Other => "",
        }
    }
}

/// A selectable stop candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopSuggestion {
    pub id: String,
    pub name: String,
    pub locality: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub modes: ModeGlyph,
}

impl StopSuggestion {
    /// Text for the suggestion list, e.g. `🚆 Oslo S (Oslo)`.
    pub fn label(&self) -> String {
        let mut label = String::new();
        if self.modes != ModeGlyph::Other {
            label.push_str(self.modes.glyph());
            label.push(' ');
        }
        label.push_str(&self.name);
        if let Some(locality) = self.locality.as_deref().filter(|l| !l.is_empty()) {
            label.push_str(&format!(" ({locality})"));
        }
        label
    }

    /// The stop recorded when this suggestion is picked.
    pub fn to_stop(&self) -> Stop {
        Stop::new(&self.id, &self.name, self.lat, self.lon)
    }

    fn from_feature(feature: &Feature) -> Option<Self> {
        let props = &feature.properties;
        let coordinates = feature.geometry.as_ref()?.coordinates.as_deref()?;
        let [lon, lat]: [f64; 2] = coordinates.get(..2)?.try_into().ok()?;

        Some(Self {
            id: props.id.clone().filter(|id| !id.is_empty())?,
            name: props.name.clone().filter(|name| !name.is_empty())?,
            locality: props.locality.clone(),
            lat,
            lon,
            modes: ModeGlyph::from_categories(
                props.category.iter().flatten().map(String::as_str),
            ),
        })
    }
}

/// Map a response to at most [`MAX_SUGGESTIONS`] suggestions.
///
/// Features missing an id, name or coordinates are skipped.
pub fn suggestions_from(collection: &FeatureCollection) -> Vec<StopSuggestion> {
    collection
        .features
        .iter()
        .flatten()
        .filter_map(StopSuggestion::from_feature)
        .take(MAX_SUGGESTIONS)
        .collect()
}

//! Caching layer for geocoder suggestions.
//!
//! The stop picker queries on every keystroke past the second character, so
//! the same prefixes come back repeatedly. Suggestions are cached per
//! normalised query text for a short time.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use serde::Serialize;

use crate::geocoder::{GeocoderClient, GeocoderError, StopSuggestion, is_searchable};

/// Message shown when suggestions could not be fetched.
pub const SUGGESTIONS_FAILED: &str = "could not fetch suggestions";

/// Cached suggestion list.
type SuggestionEntry = Arc<Vec<StopSuggestion>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 500,
        }
    }
}

/// Suggestions plus an optional user-visible message.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOutcome {
    pub suggestions: Vec<StopSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Cache key: trimmed, lowercased query text.
fn cache_key(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Geocoder client with caching.
pub struct CachedGeocoder {
    client: GeocoderClient,
    suggestions: MokaCache<String, SuggestionEntry>,
}

impl CachedGeocoder {
    /// Create a new cached client.
    pub fn new(client: GeocoderClient, config: &CacheConfig) -> Self {
        let suggestions = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            client,
            suggestions,
        }
    }

    /// Suggest stops, using the cache if available.
    ///
    /// Errors are not cached.
    pub async fn autocomplete(&self, text: &str) -> Result<SuggestionEntry, GeocoderError> {
        if !is_searchable(text) {
            return Ok(Arc::new(Vec::new()));
        }

        let key = cache_key(text);

        if let Some(cached) = self.suggestions.get(&key).await {
            return Ok(cached);
        }

        let entry = Arc::new(self.client.autocomplete(text).await?);
        self.suggestions.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Suggest stops for the picker, never failing.
    ///
    /// A geocoder failure is logged and turned into an empty list with a
    /// message for the user.
    pub async fn search(&self, text: &str) -> SearchOutcome {
        match self.autocomplete(text).await {
            Ok(suggestions) => SearchOutcome {
                suggestions: suggestions.as_ref().clone(),
                message: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, text, "stop search failed");
                SearchOutcome {
                    suggestions: Vec::new(),
                    message: Some(SUGGESTIONS_FAILED.to_string()),
                }
            }
        }
    }

    /// Number of cached queries.
    pub fn entry_count(&self) -> u64 {
        self.suggestions.entry_count()
    }
}

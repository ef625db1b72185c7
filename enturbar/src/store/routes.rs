//! Route store: saved pairs and the active selection.

use serde_json::Value;

use crate::domain::{ActiveRoute, DomainError, RoutePair, Selection, Stop};

use super::error::StoreError;
use super::state::StateStore;

/// Key holding the ordered list of saved pairs.
pub const PAIRS_KEY: &str = "stopsArray";

/// Key holding the active selection in its stored string form.
pub const ACTIVE_KEY: &str = "activePairId";

/// Durable storage and selection of route pairs.
///
/// Reads go straight to the underlying [`StateStore`] and every mutation is
/// written through before returning, so the state store stays the single
/// source of truth.
#[derive(Debug)]
pub struct RouteStore<S> {
    state: S,
}

impl<S: StateStore> RouteStore<S> {
    pub fn new(state: S) -> Self {
        Self { state }
    }

    /// Save a new pair and return it.
    ///
    /// If nothing is selected yet, the new pair becomes active in the forward
    /// direction. A missing or malformed stop is logged and ignored; nothing
    /// is written and `Ok(None)` is returned.
    pub fn add_pair(
        &mut self,
        from: Option<Stop>,
        to: Option<Stop>,
    ) -> Result<Option<RoutePair>, StoreError> {
        let (from, to) = match validate_stops(from, to) {
            Ok(stops) => stops,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring route with missing stop data");
                return Ok(None);
            }
        };

        let pair = RoutePair::new(from, to);
        let mut pairs = self.list_pairs();
        pairs.push(pair.clone());
        self.state.set(PAIRS_KEY, serde_json::to_value(&pairs)?)?;

        tracing::info!(pair = %pair.id(), label = %pair.label(false), "route added");

        if self.active_selection().is_none() {
            self.set_active(&Selection::forward(pair.id().clone()))?;
            tracing::info!(pair = %pair.id(), "no active route, using new route");
        }

        Ok(Some(pair))
    }

    /// All saved pairs, in the order they were added.
    pub fn list_pairs(&self) -> Vec<RoutePair> {
        match self.state.get(PAIRS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!(error = %e, key = PAIRS_KEY, "stored routes are unreadable, treating as empty");
                Vec::new()
            }),
        }
    }

    /// Whether no pairs are saved.
    pub fn is_empty(&self) -> bool {
        self.list_pairs().is_empty()
    }

    /// The stored selection, whether or not it still names a saved pair.
    pub fn active_selection(&self) -> Option<Selection> {
        match self.state.get(ACTIVE_KEY)? {
            Value::String(s) => Selection::parse(&s)
                .inspect_err(|e| tracing::warn!(error = %e, "ignoring stored selection"))
                .ok(),
            Value::Null => None,
            other => {
                tracing::warn!(value = %other, "stored selection is not a string");
                None
            }
        }
    }

    /// Overwrite the active selection.
    ///
    /// The selection is not checked against the saved pairs; a dangling
    /// selection simply resolves to nothing.
    pub fn set_active(&mut self, selection: &Selection) -> Result<(), StoreError> {
        self.state
            .set(ACTIVE_KEY, Value::String(selection.to_string()))?;
        tracing::info!(selection = %selection, "active route selected");
        Ok(())
    }

    /// Remove every pair and the selection in a single write.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.state.delete(&[PAIRS_KEY, ACTIVE_KEY])?;
        tracing::info!("all routes cleared");
        Ok(())
    }

    /// Resolve the selection to a saved pair and direction.
    ///
    /// Returns `None` if nothing is selected or the selection names a pair
    /// that is not saved.
    pub fn resolve_active(&self) -> Option<ActiveRoute> {
        let selection = self.active_selection()?;
        let pair = self
            .list_pairs()
            .into_iter()
            .find(|p| p.id() == selection.pair_id())?;

        Some(ActiveRoute {
            pair,
            reversed: selection.is_reversed(),
        })
    }

    /// Access the underlying state store.
    pub fn state(&self) -> &S {
        &self.state
    }
}

fn validate_stops(from: Option<Stop>, to: Option<Stop>) -> Result<(Stop, Stop), DomainError> {
    let from = from.ok_or(DomainError::MissingStop("from"))?;
    let to = to.ok_or(DomainError::MissingStop("to"))?;
    from.validate()?;
    to.validate()?;
    Ok((from, to))
}

//! Persisted route state.
//!
//! A small key/value [`StateStore`] underneath a typed [`RouteStore`] that
//! keeps the saved pairs and the active selection.

mod error;
mod routes;
mod state;

pub use error::StoreError;
pub use routes::{ACTIVE_KEY, PAIRS_KEY, RouteStore};
pub use state::{JsonFileStore, MemoryStore, StateStore};

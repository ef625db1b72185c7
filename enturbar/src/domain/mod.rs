//! Domain types for the departure tray.
//!
//! Stops, saved route pairs and the active selection. Types validate their
//! invariants at construction, so code receiving them can trust them.

mod error;
mod route_pair;
mod selection;
mod stop;
mod time;

pub use error::DomainError;
pub use route_pair::{ActiveRoute, PairId, RoutePair};
pub use selection::{Direction, FLIPPED_PREFIX, Selection};
pub use stop::Stop;
pub use time::{DisplayZone, TimeError, delay_minutes, format_hhmm, parse_timestamp};

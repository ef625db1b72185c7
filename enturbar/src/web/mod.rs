//! Local control API.
//!
//! Stands in for the tray menu and the add-route window: every user action
//! is an HTTP call on the loopback interface.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;

//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedGeocoder;
use crate::controller::ControllerHandle;
use crate::departure::TrayDisplay;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Route commands go through the controller
    pub controller: ControllerHandle,

    /// Current tray title and icon
    pub display: TrayDisplay,

    /// Stop suggestions for the add-route picker
    pub geocoder: Arc<CachedGeocoder>,
}

impl AppState {
    pub fn new(
        controller: ControllerHandle,
        display: TrayDisplay,
        geocoder: CachedGeocoder,
    ) -> Self {
        Self {
            controller,
            display,
            geocoder: Arc::new(geocoder),
        }
    }
}

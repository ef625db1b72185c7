//! Departure resolution and tray display.

mod display;
mod menu;
mod resolver;

pub use display::{
    DisplayResult, FETCH_ERROR, IconState, NO_DEPARTURES, NO_ROUTE_SELECTED, NO_ROUTES,
    NO_ROUTES_SAVED, TrayDisplay, TrayStatus,
};
pub use menu::{MenuEntry, build_menu};
pub use resolver::{
    DELAY_INDICATOR, DELAY_THRESHOLD_MINS, DepartureResolver, REDUCED_SERVICE_KEYWORD,
    RefreshPlan, describe_leg, describe_trip, plan_refresh,
};

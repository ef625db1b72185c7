//! Tray display state.
//!
//! The tray shows a short title and one of two icons. Refreshes may overlap,
//! so every update carries a generation number taken when the refresh was
//! issued; an update older than the one on screen is dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::watch;

/// Title when no pairs are saved.
pub const NO_ROUTES_SAVED: &str = "no routes saved";

/// Title when the selection does not resolve to a saved pair.
pub const NO_ROUTE_SELECTED: &str = "no route selected";

/// Title when the planner found no trip.
pub const NO_DEPARTURES: &str = "no departures";

/// Title when the planner could not be queried or understood.
pub const FETCH_ERROR: &str = "fetch error";

/// Title right after every route is cleared.
pub const NO_ROUTES: &str = "no routes";

/// What a refresh produced for the tray.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayResult {
    pub text: String,
    pub disrupted: bool,
}

impl DisplayResult {
    /// An informational title with the default icon.
    pub fn info(text: &str) -> Self {
        Self {
            text: text.to_string(),
            disrupted: false,
        }
    }

    pub fn icon(&self) -> IconState {
        IconState::from_disrupted(self.disrupted)
    }
}

/// Which tray icon to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconState {
    /// Normal service.
    #[default]
    ManyServices,
    /// A reduced-service announcement is active on the next departure.
    FewServices,
}

impl IconState {
    pub fn from_disrupted(disrupted: bool) -> Self {
        if disrupted {
            IconState::FewServices
        } else {
            IconState::ManyServices
        }
    }
}

/// Snapshot of what the tray is showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrayStatus {
    pub title: String,
    pub icon: IconState,
    /// Generation of the update that produced this status.
    #[serde(skip)]
    pub generation: u64,
}

impl Default for TrayStatus {
    fn default() -> Self {
        Self {
            title: String::new(),
            icon: IconState::ManyServices,
            generation: 0,
        }
    }
}

/// Shared tray display state.
///
/// Cheap to clone; all clones update and observe the same state.
#[derive(Clone)]
pub struct TrayDisplay {
    status: Arc<watch::Sender<TrayStatus>>,
    next_generation: Arc<AtomicU64>,
}

impl Default for TrayDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TrayDisplay {
    pub fn new() -> Self {
        let (status, _) = watch::channel(TrayStatus::default());
        Self {
            status: Arc::new(status),
            next_generation: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Reserve a generation for an update about to be computed.
    pub fn next_generation(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::SeqCst)
    }

    /// Apply a refresh result unless a newer update is already shown.
    ///
    /// Returns whether the display changed hands to this update.
    pub fn publish(&self, generation: u64, result: &DisplayResult) -> bool {
        self.apply(generation, &result.text, Some(result.icon()))
    }

    /// Replace only the title, leaving the icon as it is.
    pub fn publish_title(&self, generation: u64, title: &str) -> bool {
        self.apply(generation, title, None)
    }

    fn apply(&self, generation: u64, title: &str, icon: Option<IconState>) -> bool {
        let applied = self.status.send_if_modified(|status| {
            if generation <= status.generation {
                return false;
            }
            status.generation = generation;
            status.title = title.to_string();
            if let Some(icon) = icon {
                status.icon = icon;
            }
            true
        });

        if !applied {
            tracing::debug!(generation, title, "dropping stale display update");
        }
        applied
    }

    /// Current status.
    pub fn current(&self) -> TrayStatus {
        self.status.borrow().clone()
    }

    /// Observe every applied update.
    pub fn subscribe(&self) -> watch::Receiver<TrayStatus> {
        self.status.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn departure(text: &str, disrupted: bool) -> DisplayResult {
        DisplayResult {
            text: text.to_string(),
            disrupted,
        }
    }

    #[test]
    fn icon_follows_disruption() {
        assert_eq!(departure("x", true).icon(), IconState::FewServices);
        assert_eq!(departure("x", false).icon(), IconState::ManyServices);
        assert_eq!(DisplayResult::info(FETCH_ERROR).icon(), IconState::ManyServices);
    }

    #[test]
    fn publish_updates_title_and_icon() {
        let display = TrayDisplay::new();
        let generation = display.next_generation();

        assert!(display.publish(generation, &departure("R10 : 08:00 - 08:45", true)));

        let status = display.current();
        assert_eq!(status.title, "R10 : 08:00 - 08:45");
        assert_eq!(status.icon, IconState::FewServices);
    }

    #[test]
    fn stale_updates_are_dropped() {
        let display = TrayDisplay::new();
        let older = display.next_generation();
        let newer = display.next_generation();

        assert!(display.publish(newer, &departure("L1 : 08:10 - 08:57", false)));
        assert!(!display.publish(older, &departure("R10 : 08:00 - 08:45", true)));

        let status = display.current();
        assert_eq!(status.title, "L1 : 08:10 - 08:57");
        assert_eq!(status.icon, IconState::ManyServices);
    }

    #[test]
    fn title_only_keeps_icon() {
        let display = TrayDisplay::new();
        display.publish(display.next_generation(), &departure("R10 : 08:00 - 08:45", true));
        display.publish_title(display.next_generation(), NO_ROUTES);

        let status = display.current();
        assert_eq!(status.title, NO_ROUTES);
        assert_eq!(status.icon, IconState::FewServices);
    }

    #[tokio::test]
    async fn subscribers_see_applied_updates() {
        let display = TrayDisplay::new();
        let mut rx = display.subscribe();

        display.publish(display.next_generation(), &DisplayResult::info(NO_DEPARTURES));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().title, NO_DEPARTURES);
    }

    #[test]
    fn status_serializes_for_clients() {
        let display = TrayDisplay::new();
        display.publish(display.next_generation(), &departure("R10 : 08:00 - 08:45", true));

        let json = serde_json::to_value(display.current()).unwrap();
        assert_eq!(json["title"], "R10 : 08:00 - 08:45");
        assert_eq!(json["icon"], "few-services");
        assert!(json.get("generation").is_none());
    }
}

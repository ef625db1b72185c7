//! Single control loop for the tray.
//!
//! The controller task owns the route store. Timer ticks and user actions
//! arrive as [`Command`]s on one channel and are handled in order, so the
//! store has a single writer. Planner requests run in their own tasks; the
//! display keeps whichever result was issued last.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::departure::{
    DepartureResolver, MenuEntry, NO_ROUTES, RefreshPlan, TrayDisplay, build_menu, plan_refresh,
};
use crate::domain::Selection;
use crate::geocoder::AddPairRequest;
use crate::journey::TripPlanner;
use crate::store::{RouteStore, StateStore};

/// Default poll period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Commands buffered before senders wait.
const COMMAND_BUFFER: usize = 32;

/// Why a refresh was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Timer,
    Selected,
    RouteAdded,
    Manual,
}

/// Work for the controller.
#[derive(Debug)]
pub enum Command {
    Refresh(RefreshTrigger),
    AddPair(AddPairRequest),
    Select(Selection),
    ClearAll,
    Menu(oneshot::Sender<Vec<MenuEntry>>),
}

/// The controller task has stopped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("controller is not running")]
pub struct ControllerClosed;

/// Sending side of the controller.
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    tx: mpsc::Sender<Command>,
}

impl ControllerHandle {
    async fn send(&self, command: Command) -> Result<(), ControllerClosed> {
        self.tx.send(command).await.map_err(|_| ControllerClosed)
    }

    pub async fn refresh(&self, trigger: RefreshTrigger) -> Result<(), ControllerClosed> {
        self.send(Command::Refresh(trigger)).await
    }

    /// Ask for a pair to be saved. No acknowledgement is given.
    pub async fn add_pair(&self, request: AddPairRequest) -> Result<(), ControllerClosed> {
        self.send(Command::AddPair(request)).await
    }

    pub async fn select(&self, selection: Selection) -> Result<(), ControllerClosed> {
        self.send(Command::Select(selection)).await
    }

    pub async fn clear_all(&self) -> Result<(), ControllerClosed> {
        self.send(Command::ClearAll).await
    }

    /// Current route menu.
    pub async fn menu(&self) -> Result<Vec<MenuEntry>, ControllerClosed> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Menu(tx)).await?;
        rx.await.map_err(|_| ControllerClosed)
    }
}

/// Owner of the route store and driver of refreshes.
pub struct Controller<S, P> {
    routes: RouteStore<S>,
    resolver: Arc<DepartureResolver<P>>,
    display: TrayDisplay,
    rx: mpsc::Receiver<Command>,
}

impl<S, P> Controller<S, P>
where
    S: StateStore,
    P: TripPlanner + Send + Sync + 'static,
{
    /// Create a controller and the handle used to reach it.
    pub fn new(
        routes: RouteStore<S>,
        resolver: DepartureResolver<P>,
        display: TrayDisplay,
    ) -> (Self, ControllerHandle) {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        let controller = Self {
            routes,
            resolver: Arc::new(resolver),
            display,
            rx,
        };
        (controller, ControllerHandle { tx })
    }

    /// Handle commands until every handle is dropped.
    pub async fn run(mut self) {
        while let Some(command) = self.rx.recv().await {
            self.handle(command);
        }
        tracing::debug!("controller stopped");
    }

    /// Handle one command.
    ///
    /// Returns the spawned planner request, if the command started one.
    ///
    /// Store writes run inline on the runtime thread. The state file is a
    /// few hundred bytes and only changes on user action.
    pub fn handle(&mut self, command: Command) -> Option<JoinHandle<()>> {
        match command {
            Command::Refresh(trigger) => self.refresh(trigger),
            Command::AddPair(request) => match self.routes.add_pair(request.from, request.to) {
                Ok(Some(_)) => self.refresh(RefreshTrigger::RouteAdded),
                Ok(None) => None,
                Err(e) => {
                    tracing::error!(error = %e, "failed to save route");
                    None
                }
            },
            Command::Select(selection) => match self.routes.set_active(&selection) {
                Ok(()) => self.refresh(RefreshTrigger::Selected),
                Err(e) => {
                    tracing::error!(error = %e, "failed to save selection");
                    None
                }
            },
            Command::ClearAll => {
                match self.routes.clear_all() {
                    Ok(()) => {
                        // Supersedes any request still in flight
                        let generation = self.display.next_generation();
                        self.display.publish_title(generation, NO_ROUTES);
                    }
                    Err(e) => tracing::error!(error = %e, "failed to clear routes"),
                }
                None
            }
            Command::Menu(reply) => {
                let menu = build_menu(
                    &self.routes.list_pairs(),
                    self.routes.active_selection().as_ref(),
                );
                // Caller may have gone away
                let _ = reply.send(menu);
                None
            }
        }
    }

    /// Start a refresh.
    ///
    /// The generation is taken now, so a slow request cannot overwrite the
    /// result of a refresh started after it.
    fn refresh(&self, trigger: RefreshTrigger) -> Option<JoinHandle<()>> {
        let generation = self.display.next_generation();
        tracing::debug!(?trigger, generation, "refreshing departure");

        match plan_refresh(&self.routes) {
            RefreshPlan::Ready(result) => {
                self.display.publish(generation, &result);
                None
            }
            RefreshPlan::Query {
                origin,
                destination,
            } => {
                let resolver = Arc::clone(&self.resolver);
                let display = self.display.clone();
                Some(tokio::spawn(async move {
                    let result = resolver.fetch(&origin, &destination).await;
                    display.publish(generation, &result);
                }))
            }
        }
    }
}

/// Send a timer refresh every `period`, starting immediately.
///
/// Stops once the controller is gone.
pub fn spawn_timer(handle: ControllerHandle, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if handle.refresh(RefreshTrigger::Timer).await.is_err() {
                break;
            }
        }
    })
}

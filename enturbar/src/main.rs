use anyhow::{Context, bail};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use enturbar::cache::{CacheConfig, CachedGeocoder};
use enturbar::config::{Action, Cli, Settings};
use enturbar::controller::{Controller, spawn_timer};
use enturbar::departure::{DepartureResolver, TrayDisplay, build_menu};
use enturbar::domain::Selection;
use enturbar::geocoder::{Endpoint, GeocoderClient, RouteDraft};
use enturbar::journey::JourneyPlannerClient;
use enturbar::store::{JsonFileStore, RouteStore};
use enturbar::web::{AppState, create_router};

const DEFAULT_LOG_FILTER: &str = "enturbar=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let settings = &cli.settings;

    match cli.action() {
        Action::Run => run(settings).await,
        Action::Status => status(settings).await,
        Action::List => list(settings),
        Action::Select { selection } => select(settings, &selection),
        Action::Clear => clear(settings),
        Action::Search { text } => search(settings, &text).await,
        Action::Add { from, to } => add(settings, &from, &to).await,
    }
}

/// Log to stderr so command output stays clean.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn open_routes(settings: &Settings) -> anyhow::Result<RouteStore<JsonFileStore>> {
    let store = JsonFileStore::open(&settings.state_path)
        .with_context(|| format!("failed to open state file {}", settings.state_path.display()))?;
    Ok(RouteStore::new(store))
}

/// Poll the planner and serve the control API until interrupted.
async fn run(settings: &Settings) -> anyhow::Result<()> {
    let routes = open_routes(settings)?;
    let planner = JourneyPlannerClient::new(settings.journey_config())
        .context("failed to create journey planner client")?;
    let geocoder = GeocoderClient::new(settings.geocoder_config())
        .context("failed to create geocoder client")?;

    let display = TrayDisplay::new();
    let (controller, handle) = Controller::new(
        routes,
        DepartureResolver::new(planner, settings.timezone),
        display.clone(),
    );
    let controller_task = tokio::spawn(controller.run());

    // Terminal surface: show every title the tray would show
    let mut updates = display.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let status = updates.borrow_and_update().clone();
            tracing::info!(title = %status.title, icon = ?status.icon, "tray updated");
        }
    });

    let timer = spawn_timer(handle.clone(), settings.poll_interval());

    let geocoder = CachedGeocoder::new(geocoder, &CacheConfig::default());
    let app = create_router(AppState::new(handle, display, geocoder));

    let listener = TcpListener::bind(settings.listen)
        .await
        .with_context(|| format!("failed to bind {}", settings.listen))?;
    tracing::info!(
        addr = %settings.listen,
        poll_secs = settings.poll_secs,
        state = %settings.state_path.display(),
        "enturbar listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await
        .context("control API failed")?;

    // Dropping the last handle stops the controller
    timer.abort();
    let _ = timer.await;
    let _ = controller_task.await;
    Ok(())
}

async fn status(settings: &Settings) -> anyhow::Result<()> {
    let routes = open_routes(settings)?;
    let planner = JourneyPlannerClient::new(settings.journey_config())
        .context("failed to create journey planner client")?;

    let result = DepartureResolver::new(planner, settings.timezone)
        .refresh_departure(&routes)
        .await;

    if result.disrupted {
        println!("{} (reduced service)", result.text);
    } else {
        println!("{}", result.text);
    }
    Ok(())
}

fn list(settings: &Settings) -> anyhow::Result<()> {
    let routes = open_routes(settings)?;
    let menu = build_menu(&routes.list_pairs(), routes.active_selection().as_ref());

    for entry in menu {
        let mark = if entry.checked { "x" } else { " " };
        match entry.selection {
            Some(selection) => println!("[{mark}] {}  ({selection})", entry.label),
            None => println!("    {}", entry.label),
        }
    }
    Ok(())
}

fn select(settings: &Settings, selection: &str) -> anyhow::Result<()> {
    let selection = Selection::parse(selection)?;
    let mut routes = open_routes(settings)?;
    routes.set_active(&selection)?;

    match routes.resolve_active() {
        Some(active) => println!("{}", active.pair.label(active.reversed)),
        None => tracing::warn!(%selection, "selection does not match a saved route"),
    }
    Ok(())
}

fn clear(settings: &Settings) -> anyhow::Result<()> {
    let mut routes = open_routes(settings)?;
    routes.clear_all()?;
    println!("no routes");
    Ok(())
}

async fn search(settings: &Settings, text: &str) -> anyhow::Result<()> {
    let geocoder = GeocoderClient::new(settings.geocoder_config())?;

    for suggestion in geocoder.autocomplete(text).await? {
        println!("{}  ({})", suggestion.label(), suggestion.id);
    }
    Ok(())
}

/// Save a route from the top suggestion for each query.
async fn add(settings: &Settings, from: &str, to: &str) -> anyhow::Result<()> {
    let geocoder = GeocoderClient::new(settings.geocoder_config())?;
    let (from_hits, to_hits) =
        futures::try_join!(geocoder.autocomplete(from), geocoder.autocomplete(to))?;

    let mut draft = RouteDraft::new();
    let picks = [
        (Endpoint::From, from, &from_hits),
        (Endpoint::To, to, &to_hits),
    ];
    for (endpoint, text, hits) in picks {
        match hits.first() {
            Some(top) => println!("{}", draft.select(endpoint, top)),
            None => bail!("no stop found for {text:?}"),
        }
    }
    let request = draft.submit()?;

    let mut routes = open_routes(settings)?;
    match routes.add_pair(request.from, request.to)? {
        Some(pair) => println!("{}  ({})", pair.label(false), pair.id()),
        None => bail!("route was not saved"),
    }
    Ok(())
}

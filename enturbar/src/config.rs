//! Command-line and environment configuration.
//!
//! Every setting can come from a flag or an `ENTURBAR_*` variable; flags
//! win. Defaults point at the public Entur endpoints.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::domain::DisplayZone;
use crate::geocoder::{DEFAULT_GEOCODER_URL, GeocoderConfig};
use crate::journey::{DEFAULT_CLIENT_NAME, DEFAULT_JOURNEY_URL, JourneyPlannerConfig};

/// Tray departure monitor for the Entur journey planner.
#[derive(Debug, Parser)]
#[command(name = "enturbar", version)]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub action: Option<Action>,
}

impl Cli {
    /// The requested action; `run` when none is given.
    pub fn action(&self) -> Action {
        self.action.clone().unwrap_or(Action::Run)
    }
}

/// What to do.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Action {
    /// Poll the planner and serve the control API
    Run,
    /// Refresh once and print the tray title
    Status,
    /// Print the route menu
    List,
    /// Change the active route
    Select {
        /// `<pairId>` or `flipped-<pairId>`
        selection: String,
    },
    /// Forget every saved route
    Clear,
    /// Print stop suggestions
    Search { text: String },
    /// Save a route using the top suggestion for each stop
    Add {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
}

/// Settings shared by every action.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Where saved routes and the selection are kept
    #[arg(long, global = true, env = "ENTURBAR_STATE_PATH", default_value = "enturbar-state.json")]
    pub state_path: PathBuf,

    /// Sent as `ET-Client-Name` on every request
    #[arg(long, global = true, env = "ENTURBAR_CLIENT_NAME", default_value = DEFAULT_CLIENT_NAME)]
    pub client_name: String,

    #[arg(long, global = true, env = "ENTURBAR_JOURNEY_URL", default_value = DEFAULT_JOURNEY_URL)]
    pub journey_url: String,

    #[arg(long, global = true, env = "ENTURBAR_GEOCODER_URL", default_value = DEFAULT_GEOCODER_URL)]
    pub geocoder_url: String,

    /// Seconds between timer refreshes
    #[arg(
        long,
        global = true,
        env = "ENTURBAR_POLL_SECS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_secs: u64,

    /// Control API address
    #[arg(long, global = true, env = "ENTURBAR_LISTEN", default_value = "127.0.0.1:7878")]
    pub listen: SocketAddr,

    /// Zone for departure times: `local` or `source`
    #[arg(long, global = true, env = "ENTURBAR_TIMEZONE", default_value_t = DisplayZone::Local)]
    pub timezone: DisplayZone,
}

impl Settings {
    pub fn journey_config(&self) -> JourneyPlannerConfig {
        JourneyPlannerConfig::new(&self.client_name).with_url(&self.journey_url)
    }

    pub fn geocoder_config(&self) -> GeocoderConfig {
        GeocoderConfig::new(&self.client_name).with_url(&self.geocoder_url)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_secs)
    }
}

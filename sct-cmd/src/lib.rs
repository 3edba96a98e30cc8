//! Command implementations for the smart city traffic CLI.
//!
//! Provides subcommands for watching the dashboard headless against a live
//! backend, the one-shot user actions (camera detail, report, route,
//! upload), and a CSV export of the camera list.

use clap::{Args, Subcommand};
use sct_core::paths::DEFAULT_BASE_URL;
use sct_core::Category;
use sct_dashboard::config::DEFAULT_REQUEST_TIMEOUT;
use sct_dashboard::DashboardConfig;
use std::time::Duration;

pub mod actions;
pub mod export;
pub mod watch;

/// Backend connection options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Backend base URL
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

impl ApiArgs {
    pub fn config(&self) -> DashboardConfig {
        DashboardConfig {
            base_url: self.base_url.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..Default::default()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the dashboard headless, printing the widgets after each refresh
    Watch {
        /// Optional layers to show besides cameras, roads and heatmap
        #[arg(short, long, value_delimiter = ',')]
        layers: Vec<Category>,

        /// Seconds between automatic refreshes
        #[arg(short, long, default_value_t = 30)]
        interval_secs: u64,

        /// Stop after this many refresh cycles
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Ignore responses older than the newest one already shown
        #[arg(long)]
        stale_guard: bool,
    },

    /// Show the detail view for one camera
    Camera {
        /// Camera id, e.g. cam_001
        id: String,
    },

    /// Submit a community report at a location
    Report {
        /// accident, congestion, construction, hazard, police or closure
        #[arg(long = "type")]
        kind: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Find route options between two places
    Route {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },

    /// Upload a traffic recording for vehicle detection
    Upload {
        /// Path to the video or image file
        path: String,
    },

    /// Fetch the cameras once and write the camera list as CSV
    Export {
        /// Output path for the camera list CSV
        #[arg(short, long)]
        csv: String,
    },
}

pub async fn run(api: ApiArgs, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Watch {
            layers,
            interval_secs,
            ticks,
            stale_guard,
        } => {
            let config = DashboardConfig {
                initial_layers: layers,
                refresh_interval: Duration::from_secs(interval_secs.max(1)),
                stale_guard,
                ..api.config()
            };
            watch::run_watch(config, ticks).await
        }
        Command::Camera { id } => actions::run_camera(&api, &id).await,
        Command::Report {
            kind,
            description,
            lat,
            lon,
        } => actions::run_report(&api, &kind, &description, lat, lon).await,
        Command::Route { from, to } => actions::run_route(&api, &from, &to).await,
        Command::Upload { path } => actions::run_upload(&api, &path).await,
        Command::Export { csv } => export::run_export(&api, &csv).await,
    }
}

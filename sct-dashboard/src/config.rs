//! Dashboard configuration.

use crate::render::heat::HeatmapConfig;
use sct_core::paths::DEFAULT_BASE_URL;
use sct_core::Category;
use std::collections::BTreeSet;
use std::time::Duration;

/// Period of the automatic refresh cycle.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Per-request timeout for backend calls.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Backend base URL, e.g. `http://localhost:5000`
    pub base_url: String,
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
    /// Optional categories shown at startup, in addition to the always-on set
    pub initial_layers: Vec<Category>,
    /// Discard fetch responses older than the newest one already applied
    /// for the same category. Off by default: the last response to arrive
    /// wins, even if it was issued first.
    pub stale_guard: bool,
    pub heatmap: HeatmapConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            initial_layers: Vec::new(),
            stale_guard: false,
            heatmap: HeatmapConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Categories whose layer is visible when the dashboard starts.
    pub fn visible_at_start(&self) -> BTreeSet<Category> {
        Category::ALWAYS_ON
            .iter()
            .chain(self.initial_layers.iter())
            .copied()
            .collect()
    }
}

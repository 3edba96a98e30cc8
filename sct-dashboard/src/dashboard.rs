//! The dashboard actor: the single owner of the store, the layer registry,
//! the map surface and the widget state.
//!
//! Handles talk to the actor over a command channel. Fetch tasks report
//! back over a separate event channel, and every command or event is
//! applied to completion before the next one is looked at.

use crate::config::DashboardConfig;
use crate::fetch::{self, fetcher_for};
use crate::layers::{LayerRegistry, LayerState};
use crate::store::{DataStore, Snapshot};
use crate::surface::MapSurface;
use crate::widgets::{CameraDetailView, DashboardView, Theme};
use chrono::Timelike;
use futures::future::join_all;
use log::{debug, info, warn};
use sct_core::records::{Analytics, CameraForecast, LatLon, ReportSubmission, RouteOption, UploadOutcome};
use sct_core::{Category, DashboardError, Result, Transport};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

pub const REPORT_SUBMITTED: &str = "Report submitted successfully!";

enum Command {
    SetVisible { category: Category, visible: bool },
    Fetch(Category),
    Refresh { done: oneshot::Sender<()> },
    SetReportLocation(LatLon),
    ReportDraft(oneshot::Sender<Option<LatLon>>),
    ReportAccepted(LatLon),
    SetTheme(Theme),
    DismissAlert,
    View(oneshot::Sender<DashboardView>),
    LayerState(Category, oneshot::Sender<LayerState>),
    Snapshot(Category, oneshot::Sender<Snapshot>),
    Barrier(oneshot::Sender<()>),
    Shutdown,
}

enum Event {
    Fetched {
        category: Category,
        seq: u64,
        result: Result<Snapshot>,
    },
    Forecast(Result<Vec<CameraForecast>>),
    Analytics(Result<Analytics>),
    RefreshDone(oneshot::Sender<()>),
}

pub struct Dashboard<S> {
    config: DashboardConfig,
    transport: Arc<dyn Transport>,
    store: DataStore,
    layers: LayerRegistry,
    surface: S,
    report_draft: Option<LatLon>,
    theme: Theme,
    alert: Option<String>,
    /// Last sequence number handed out, per category
    issued: [u64; 9],
    /// Sequence number of the snapshot currently in the store, per category
    applied: [u64; 9],
    events: mpsc::UnboundedSender<Event>,
}

impl<S: MapSurface + 'static> Dashboard<S> {
    /// Start the actor on the current tokio runtime.
    ///
    /// The join handle yields the dashboard back after `shutdown`, or once
    /// every handle is dropped.
    pub fn spawn(
        config: DashboardConfig,
        transport: Arc<dyn Transport>,
        surface: S,
    ) -> (DashboardHandle, JoinHandle<Dashboard<S>>) {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let layers = LayerRegistry::new(&config.visible_at_start(), config.heatmap.clone());
        let dashboard = Dashboard {
            config,
            transport: Arc::clone(&transport),
            store: DataStore::new(),
            layers,
            surface,
            report_draft: None,
            theme: Theme::default(),
            alert: None,
            issued: [0; 9],
            applied: [0; 9],
            events: events_tx,
        };
        let task = tokio::spawn(dashboard.run(commands_rx, events_rx));
        let handle = DashboardHandle {
            commands: commands_tx,
            transport,
        };
        (handle, task)
    }
}

impl<S: MapSurface> Dashboard<S> {
    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn layers(&self) -> &LayerRegistry {
        &self.layers
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut events: mpsc::UnboundedReceiver<Event>,
    ) -> Self {
        self.layers.attach_visible(&self.store, &mut self.surface);
        info!(
            "Dashboard started against {} with layers {:?}",
            self.config.base_url,
            self.layers.visible()
        );
        loop {
            tokio::select! {
                biased;
                Some(event) = events.recv() => self.handle_event(event),
                command = commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
            }
        }
        info!("Dashboard stopped");
        self
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::SetVisible { category, visible } => {
                let changed = self
                    .layers
                    .set_visible(category, visible, &self.store, &mut self.surface);
                if changed && visible {
                    self.spawn_fetch(category);
                }
            }
            Command::Fetch(category) => self.spawn_fetch(category),
            Command::Refresh { done } => self.refresh(done),
            Command::SetReportLocation(at) => {
                debug!("Report location set to {}", at);
                self.report_draft = Some(at);
            }
            Command::ReportDraft(reply) => {
                let _ = reply.send(self.report_draft);
            }
            Command::ReportAccepted(at) => {
                // a newer click replaces the draft and must survive
                if self.report_draft == Some(at) {
                    self.report_draft = None;
                }
                self.surface.show_popup(at, REPORT_SUBMITTED);
                if self.layers.is_visible(Category::Reports) {
                    self.spawn_fetch(Category::Reports);
                }
            }
            Command::SetTheme(theme) => {
                info!("Theme set to {}", theme);
                self.theme = theme;
                if let Some(alert) = theme.alert() {
                    self.alert = Some(alert.to_string());
                }
            }
            Command::DismissAlert => self.alert = None,
            Command::View(reply) => {
                let _ = reply.send(self.view());
            }
            Command::LayerState(category, reply) => {
                let _ = reply.send(self.layers.state(category).clone());
            }
            Command::Snapshot(category, reply) => {
                let _ = reply.send(self.store.get(category).clone());
            }
            Command::Barrier(reply) => {
                let _ = reply.send(());
            }
            Command::Shutdown => {}
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Fetched {
                category,
                seq,
                result,
            } => self.apply_fetch(category, seq, result),
            Event::Forecast(Ok(forecast)) => self.store.set_forecast(forecast),
            Event::Forecast(Err(e)) => warn!("Failed to load predictions: {}", e),
            Event::Analytics(Ok(analytics)) => self.store.set_analytics(analytics),
            Event::Analytics(Err(e)) => warn!("Failed to load analytics: {}", e),
            Event::RefreshDone(done) => {
                let _ = done.send(());
            }
        }
    }

    fn apply_fetch(&mut self, category: Category, seq: u64, result: Result<Snapshot>) {
        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Failed to load {}: {}", category, e);
                return;
            }
        };
        let index = category.index();
        if self.config.stale_guard && seq < self.applied[index] {
            info!(
                "Discarding stale {} response #{} (already showing #{})",
                category, seq, self.applied[index]
            );
            return;
        }
        debug!("Loaded {} {} records (#{})", snapshot.len(), category, seq);
        self.applied[index] = seq;
        self.store.set(snapshot);
        self.layers.rerender(category, &self.store, &mut self.surface);
    }

    fn issue(&mut self, category: Category) -> u64 {
        let slot = &mut self.issued[category.index()];
        *slot += 1;
        *slot
    }

    fn spawn_fetch(&mut self, category: Category) {
        let seq = self.issue(category);
        let transport = Arc::clone(&self.transport);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = fetcher_for(category).fetch(&*transport).await;
            let _ = events.send(Event::Fetched {
                category,
                seq,
                result,
            });
        });
    }

    /// Load the always-on categories as a joined batch, fire the visible
    /// optional ones alongside, then fire the derived-data fetches once the
    /// batch has settled. `done` resolves after the batch results are applied.
    fn refresh(&mut self, done: oneshot::Sender<()>) {
        let batch: Vec<(Category, u64)> = Category::ALWAYS_ON
            .into_iter()
            .map(|category| (category, self.issue(category)))
            .collect();
        for category in self.layers.visible() {
            if !category.is_always_on() {
                self.spawn_fetch(category);
            }
        }

        let transport = Arc::clone(&self.transport);
        let events = self.events.clone();
        tokio::spawn(async move {
            join_all(batch.into_iter().map(|(category, seq)| {
                let transport = Arc::clone(&transport);
                let events = events.clone();
                async move {
                    let result = fetcher_for(category).fetch(&*transport).await;
                    let _ = events.send(Event::Fetched {
                        category,
                        seq,
                        result,
                    });
                }
            }))
            .await;

            let forecast_transport = Arc::clone(&transport);
            let forecast_events = events.clone();
            tokio::spawn(async move {
                let result = fetch::fetch_forecast(&*forecast_transport).await;
                let _ = forecast_events.send(Event::Forecast(result));
            });
            let analytics_events = events.clone();
            tokio::spawn(async move {
                let result = fetch::fetch_analytics(&*transport).await;
                let _ = analytics_events.send(Event::Analytics(result));
            });

            let _ = events.send(Event::RefreshDone(done));
        });
    }

    fn view(&self) -> DashboardView {
        let mut view = DashboardView::build(&self.store, chrono::Local::now().hour());
        view.theme = self.theme;
        view.alert = self.alert.clone();
        view.visible = self.layers.visible();
        view.report_draft = self.report_draft;
        view
    }
}

/// Cheap, cloneable access to a running dashboard.
#[derive(Clone)]
pub struct DashboardHandle {
    commands: mpsc::UnboundedSender<Command>,
    transport: Arc<dyn Transport>,
}

impl DashboardHandle {
    fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| DashboardError::Closed)
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        self.send(command(tx))?;
        rx.await.map_err(|_| DashboardError::Closed)
    }

    /// Show or hide a layer. Showing also fetches the category.
    pub fn set_visible(&self, category: Category, visible: bool) -> Result<()> {
        self.send(Command::SetVisible { category, visible })
    }

    /// Fetch one category now, whether or not it is visible.
    pub fn fetch(&self, category: Category) -> Result<()> {
        self.send(Command::Fetch(category))
    }

    /// Run a full load and wait until the always-on batch has been applied.
    pub async fn refresh(&self) -> Result<()> {
        self.request(|done| Command::Refresh { done }).await
    }

    /// Record the map click that places the next report.
    pub fn set_report_location(&self, at: LatLon) -> Result<()> {
        if !at.is_valid() {
            return Err(DashboardError::validation(format!("Invalid report location {}", at)));
        }
        self.send(Command::SetReportLocation(at))
    }

    /// Submit a report at the current draft location.
    ///
    /// On success the draft is cleared and, if the reports layer is
    /// visible, reports are fetched again.
    pub async fn submit_report(&self, kind: &str, description: &str) -> Result<()> {
        let at = self
            .request(Command::ReportDraft)
            .await?
            .ok_or_else(|| DashboardError::validation("Click on map to set report location"))?;
        let kind = kind.trim();
        if kind.is_empty() {
            return Err(DashboardError::validation("Select a report type"));
        }
        let submission = ReportSubmission {
            kind: kind.to_string(),
            description: description.to_string(),
            lat: at.lat,
            lon: at.lon,
        };
        fetch::submit_report(&*self.transport, &submission).await?;
        self.send(Command::ReportAccepted(at))
    }

    pub async fn find_route(&self, from: &str, to: &str) -> Result<Vec<RouteOption>> {
        fetch::find_route(&*self.transport, from, to).await
    }

    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadOutcome> {
        fetch::upload(&*self.transport, file_name, bytes).await
    }

    pub async fn camera_detail(&self, camera_id: &str) -> Result<CameraDetailView> {
        let detail = fetch::fetch_camera_detail(&*self.transport, camera_id).await?;
        Ok(CameraDetailView::from(&detail))
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.send(Command::SetTheme(theme))
    }

    pub fn dismiss_alert(&self) -> Result<()> {
        self.send(Command::DismissAlert)
    }

    pub async fn view(&self) -> Result<DashboardView> {
        self.request(Command::View).await
    }

    pub async fn layer_state(&self, category: Category) -> Result<LayerState> {
        self.request(|reply| Command::LayerState(category, reply)).await
    }

    pub async fn snapshot(&self, category: Category) -> Result<Snapshot> {
        self.request(|reply| Command::Snapshot(category, reply)).await
    }

    /// Resolves once every command sent before it has been applied.
    pub async fn barrier(&self) -> Result<()> {
        self.request(Command::Barrier).await
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown)
    }
}

//! Periodic and manual refresh of the dashboard.

use crate::dashboard::DashboardHandle;
use log::debug;
use sct_core::{DashboardError, Result};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, MissedTickBehavior};

/// Requests an immediate refresh from a running scheduler.
#[derive(Debug, Clone)]
pub struct RefreshTrigger(mpsc::UnboundedSender<()>);

impl RefreshTrigger {
    pub fn refresh_now(&self) -> Result<()> {
        self.0.send(()).map_err(|_| DashboardError::Closed)
    }
}

/// Drives `DashboardHandle::refresh` on a fixed period. The first cycle
/// runs immediately; a manual trigger runs a cycle at once and restarts
/// the period from that moment.
pub struct RefreshScheduler {
    handle: DashboardHandle,
    period: Duration,
    manual: mpsc::UnboundedReceiver<()>,
    cycles: watch::Sender<u64>,
}

impl RefreshScheduler {
    pub fn new(handle: DashboardHandle, period: Duration) -> (Self, RefreshTrigger) {
        let (trigger, manual) = mpsc::unbounded_channel();
        let (cycles, _) = watch::channel(0);
        let scheduler = RefreshScheduler {
            handle,
            period,
            manual,
            cycles,
        };
        (scheduler, RefreshTrigger(trigger))
    }

    /// Number of completed refresh cycles.
    pub fn cycles(&self) -> watch::Receiver<u64> {
        self.cycles.subscribe()
    }

    /// Run until `ticks` cycles have completed, forever when `None`. Fails
    /// only if the dashboard stops.
    pub async fn run(mut self, ticks: Option<u64>) -> Result<()> {
        let mut interval = time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut manual_open = true;
        let mut completed = 0u64;

        while ticks.map_or(true, |limit| completed < limit) {
            let source = tokio::select! {
                _ = interval.tick() => "tick",
                trigger = self.manual.recv(), if manual_open => match trigger {
                    Some(()) => {
                        interval.reset();
                        "manual"
                    }
                    None => {
                        manual_open = false;
                        continue;
                    }
                },
            };
            debug!("Refreshing ({})", source);
            self.handle.refresh().await?;
            completed += 1;
            self.cycles.send_replace(completed);
        }
        Ok(())
    }
}

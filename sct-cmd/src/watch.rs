//! Headless dashboard loop.

use anyhow::Context;
use log::{info, warn};
use sct_core::client::ApiClient;
use sct_dashboard::widgets::DashboardView;
use sct_dashboard::{Dashboard, DashboardConfig, LogSurface, RefreshScheduler, RefreshTrigger};
use std::io::BufRead;
use std::sync::Arc;

/// Run the dashboard against the backend until `ticks` refresh cycles have
/// completed, or until Ctrl-C when `ticks` is `None`.
///
/// Typing `r` and Enter on stdin triggers an immediate refresh.
pub async fn run_watch(config: DashboardConfig, ticks: Option<u64>) -> anyhow::Result<()> {
    let client = ApiClient::new(&config.base_url, config.request_timeout)
        .context("Failed to build HTTP client")?;
    info!(
        "Watching {} every {}s",
        client.base_url(),
        config.refresh_interval.as_secs()
    );

    let period = config.refresh_interval;
    let (handle, dashboard) = Dashboard::spawn(config, Arc::new(client), LogSurface::new());
    let (scheduler, trigger) = RefreshScheduler::new(handle.clone(), period);
    let mut cycles = scheduler.cycles();
    let mut scheduler = tokio::spawn(scheduler.run(ticks));
    spawn_stdin_reader(trigger);

    let mut cycles_open = true;
    let mut printed = 0;
    loop {
        tokio::select! {
            changed = cycles.changed(), if cycles_open => {
                if changed.is_err() {
                    cycles_open = false;
                    continue;
                }
                printed = *cycles.borrow_and_update();
                print_view(printed, &handle.view().await?);
            }
            finished = &mut scheduler => {
                finished.context("Refresh scheduler panicked")??;
                let last = *cycles.borrow();
                if last > printed {
                    print_view(last, &handle.view().await?);
                }
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                scheduler.abort();
                break;
            }
        }
    }

    handle.shutdown()?;
    dashboard.await.context("Dashboard task panicked")?;
    Ok(())
}

fn spawn_stdin_reader(trigger: RefreshTrigger) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if matches!(line.trim(), "r" | "refresh") {
                if trigger.refresh_now().is_err() {
                    break;
                }
            } else if !line.trim().is_empty() {
                warn!("Unknown input '{}', type 'r' to refresh", line.trim());
            }
        }
    });
}

fn print_view(cycle: u64, view: &DashboardView) {
    println!("--- refresh #{} ---", cycle);
    println!("{}", view.stats);
    for camera in &view.cameras {
        println!(
            "  {:<24} {:<20} {:>5} vehicles  {}",
            camera.name, camera.location, camera.total_vehicles, camera.label
        );
    }
    if let Some(forecast) = &view.forecast {
        println!("Next hour: {}", forecast);
    }
    if let Some(env) = &view.environment {
        println!("AQI {} • {} t CO2", env.aqi, env.carbon_tons);
    }
    let layers: Vec<&str> = view.visible.iter().map(|c| c.as_str()).collect();
    println!("Layers: {}", layers.join(", "));
    if let Some(alert) = &view.alert {
        println!("{}", alert);
    }
}

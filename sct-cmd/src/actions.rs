//! One-shot user actions against the backend.

use crate::ApiArgs;
use anyhow::Context;
use log::info;
use sct_core::client::ApiClient;
use sct_core::records::LatLon;
use sct_dashboard::widgets::{BarSeries, CameraDetailView};
use sct_dashboard::{Dashboard, LogSurface};
use std::path::Path;
use std::sync::Arc;

fn client(api: &ApiArgs) -> anyhow::Result<ApiClient> {
    let config = api.config();
    ApiClient::new(&config.base_url, config.request_timeout).context("Failed to build HTTP client")
}

/// Fetch and print the detail view of one camera.
pub async fn run_camera(api: &ApiArgs, camera_id: &str) -> anyhow::Result<()> {
    let client = client(api)?;
    let detail = sct_dashboard::fetch::fetch_camera_detail(&client, camera_id)
        .await
        .with_context(|| format!("Failed to load camera {}", camera_id))?;
    print_detail(&CameraDetailView::from(&detail));
    Ok(())
}

/// Place the report draft at `lat, lon` and submit it through a dashboard,
/// the same path a map click followed by the report form takes.
pub async fn run_report(
    api: &ApiArgs,
    kind: &str,
    description: &str,
    lat: f64,
    lon: f64,
) -> anyhow::Result<()> {
    let client = client(api)?;
    let (handle, dashboard) = Dashboard::spawn(api.config(), Arc::new(client), LogSurface::new());
    let submitted = async {
        handle.set_report_location(LatLon::new(lat, lon))?;
        handle.submit_report(kind, description).await
    }
    .await;
    handle.shutdown()?;
    dashboard.await.context("Dashboard task panicked")?;
    submitted.context("Report was not submitted")?;
    println!("Report submitted successfully!");
    Ok(())
}

pub async fn run_route(api: &ApiArgs, from: &str, to: &str) -> anyhow::Result<()> {
    let client = client(api)?;
    let routes = sct_dashboard::fetch::find_route(&client, from, to).await?;
    if routes.is_empty() {
        println!("No routes found");
    }
    for route in &routes {
        println!("{}", route);
    }
    Ok(())
}

pub async fn run_upload(api: &ApiArgs, path: &str) -> anyhow::Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path))?;
    let file_name = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string();
    info!("Uploading {} ({} bytes)", file_name, bytes.len());

    let client = client(api)?;
    let outcome = sct_dashboard::fetch::upload(&client, &file_name, bytes).await?;
    println!("{}", outcome);
    Ok(())
}

fn print_detail(view: &CameraDetailView) {
    println!("{} ({})", view.name, view.location);
    println!(
        "Total vehicles: {} • Avg speed: {} mph • Status: {}",
        view.total, view.avg_speed, view.status
    );
    println!("Vehicle breakdown:");
    for (kind, count) in &view.breakdown {
        println!("  {:<14} {}", kind, count);
    }
    println!("{} by hour:", view.hourly.label);
    for line in bar_lines(&view.hourly, 40) {
        println!("  {}", line);
    }
}

/// Render a bar series as text rows scaled to `width` characters.
fn bar_lines(series: &BarSeries, width: usize) -> Vec<String> {
    let peak = series.values.iter().copied().max().unwrap_or(0).max(1);
    series
        .labels
        .iter()
        .zip(&series.values)
        .map(|(label, value)| {
            let len = (*value as usize * width) / peak as usize;
            format!("{:>6} {} {}", label, "#".repeat(len), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_peak() {
        let series = BarSeries {
            label: "Vehicles",
            color: "#1a73e8",
            labels: vec!["06:00".to_string(), "07:00".to_string()],
            values: vec![50, 100],
        };
        let lines = bar_lines(&series, 10);
        assert_eq!(lines[0], " 06:00 ##### 50");
        assert_eq!(lines[1], " 07:00 ########## 100");
    }

    #[test]
    fn empty_series_has_no_rows() {
        let series = BarSeries {
            label: "Vehicles",
            color: "#1a73e8",
            labels: Vec::new(),
            values: Vec::new(),
        };
        assert!(bar_lines(&series, 10).is_empty());
    }
}

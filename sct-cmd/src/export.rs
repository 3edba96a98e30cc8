//! CSV export of the camera list.

use crate::ApiArgs;
use anyhow::Context;
use log::info;
use sct_core::client::ApiClient;
use sct_core::records::CameraRecord;
use sct_core::Category;
use sct_dashboard::fetch::fetcher_for;
use sct_dashboard::Snapshot;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct CameraRow<'a> {
    id: &'a str,
    name: &'a str,
    location: &'a str,
    road: &'a str,
    total_vehicles: u32,
    density: f64,
    congestion: &'a str,
}

impl<'a> From<&'a CameraRecord> for CameraRow<'a> {
    fn from(camera: &'a CameraRecord) -> Self {
        CameraRow {
            id: &camera.id,
            name: &camera.name,
            location: &camera.location,
            road: &camera.road,
            total_vehicles: camera.total_vehicles,
            density: camera.density,
            congestion: camera.congestion.level.as_str(),
        }
    }
}

/// Fetch the cameras once and write them to `csv_path`.
pub async fn run_export(api: &ApiArgs, csv_path: &str) -> anyhow::Result<()> {
    let config = api.config();
    let client = ApiClient::new(&config.base_url, config.request_timeout)
        .context("Failed to build HTTP client")?;
    let cameras = match fetcher_for(Category::Cameras).fetch(&client).await? {
        Snapshot::Cameras(cameras) => cameras,
        other => anyhow::bail!("Expected camera records, got {:?}", other.category()),
    };

    let file = std::fs::File::create(csv_path)
        .with_context(|| format!("Failed to create {}", csv_path))?;
    write_cameras(file, &cameras)?;
    info!("Wrote {} cameras to {}", cameras.len(), csv_path);
    Ok(())
}

fn write_cameras<W: Write>(writer: W, cameras: &[CameraRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for camera in cameras {
        wtr.serialize(CameraRow::from(camera))?;
    }
    wtr.flush()?;
    Ok(())
}

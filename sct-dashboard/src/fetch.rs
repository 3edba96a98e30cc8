//! Fetchers: one parameterized fetch routine driven by a per-category table,
//! plus the derived-data, detail and user-action requests.

use crate::store::{Snapshot, SnapshotRecord};
use log::info;
use sct_core::paths;
use sct_core::records::{
    Analytics, CameraDetail, CameraForecast, CameraRecord, DisasterZone, EmergencyService,
    HeatPoint, ParkingLot, PointOfInterest, Report, ReportSubmission, RoadSegment, RouteOption,
    RouteRequest, RouteResponse, TrafficSignal, UploadOutcome, UploadResponse,
};
use sct_core::transport::decode;
use sct_core::{Category, DashboardError, Result, Transport};

/// Endpoint and record shape for one category.
pub struct Fetcher {
    pub category: Category,
    pub path: &'static str,
    parse: fn(&str, &str) -> Result<Snapshot>,
}

fn decode_snapshot<R: SnapshotRecord>(path: &str, body: &str) -> Result<Snapshot> {
    decode::<Vec<R>>(path, body).map(R::into_snapshot)
}

/// Indexed by `Category::index()`.
pub static FETCHERS: [Fetcher; 9] = [
    Fetcher {
        category: Category::Cameras,
        path: paths::TRAFFIC_DATA,
        parse: decode_snapshot::<CameraRecord>,
    },
    Fetcher {
        category: Category::Roads,
        path: paths::ROAD_SEGMENTS,
        parse: decode_snapshot::<RoadSegment>,
    },
    Fetcher {
        category: Category::Signals,
        path: paths::TRAFFIC_SIGNALS,
        parse: decode_snapshot::<TrafficSignal>,
    },
    Fetcher {
        category: Category::Pois,
        path: paths::POIS,
        parse: decode_snapshot::<PointOfInterest>,
    },
    Fetcher {
        category: Category::Emergency,
        path: paths::EMERGENCY_SERVICES,
        parse: decode_snapshot::<EmergencyService>,
    },
    Fetcher {
        category: Category::Disaster,
        path: paths::DISASTER_ZONES,
        parse: decode_snapshot::<DisasterZone>,
    },
    Fetcher {
        category: Category::Parking,
        path: paths::PARKING,
        parse: decode_snapshot::<ParkingLot>,
    },
    Fetcher {
        category: Category::Reports,
        path: paths::REPORTS,
        parse: decode_snapshot::<Report>,
    },
    Fetcher {
        category: Category::Heatmap,
        path: paths::HEATMAP_DATA,
        parse: decode_snapshot::<HeatPoint>,
    },
];

pub fn fetcher_for(category: Category) -> &'static Fetcher {
    &FETCHERS[category.index()]
}

impl Fetcher {
    /// GET the endpoint and parse it into this category's snapshot.
    pub async fn fetch(&self, transport: &dyn Transport) -> Result<Snapshot> {
        let body = transport.get(self.path).await?;
        self.parse(&body)
    }

    pub fn parse(&self, body: &str) -> Result<Snapshot> {
        (self.parse)(self.path, body)
    }
}

pub async fn fetch_forecast(transport: &dyn Transport) -> Result<Vec<CameraForecast>> {
    let body = transport.get(paths::PREDICTIONS).await?;
    decode(paths::PREDICTIONS, &body)
}

pub async fn fetch_analytics(transport: &dyn Transport) -> Result<Analytics> {
    let body = transport.get(paths::ANALYTICS).await?;
    decode(paths::ANALYTICS, &body)
}

/// On-demand detail for a single camera; not part of the refresh cycle.
pub async fn fetch_camera_detail(transport: &dyn Transport, camera_id: &str) -> Result<CameraDetail> {
    let camera_id = camera_id.trim();
    if camera_id.is_empty() {
        return Err(DashboardError::validation("Camera id is required"));
    }
    let path = paths::camera_detail(camera_id);
    let body = transport.get(&path).await?;
    decode(&path, &body)
}

pub async fn submit_report(transport: &dyn Transport, report: &ReportSubmission) -> Result<()> {
    let body = serde_json::to_value(report).map_err(|source| DashboardError::Parse {
        path: paths::REPORTS.to_string(),
        source,
    })?;
    transport.post_json(paths::REPORTS, &body).await?;
    info!("Submitted {} report at {}, {}", report.kind, report.lat, report.lon);
    Ok(())
}

/// Ask the backend for route options between two free-text places.
pub async fn find_route(transport: &dyn Transport, from: &str, to: &str) -> Result<Vec<RouteOption>> {
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        return Err(DashboardError::validation("Enter origin and destination"));
    }
    let request = RouteRequest {
        from: from.to_string(),
        to: to.to_string(),
    };
    let body = serde_json::to_value(&request).map_err(|source| DashboardError::Parse {
        path: paths::ROUTE.to_string(),
        source,
    })?;
    let response = transport.post_json(paths::ROUTE, &body).await?;
    let routes: RouteResponse = decode(paths::ROUTE, &response)?;
    Ok(routes.routes)
}

/// Upload a recording for vehicle detection.
///
/// A rejection from the backend (error body, with or without an error
/// status) is an `Ok(UploadOutcome::Rejected)`; only transport failures
/// are errors.
pub async fn upload(transport: &dyn Transport, file_name: &str, bytes: Vec<u8>) -> Result<UploadOutcome> {
    if file_name.trim().is_empty() || bytes.is_empty() {
        return Err(DashboardError::validation("No file selected"));
    }
    let body = match transport.post_file(paths::UPLOAD, file_name, bytes).await {
        Ok(body) => body,
        Err(DashboardError::Status { body, status, .. }) => {
            return Ok(decode::<UploadResponse>(paths::UPLOAD, &body)
                .map(UploadOutcome::from)
                .unwrap_or_else(|_| UploadOutcome::Rejected(format!("HTTP {}", status))));
        }
        Err(e) => return Err(e),
    };
    decode::<UploadResponse>(paths::UPLOAD, &body).map(UploadOutcome::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, FakeTransport};

    #[test]
    fn table_is_indexed_by_category() {
        for category in Category::ALL {
            assert_eq!(fetcher_for(category).category, category);
        }
    }

    #[tokio::test]
    async fn fetch_returns_records_in_response_order() {
        let fake = FakeTransport::new();
        fake.respond(paths::PARKING, fixtures::PARKING);
        let snapshot = fetcher_for(Category::Parking).fetch(&*fake).await.unwrap();
        match snapshot {
            Snapshot::Parking(lots) => {
                let ids: Vec<&str> = lots.iter().map(|l| l.id.as_str()).collect();
                assert_eq!(ids, vec!["park_001", "park_002", "park_003", "park_004"]);
            }
            other => panic!("unexpected snapshot {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_failure() {
        let fake = FakeTransport::new();
        fake.respond(paths::TRAFFIC_SIGNALS, r#"[{"id": "sig_001", "lat": "north"}]"#);
        let err = fetcher_for(Category::Signals).fetch(&*fake).await.unwrap_err();
        assert!(matches!(err, DashboardError::Parse { .. }));
    }

    #[tokio::test]
    async fn camera_detail_uses_id_path() {
        let fake = FakeTransport::new();
        fake.respond("/api/camera/cam_001", fixtures::CAMERA_DETAIL);
        let detail = fetch_camera_detail(&*fake, "cam_001").await.unwrap();
        assert_eq!(detail.camera.name, "Times Square");
        assert_eq!(detail.hourly.len(), 3);
        assert!(matches!(
            fetch_camera_detail(&*fake, " ").await,
            Err(DashboardError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn route_requires_both_endpoints() {
        let fake = FakeTransport::new();
        let err = find_route(&*fake, "Times Square", "  ").await.unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn route_posts_request_body() {
        let fake = FakeTransport::new();
        fake.respond(paths::ROUTE, fixtures::ROUTES);
        let routes = find_route(&*fake, "Times Square", "Central Park").await.unwrap();
        assert_eq!(routes.len(), 3);
        assert_eq!(routes[2].carbon_saved.as_deref(), Some("18%"));
        let posts = fake.posts(paths::ROUTE);
        assert_eq!(posts, vec![serde_json::json!({"from": "Times Square", "to": "Central Park"})]);
    }

    #[tokio::test]
    async fn upload_outcomes() {
        let fake = FakeTransport::new();
        fake.respond(paths::UPLOAD, r#"{"success": true, "detections": 37, "file": "x.mp4"}"#);
        let outcome = upload(&*fake, "x.mp4", vec![1, 2, 3]).await.unwrap();
        assert_eq!(outcome.to_string(), "✅ Detected 37 vehicles");

        fake.fail_status(paths::UPLOAD, 400, r#"{"error": "No file"}"#);
        let outcome = upload(&*fake, "x.mp4", vec![1]).await.unwrap();
        assert_eq!(outcome, UploadOutcome::Rejected("No file".to_string()));

        let err = upload(&*fake, "empty.mp4", Vec::new()).await.unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
    }
}
